//! Service layer for the review workflow
//!
//! State machines are plain synchronous types (`simulation`, `wizard`,
//! `review_board`); the async pieces own shared state or time.

pub mod analysis_runner;
pub mod catalog;
pub mod document_registry;
pub mod progress_store;
pub mod review_board;
pub mod session;
pub mod simulation;
pub mod upload_store;
pub mod wizard;

pub use analysis_runner::AnalysisRunner;
pub use catalog::{project_analysis_progress, CatalogProvider, FixtureCatalog};
pub use document_registry::{DocumentProgress, DocumentRegistry};
pub use progress_store::{ProgressSource, SimulatedProgressStore};
pub use review_board::{ReviewBoard, ReviewError, ReviewSummary};
pub use session::{ReviewSession, RunnerHandle, SessionRegistry, SessionSeed, SessionSnapshot};
pub use simulation::{SimulationPhase, SimulationState, TickEvent};
pub use upload_store::UploadStore;
pub use wizard::{StageTransition, UnlockFlags, WizardController, WizardError};
