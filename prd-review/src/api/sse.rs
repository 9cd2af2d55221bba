//! Server-Sent Events for live workflow updates
//!
//! GET /events streams every bus event; `?session=<uuid>` narrows the stream to
//! one review session.

use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use uuid::Uuid;

use super::extract::ApiQuery;
use crate::config::MODULE_NAME;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub session: Option<Uuid>,
}

/// GET /events
pub async fn event_stream(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<EventFilter>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    prd_common::sse::create_event_sse_stream(MODULE_NAME, &state.event_bus, filter.session)
}
