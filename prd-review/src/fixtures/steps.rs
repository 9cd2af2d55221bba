//! Analysis pipeline steps
//!
//! The catalog snapshot shows a run in flight (three steps done, the fourth at
//! 65%); the simulation resets every step before it starts ticking.

use crate::models::{AnalysisStep, StepStatus};

fn step(id: &str, title: &str, description: &str, status: StepStatus, progress: u8) -> AnalysisStep {
    AnalysisStep {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        progress,
    }
}

pub fn analysis_steps() -> Vec<AnalysisStep> {
    use StepStatus::{Completed, InProgress, Pending};

    vec![
        step("step1", "文档解析", "解析文档结构和内容", Completed, 100),
        step("step2", "需求提取", "提取文档中的需求项", Completed, 100),
        step("step3", "规则加载", "加载评估规则库", Completed, 100),
        step("step4", "完整性评估", "评估需求的完整性", InProgress, 65),
        step("step5", "一致性评估", "评估需求的一致性", Pending, 0),
        step("step6", "可测试性评估", "评估需求的可测试性", Pending, 0),
        step("step7", "可追溯性评估", "评估需求的可追溯性", Pending, 0),
        step("step8", "明确性评估", "评估需求的明确性", Pending, 0),
        step("step9", "生成评估报告", "生成最终评估报告", Pending, 0),
    ]
}
