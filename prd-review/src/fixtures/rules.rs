//! Assessment rule catalog

use crate::models::{AssessmentRule, Severity};

fn rule(id: &str, title: &str, description: &str, category: &str, severity: Severity) -> AssessmentRule {
    AssessmentRule {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        severity,
        enabled: true,
    }
}

pub fn assessment_rules() -> Vec<AssessmentRule> {
    vec![
        rule(
            "rule1",
            "需求完整性检查",
            "检查需求是否包含完整的功能描述、性能指标和验收标准",
            "完整性",
            Severity::High,
        ),
        rule("rule2", "需求一致性检查", "检查需求内部是否存在矛盾或冲突", "一致性", Severity::High),
        rule("rule3", "需求可测试性检查", "检查需求是否可以被测试验证", "可测试性", Severity::Medium),
        rule(
            "rule4",
            "需求可追溯性检查",
            "检查需求是否可以追溯到上层需求或业务目标",
            "可追溯性",
            Severity::Medium,
        ),
        rule(
            "rule5",
            "需求明确性检查",
            "检查需求描述是否清晰明确，避免模糊表述",
            "明确性",
            Severity::High,
        ),
    ]
}
