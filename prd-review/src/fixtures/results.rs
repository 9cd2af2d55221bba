//! Static results and report figures

use crate::models::{DocumentComparison, ReportStats, ReviewRule, RuleIssueMapping, RuleStatus};

fn review_rule(
    id: &str,
    name: &str,
    status: RuleStatus,
    issue_count: u32,
    fixed_count: u32,
    progress: u8,
) -> ReviewRule {
    ReviewRule {
        id: id.to_string(),
        name: name.to_string(),
        status,
        issue_count,
        fixed_count,
        progress,
        score: progress,
    }
}

pub fn review_rules() -> Vec<ReviewRule> {
    vec![
        review_rule("rule1", "需求完整性检查", RuleStatus::Fail, 4, 3, 75),
        review_rule("rule2", "需求一致性检查", RuleStatus::Fail, 2, 1, 50),
        review_rule("rule3", "需求可测试性检查", RuleStatus::Pass, 1, 1, 100),
        review_rule("rule4", "需求可追溯性检查", RuleStatus::Fail, 1, 0, 0),
        review_rule("rule5", "需求明确性检查", RuleStatus::Pass, 3, 3, 100),
    ]
}

pub fn document_comparisons() -> Vec<DocumentComparison> {
    vec![DocumentComparison {
        section_id: "section-3-2".to_string(),
        section_title: "3.2 系统性能要求".to_string(),
        original_content: "系统需要满足以下性能指标要求。".to_string(),
        modified_content: "系统需要满足以下性能指标要求：\n1. 系统响应时间应不超过100ms\n2. 目标识别准确率应达到98%以上\n3. 系统稳定性应确保99.9%的可用性\n4. 峰值处理能力应支持每秒1000次请求".to_string(),
    }]
}

pub fn report_stats() -> ReportStats {
    ReportStats {
        solved_issues: 8,
        pending_issues: 3,
        document_quality: 95,
        first_confirmation_rate: 73,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn rule_issue_mappings() -> Vec<RuleIssueMapping> {
    vec![
        RuleIssueMapping {
            rule_id: "rule1".to_string(),
            rule_name: "需求完整性检查".to_string(),
            issues: strings(&["用户场景描述不完整", "缺少合规性要求", "可靠性要求缺失", "安全要求不够全面"]),
            suggestions: strings(&[
                "补充边缘场景处理方案",
                "添加法规标准要求",
                "完善环境条件要求",
                "扩展安全性要求维度",
            ]),
        },
        RuleIssueMapping {
            rule_id: "rule5".to_string(),
            rule_name: "需求明确性检查".to_string(),
            issues: strings(&["缺少具体性能指标", "自动泊车激活条件不明确", "用户界面交互细节不足"]),
            suggestions: strings(&["添加量化指标", "明确激活条件和限制", "补充界面布局和交互细节"]),
        },
    ]
}
