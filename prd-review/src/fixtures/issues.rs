//! Review issue catalog

use crate::models::{IssueType, ReviewIssue};

pub fn review_issues() -> Vec<ReviewIssue> {
    vec![
        ReviewIssue {
            id: "rt1".to_string(),
            issue_type: IssueType::Error,
            title: "缺少具体的性能指标".to_string(),
            description: "当前PRD中对智能驾驶系统的性能指标描述不够具体，建议添加量化指标如响应时间、准确率等。"
                .to_string(),
            section: "section-3-2".to_string(),
            section_title: "3.2 系统性能要求".to_string(),
            suggestion: "系统响应时间应不超过100ms，目标识别准确率应达到98%以上，系统稳定性应确保99.9%的可用性。"
                .to_string(),
            accepted: None,
            original_content: Some("系统需要满足以下性能指标要求。".to_string()),
            modified_content: Some(
                "系统需要满足以下性能指标要求：\n1. 系统响应时间应不超过100ms\n2. 目标识别准确率应达到98%以上\n3. 系统稳定性应确保99.9%的可用性\n4. 峰值处理能力应支持每秒1000次请求"
                    .to_string(),
            ),
            rule: Some("需求明确性检查".to_string()),
            rule_id: Some("rule5".to_string()),
        },
        ReviewIssue {
            id: "rt2".to_string(),
            issue_type: IssueType::Warning,
            title: "用户场景描述不完整".to_string(),
            description: "用户场景描述过于简略，缺少极端情况和边缘案例的考虑。".to_string(),
            section: "section-2-2".to_string(),
            section_title: "2.2 用户调研".to_string(),
            suggestion: "建议补充恶劣天气、复杂路况等边缘场景的处理方案。".to_string(),
            accepted: None,
            original_content: Some("用户场景描述过于简略，缺少极端情况和边缘案例的考虑。".to_string()),
            modified_content: Some(
                "用户调研显示以下场景需要特别关注：\n1. 常规场景：城市道路、高速公路、乡村道路等日常驾驶环境\n2. 极端场景：暴雨、大雾、暴雪等恶劣天气条件下的系统表现\n3. 边缘案例：复杂路口、施工区域、临时交通管制等特殊情况\n4. 用户反馈：90%的测试用户对系统响应速度表示满意，但对复杂场景下的准确性存在担忧"
                    .to_string(),
            ),
            rule: Some("需求完整性检查".to_string()),
            rule_id: Some("rule1".to_string()),
        },
        ReviewIssue {
            id: "rt3".to_string(),
            issue_type: IssueType::Suggestion,
            title: "缺少合规性要求".to_string(),
            description: "未明确提及智能驾驶相关的法规标准要求。".to_string(),
            section: "section-4-1".to_string(),
            section_title: "4.1 法规要求".to_string(),
            suggestion: "建议添加ISO 26262功能安全标准、国标等相关法规要求。".to_string(),
            accepted: None,
            original_content: Some("未明确提及智能驾驶相关的法规标准要求。".to_string()),
            modified_content: Some(
                "智能驾驶系统必须符合以下法规标准要求：\n1. ISO 26262功能安全标准\n2. GB/T 33577-2017 道路车辆 功能安全\n3. 《智能网联汽车道路测试管理规范（试行）》\n4. 《汽车驾驶自动化分级》国家标准\n5. 数据安全相关法规，包括《网络安全法》和《数据安全法》中关于车辆数据的规定"
                    .to_string(),
            ),
            rule: Some("需求完整性检查".to_string()),
            rule_id: Some("rule1".to_string()),
        },
    ]
}
