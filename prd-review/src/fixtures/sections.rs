//! Seed content tree of the reviewed document

use crate::models::{DocumentImage, DocumentSection, ImageKind};

fn section(id: &str, title: &str, content: &str) -> DocumentSection {
    DocumentSection {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        modified_content: None,
        is_modified: false,
        children: Vec::new(),
        images: Vec::new(),
    }
}

fn chapter(id: &str, title: &str, content: &str, children: Vec<DocumentSection>) -> DocumentSection {
    DocumentSection {
        children,
        ..section(id, title, content)
    }
}

fn with_image(
    mut section: DocumentSection,
    id: &str,
    title: &str,
    url: &str,
    description: &str,
    kind: ImageKind,
) -> DocumentSection {
    section.images.push(DocumentImage {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        kind,
    });
    section
}

pub fn document_sections() -> Vec<DocumentSection> {
    vec![
        chapter(
            "section-1",
            "一、文档说明",
            "本文档描述了智能驾驶系统的产品需求。",
            vec![section(
                "section-1-1",
                "1.1 名词解释",
                "本文档中使用的术语和缩略词解释如下：\n- PRD: Product Requirement Document，产品需求文档\n- OCR: Optical Character Recognition，光学字符识别\n- AI: Artificial Intelligence，人工智能\n- APA: Automated Parking Assist，自动泊车辅助\n- AVM: Around View Monitor，全景影像系统\n- USS: Ultrasonic Sensor System，超声波传感器系统",
            )],
        ),
        chapter(
            "section-2",
            "二、背景与目的",
            "本章节描述产品背景和开发目的。",
            vec![
                section(
                    "section-2-1",
                    "2.1 产品/数据现状",
                    "当前TTPO需求助手已具备通过AI技术生成规范化的PRD功能能力，并支持从需求来源到集成逐步成功的验证及改进建议。然而，在PRD文档的评审环节仍有较高人工工作量，缺乏标准化评估流程和实时反馈机制。",
                ),
                with_image(
                    section(
                        "section-2-2",
                        "2.2 用户调研",
                        "用户场景描述过于简略，缺少极端情况和边缘案例的考虑。",
                    ),
                    "img-user-research",
                    "用户调研数据分析",
                    "/images/user-research.png",
                    "用户调研数据分析图表，展示用户对自动泊车功能的需求分布",
                    ImageKind::Other,
                ),
            ],
        ),
        chapter(
            "section-3",
            "三、功能需求",
            "本章节描述系统的功能需求。",
            vec![
                with_image(
                    section(
                        "section-3-1",
                        "3.1 功能描述",
                        "本功能模块主要实现对PRD文档的智能评审，包括但不限于以下几点：\n- PRD文档上传与解析功能\n- 基于行业知识库的内容评估\n- 问题识别与修改建议生成\n- 用户交互式评审流程",
                    ),
                    "img-system-architecture",
                    "系统架构图",
                    "/images/system-architecture.png",
                    "自动泊车系统架构图，展示系统各模块间的关系",
                    ImageKind::Architecture,
                ),
                section("section-3-2", "3.2 系统性能要求", "系统需要满足以下性能指标要求。"),
                with_image(
                    section(
                        "section-3-3",
                        "3.3 自动泊车流程",
                        "自动泊车系统的工作流程包括：\n1. 驾驶员激活自动泊车功能\n2. 系统扫描周围环境寻找可用车位\n3. 系统规划泊车路径\n4. 系统控制车辆执行泊车操作\n5. 泊车完成后系统自动停止",
                    ),
                    "img-parking-flow",
                    "自动泊车流程图",
                    "/images/parking-flow.png",
                    "自动泊车系统工作流程图，展示从激活到完成的全过程",
                    ImageKind::Flow,
                ),
                with_image(
                    section(
                        "section-3-4",
                        "3.4 用户交互设计",
                        "自动泊车系统的用户交互设计包括：\n1. 中控屏幕显示车位识别结果\n2. 提供泊车类型选择（平行、垂直、斜列）\n3. 实时显示泊车进度和周围障碍物\n4. 提供一键取消功能\n5. 语音提示引导用户操作",
                    ),
                    "img-ui-interaction",
                    "用户界面交互图",
                    "/images/ui-interaction.png",
                    "自动泊车系统用户界面交互设计图，展示各功能区域和操作流程",
                    ImageKind::Interaction,
                ),
            ],
        ),
        chapter(
            "section-4",
            "四、非功能需求",
            "本章节描述系统的非功能需求。",
            vec![
                section("section-4-1", "4.1 法规要求", "未明确提及智能驾驶相关的法规标准要求。"),
                section(
                    "section-4-2",
                    "4.2 安全性要求",
                    "自动泊车系统必须满足以下安全要求：\n1. 检测到移动障碍物时立即停止\n2. 提供紧急制动功能\n3. 系统故障时提供明确警告\n4. 防止误操作的安全机制",
                ),
                section("section-4-3", "4.3 可靠性要求", "系统在各种环境条件下的可靠性要求未详细说明。"),
            ],
        ),
    ]
}
