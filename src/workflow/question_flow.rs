//! 题目生成流程 - 流程层
//!
//! 核心职责：决定题目从哪里来
//!
//! 流程顺序：
//! 1. 有 API 密钥 → LLM 生成
//! 2. LLM 失败或没有密钥 → 本地模板兜底

use tracing::{info, warn};

use crate::config::Config;
use crate::models::{GenerationMode, TaggedQuestion};
use crate::services::{FallbackGenerator, LlmService};

/// 生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestions {
    /// 实际产出题目的模式（LLM 失败时为 Fallback）
    pub mode: GenerationMode,
    /// 组合计数 / 概率题
    pub first: String,
    /// 几何题
    pub second: String,
}

impl GeneratedQuestions {
    pub fn texts(&self) -> [&str; 2] {
        [self.first.as_str(), self.second.as_str()]
    }
}

/// 题目生成流程
///
/// - 编排 LLM 与兜底生成
/// - 所有 LLM 错误都在这里吞掉并降级
pub struct QuestionFlow {
    llm_service: Option<LlmService>,
    seed: Option<u64>,
}

impl QuestionFlow {
    /// 创建新的题目生成流程
    pub fn new(config: &Config) -> Self {
        let llm_service = match config.generation_mode() {
            GenerationMode::Llm => match LlmService::new(config) {
                Ok(service) => Some(service),
                Err(e) => {
                    warn!("⚠ 无法初始化 LLM 服务，使用兜底模式: {}", e);
                    None
                }
            },
            GenerationMode::Fallback => None,
        };

        Self {
            llm_service,
            seed: config.seed,
        }
    }

    /// 计划使用的模式
    pub fn planned_mode(&self) -> GenerationMode {
        if self.llm_service.is_some() {
            GenerationMode::Llm
        } else {
            GenerationMode::Fallback
        }
    }

    pub async fn run(&self) -> GeneratedQuestions {
        if let Some(llm_service) = &self.llm_service {
            match llm_service.generate_questions().await {
                Ok((first, second)) => {
                    info!("✓ LLM 生成题目成功");
                    check_questions(&[first.as_str(), second.as_str()]);
                    return GeneratedQuestions {
                        mode: GenerationMode::Llm,
                        first,
                        second,
                    };
                }
                Err(e) => {
                    warn!("⚠ LLM 生成题目失败: {}", e);
                }
            }
        }

        self.run_fallback()
    }

    fn run_fallback(&self) -> GeneratedQuestions {
        info!("🎲 使用本地模板生成题目...");
        let (first, second) = FallbackGenerator::new(self.seed).generate();

        GeneratedQuestions {
            mode: GenerationMode::Fallback,
            first,
            second,
        }
    }
}

/// 检查 LLM 产出的题目格式，只记录警告不中断流程
fn check_questions(texts: &[&str]) {
    for (i, text) in texts.iter().enumerate() {
        if text.trim().is_empty() {
            warn!("⚠ 第 {} 题为空", i + 1);
            continue;
        }
        let result = TaggedQuestion::parse(text).and_then(|q| q.validate());
        if let Err(e) = result {
            warn!("⚠ 第 {} 题格式不完整: {}", i + 1, e);
        }
    }
}
