//! # Math Question Gen
//!
//! 生成两道数学题（组合计数 + 几何），绘制示意图，并写入 docx 文档
//!
//! ## 架构设计
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `LlmService` - 调用 LLM 出题
//! - `FallbackGenerator` - 本地模板出题
//! - `DiagramRenderer` - 绘制球体俯视图
//! - `QuizDocument` - 生成 docx
//! - `ExportWriter` - 导出 TOML
//!
//! ### ② 流程层（Workflow）
//! - `QuestionFlow` - 有密钥走 LLM，失败或无密钥走兜底
//!
//! ### ③ 编排层（Orchestration）
//! - `App` - 目录准备、执行顺序、最终统计

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GenerationMode, TaggedQuestion};
pub use orchestrator::{App, RunReport};
pub use services::QuestionExport;
pub use workflow::{GeneratedQuestions, QuestionFlow};
