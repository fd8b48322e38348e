//! 编排层（Orchestration Layer）
//!
//! 负责一次完整运行的调度：准备目录 → 生成题目 → 绘图 → 写文档 → 导出
//!
//! ```text
//! orchestrator::App
//!     ↓
//! workflow::QuestionFlow (LLM / 兜底)
//!     ↓
//! services (能力层：llm / fallback / diagram / document / export)
//! ```

pub mod app;

pub use app::{App, RunReport};
