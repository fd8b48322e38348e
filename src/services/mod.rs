pub mod diagram_renderer;
pub mod document_writer;
pub mod export_writer;
pub mod fallback_generator;
pub mod llm_service;

pub use diagram_renderer::DiagramRenderer;
pub use document_writer::{DocBlock, QuizDocument};
pub use export_writer::{ExportWriter, QuestionExport};
pub use fallback_generator::FallbackGenerator;
pub use llm_service::LlmService;
