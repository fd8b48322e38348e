use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::models::GenerationMode;
use crate::services::document_writer::DOCUMENT_TITLE;
use crate::services::{DiagramRenderer, ExportWriter, QuestionExport, QuizDocument};
use crate::utils::logging::{log_question_preview, log_startup, print_final_summary};
use crate::workflow::{GeneratedQuestions, QuestionFlow};

/// 图片在文档中的宽度（英寸）
const DIAGRAM_WIDTH_INCHES: f64 = 4.0;

/// 一次运行的产出
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: GenerationMode,
    pub document_path: PathBuf,
    pub diagram_path: PathBuf,
    pub export_path: Option<PathBuf>,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: QuestionFlow,
}

impl App {
    /// 初始化应用：创建输出目录，选择生成模式
    pub async fn initialize(config: Config) -> Result<Self> {
        let flow = QuestionFlow::new(&config);
        log_startup(flow.planned_mode(), &config.output_dir);

        for dir in [config.output_dir.clone(), config.images_dir()] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| AppError::create_dir_failed(dir.display().to_string(), e))?;
        }

        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunReport> {
        let generated = self.flow.run().await;
        for (i, text) in generated.texts().iter().enumerate() {
            log_question_preview(i + 1, text, self.config.verbose_logging);
        }

        let diagram_path = DiagramRenderer::new(&self.config)
            .render(&self.config.diagram_path())
            .context("绘制图示失败")?;

        let document_path = self.config.document_path();
        build_document(&generated, &diagram_path)
            .save(&document_path)
            .context("保存文档失败")?;

        let export_path = if self.config.export_toml {
            let export = QuestionExport::new(generated.mode, &generated.texts());
            let path = ExportWriter::new(self.config.export_path())
                .write(&export)
                .await
                .context("导出 TOML 失败")?;
            Some(path)
        } else {
            info!("已关闭 TOML 导出");
            None
        };

        print_final_summary(
            generated.mode,
            &document_path,
            &diagram_path,
            export_path.as_deref(),
        );

        Ok(RunReport {
            mode: generated.mode,
            document_path,
            diagram_path,
            export_path,
        })
    }
}

/// 组装文档：标题、第一题、分页、第二题、图示
fn build_document(generated: &GeneratedQuestions, diagram_path: &std::path::Path) -> QuizDocument {
    let mut doc = QuizDocument::new();
    doc.add_heading(DOCUMENT_TITLE)
        .add_paragraph(generated.first.as_str())
        .add_page_break()
        .add_paragraph(generated.second.as_str())
        .add_paragraph("\nDiagram:")
        .add_picture(diagram_path, DIAGRAM_WIDTH_INCHES);
    doc
}
