//! 文档生成 - 业务能力层
//!
//! 把题目文本和图示写入 .docx 文件

use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rs::{BreakType, Docx, Paragraph, Pic, Run, Style, StyleType};
use tracing::{debug, info};

use crate::error::{AppError, AppResult, DocumentError};

pub const DOCUMENT_TITLE: &str = "Math Question Generation — Output";

/// 1 英寸 = 914400 EMU
const EMU_PER_INCH: f64 = 914_400.0;

const HEADING_STYLE_ID: &str = "Heading1";

/// 文档中的一个块
#[derive(Debug, Clone, PartialEq)]
pub enum DocBlock {
    /// 一级标题
    Heading(String),
    /// 段落，文本中的换行会变成段内换行
    Paragraph(String),
    /// 分页符
    PageBreak,
    /// 图片，宽度单位为英寸，高度按比例缩放
    Picture { path: PathBuf, width_inches: f64 },
}

/// 题目文档
///
/// 先按顺序收集内容块，`save` 时一次性生成 docx
#[derive(Debug, Default)]
pub struct QuizDocument {
    blocks: Vec<DocBlock>,
}

impl QuizDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(DocBlock::Heading(text.into()));
        self
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(DocBlock::Paragraph(text.into()));
        self
    }

    pub fn add_page_break(&mut self) -> &mut Self {
        self.blocks.push(DocBlock::PageBreak);
        self
    }

    pub fn add_picture(&mut self, path: impl Into<PathBuf>, width_inches: f64) -> &mut Self {
        self.blocks.push(DocBlock::Picture {
            path: path.into(),
            width_inches,
        });
        self
    }

    pub fn blocks(&self) -> &[DocBlock] {
        &self.blocks
    }

    /// 生成 docx 并保存
    ///
    /// # 参数
    /// - `path`: 文档保存路径
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let docx = self.to_docx()?;

        let file = File::create(path)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        docx.build().pack(file).map_err(|e| DocumentError::PackFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        info!("📄 文档已保存: {}", path.display());
        Ok(())
    }

    fn to_docx(&self) -> AppResult<Docx> {
        let heading_style = Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold();

        let mut docx = Docx::new().add_style(heading_style);

        for block in &self.blocks {
            docx = match block {
                DocBlock::Heading(text) => docx.add_paragraph(
                    Paragraph::new()
                        .style(HEADING_STYLE_ID)
                        .add_run(text_run(text)),
                ),
                DocBlock::Paragraph(text) => docx.add_paragraph(Paragraph::new().add_run(text_run(text))),
                DocBlock::PageBreak => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
                }
                DocBlock::Picture { path, width_inches } => {
                    let pic = load_picture(path, *width_inches)?;
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_image(pic)))
                }
            };
        }

        Ok(docx)
    }
}

/// 把多行文本转换成带段内换行的 Run
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }
    run
}

/// 读取图片并按给定宽度计算 EMU 尺寸
fn load_picture(path: &Path, width_inches: f64) -> AppResult<Pic> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let (width_px, height_px) = image::image_dimensions(path).map_err(|e| {
        DocumentError::PictureFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        }
    })?;

    let (width_emu, height_emu) = picture_size_emu(width_px, height_px, width_inches);
    debug!(
        "嵌入图片 {} ({}x{} px -> {}x{} EMU)",
        path.display(),
        width_px,
        height_px,
        width_emu,
        height_emu
    );

    Ok(Pic::new(&bytes).size(width_emu, height_emu))
}

/// 固定宽度、按像素比例计算高度
pub fn picture_size_emu(width_px: u32, height_px: u32, width_inches: f64) -> (u32, u32) {
    let width_emu = width_inches * EMU_PER_INCH;
    let height_emu = if width_px == 0 {
        0.0
    } else {
        width_emu * f64::from(height_px) / f64::from(width_px)
    };
    (width_emu.round() as u32, height_emu.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picture_size_keeps_aspect_ratio() {
        assert_eq!(picture_size_emu(800, 300, 4.0), (3_657_600, 1_371_600));
        assert_eq!(picture_size_emu(100, 100, 1.0), (914_400, 914_400));
        assert_eq!(picture_size_emu(0, 10, 1.0), (914_400, 0));
    }

    #[test]
    fn test_blocks_keep_insertion_order() {
        let mut doc = QuizDocument::new();
        doc.add_heading(DOCUMENT_TITLE)
            .add_paragraph("q1")
            .add_page_break()
            .add_paragraph("q2");

        assert_eq!(
            doc.blocks(),
            &[
                DocBlock::Heading(DOCUMENT_TITLE.to_string()),
                DocBlock::Paragraph("q1".to_string()),
                DocBlock::PageBreak,
                DocBlock::Paragraph("q2".to_string()),
            ]
        );
    }

    /// 读回 docx 中的顶层段落：(段落文本, 是否含分页符, 段落 JSON)
    ///
    /// 段内换行还原为 `\n`
    fn read_paragraphs(path: &Path) -> Vec<(String, bool, String)> {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"PK"), "docx 应该是 zip 格式");

        let docx = docx_rs::read_docx(&bytes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&docx.json()).unwrap();

        value["document"]["children"]
            .as_array()
            .expect("文档应该有 children")
            .iter()
            .map(|child| {
                let mut text = String::new();
                let mut page_break = false;
                collect_text(child, &mut text, &mut page_break);
                (text, page_break, child.to_string())
            })
            .collect()
    }

    fn collect_text(value: &serde_json::Value, text: &mut String, page_break: &mut bool) {
        match value {
            serde_json::Value::Array(items) => {
                for item in items {
                    collect_text(item, text, page_break);
                }
            }
            serde_json::Value::Object(map) => {
                match (map.get("type").and_then(|t| t.as_str()), map.get("data")) {
                    (Some("text"), Some(data)) => {
                        text.push_str(data["text"].as_str().unwrap_or_default())
                    }
                    (Some("break"), Some(data)) => {
                        if data["breakType"] == "page" {
                            *page_break = true;
                        } else {
                            text.push('\n');
                        }
                    }
                    _ => {
                        for item in map.values() {
                            collect_text(item, text, page_break);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    #[test]
    fn test_saved_document_content() {
        let dir = tempfile::tempdir().unwrap();
        let img_path = dir.path().join("pic.png");
        image::RgbImage::from_pixel(800, 300, image::Rgb([0, 0, 0]))
            .save(&img_path)
            .unwrap();

        let first = "@title One\n@question Q1\n\n@@option 12";
        let mut doc = QuizDocument::new();
        doc.add_heading(DOCUMENT_TITLE)
            .add_paragraph(first)
            .add_page_break()
            .add_paragraph("@title Two")
            .add_paragraph("\nDiagram:")
            .add_picture(&img_path, 4.0);

        let out = dir.path().join("out.docx");
        doc.save(&out).unwrap();

        let paragraphs = read_paragraphs(&out);
        let texts: Vec<&str> = paragraphs.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(
            texts,
            vec![DOCUMENT_TITLE, first, "", "@title Two", "\nDiagram:", ""]
        );

        // 只有第三段是分页符
        let breaks: Vec<bool> = paragraphs.iter().map(|(_, b, _)| *b).collect();
        assert_eq!(breaks, vec![false, false, true, false, false, false]);

        assert!(paragraphs[0].2.contains(HEADING_STYLE_ID), "标题段落应使用 Heading1 样式");
        assert!(!paragraphs[1].2.contains(HEADING_STYLE_ID));

        let picture = &paragraphs[5].2;
        assert!(picture.contains("3657600"), "图片宽度应为 4 英寸");
        assert!(picture.contains("1371600"), "图片高度应按比例缩放");
    }

    #[test]
    fn test_save_fails_on_missing_picture() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = QuizDocument::new();
        doc.add_picture(dir.path().join("nope.png"), 4.0);

        let err = doc.save(&dir.path().join("out.docx")).unwrap_err();
        assert!(matches!(err, AppError::File(_)));
    }
}
