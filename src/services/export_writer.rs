//! TOML 导出 - 业务能力层
//!
//! 只负责把生成的题目写成 TOML 文件，方便后续批量导入题库

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, FileError};
use crate::models::{GenerationMode, TaggedQuestion};

/// 导出文件内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionExport {
    pub generated_at: String,
    pub mode: GenerationMode,
    pub questions: Vec<QuestionRecord>,
}

/// 单道题的导出记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 题目序号（从1开始）
    pub index: usize,
    /// 原始标签文本
    pub raw_text: String,
    /// 解析结果，无法解析时省略
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parsed: Option<TaggedQuestion>,
}

impl QuestionExport {
    /// 由原始题目文本构建导出内容，空文本跳过
    pub fn new(mode: GenerationMode, texts: &[&str]) -> Self {
        let questions = texts
            .iter()
            .filter(|text| !text.trim().is_empty())
            .enumerate()
            .map(|(i, text)| {
                let parsed = match TaggedQuestion::parse(text) {
                    Ok(q) => Some(q),
                    Err(e) => {
                        debug!("第 {} 题无法解析为标签格式: {}", i + 1, e);
                        None
                    }
                };
                QuestionRecord {
                    index: i + 1,
                    raw_text: text.to_string(),
                    parsed,
                }
            })
            .collect();

        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            mode,
            questions,
        }
    }
}

/// 导出写入服务
pub struct ExportWriter {
    export_path: PathBuf,
}

impl ExportWriter {
    pub fn new(export_path: impl Into<PathBuf>) -> Self {
        Self {
            export_path: export_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.export_path
    }

    /// 写入导出文件
    ///
    /// # 返回
    /// 返回写入的路径
    pub async fn write(&self, export: &QuestionExport) -> AppResult<PathBuf> {
        if export.questions.is_empty() {
            warn!("⚠ 没有可导出的题目");
        }

        let content = toml::to_string_pretty(export).map_err(|e| FileError::TomlSerializeFailed {
            source: Box::new(e),
        })?;

        tokio::fs::write(&self.export_path, content)
            .await
            .map_err(|e| AppError::file_write_failed(self.export_path.display().to_string(), e))?;

        debug!("TOML 导出完成: {}", self.export_path.display());
        Ok(self.export_path.clone())
    }
}
