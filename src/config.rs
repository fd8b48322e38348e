use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::models::GenerationMode;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    /// OpenAI API 密钥，为空时使用本地兜底生成
    pub openai_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    // --- 输出配置 ---
    /// 输出目录（图片放在其下的 images/ 子目录）
    pub output_dir: PathBuf,
    /// 图示说明文字使用的 TrueType 字体
    pub font_path: PathBuf,
    /// 是否额外导出 TOML 题目文件
    pub export_toml: bool,
    /// 随机种子（不设置则每次生成不同题目）
    pub seed: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.7,
            output_dir: PathBuf::from("output"),
            font_path: PathBuf::from("DejaVuSans.ttf"),
            export_toml: true,
            seed: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            llm_api_base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: parse_env("LLM_TEMPERATURE", default.llm_temperature),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            font_path: std::env::var("DIAGRAM_FONT_PATH").map(PathBuf::from).unwrap_or(default.font_path),
            export_toml: parse_env("EXPORT_TOML", default.export_toml),
            seed: std::env::var("QUIZ_SEED").ok().and_then(|v| match v.parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!("环境变量 QUIZ_SEED 的值 '{}' 不是有效的 u64，忽略", v);
                    None
                }
            }),
            verbose_logging: parse_env("VERBOSE_LOGGING", default.verbose_logging),
        }
    }

    /// 根据是否存在 API 密钥决定生成模式
    pub fn generation_mode(&self) -> GenerationMode {
        match &self.openai_api_key {
            Some(key) if !key.trim().is_empty() => GenerationMode::Llm,
            _ => GenerationMode::Fallback,
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join("images")
    }

    pub fn diagram_path(&self) -> PathBuf {
        self.images_dir().join("packed_spheres_diagram.png")
    }

    pub fn document_path(&self) -> PathBuf {
        self.output_dir.join("questions_output_with_diagram.docx")
    }

    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join("questions_output.toml")
    }
}

/// 读取并解析环境变量，解析失败时记录警告并使用默认值
fn parse_env<T: FromStr + Copy>(var_name: &str, default: T) -> T {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("环境变量 {} 的值 '{}' 无法解析，使用默认值", var_name, value);
            default
        }),
        Err(_) => default,
    }
}
