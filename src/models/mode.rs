use serde::{Deserialize, Serialize};

/// 题目生成模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// 调用 LLM API 生成
    Llm,
    /// 本地随机模板生成
    Fallback,
}

impl GenerationMode {
    /// 获取显示名称
    pub fn name(self) -> &'static str {
        match self {
            GenerationMode::Llm => "LLM 模式",
            GenerationMode::Fallback => "兜底模式",
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
