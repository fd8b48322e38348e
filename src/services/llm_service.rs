//! LLM 服务 - 业务能力层
//!
//! 只负责"让 LLM 出两道题"能力，不关心失败后的兜底
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型（兼容 OpenAI API 的服务均可）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, LlmError};

const SYSTEM_MESSAGE: &str =
    "You are an assistant that generates math questions in a strict tagging format.";

const QUESTION_PROMPT: &str = r#"Generate 2 unique math questions in the following strict format:

1. Each question should start with:
@title ...
@description ...
@question ...
@instruction ...
@difficulty ...
@Order ...
@option ...
@@option ... (the correct one)
@explanation ...
@subject ...
@unit ...
@topic ...
@plusmarks ...

2. The first question should be about combinatorics or probability.
3. The second question should be about geometry and include dimensions or volume.
4. Keep difficulty between easy and moderate.
"#;

/// LLM 服务
///
/// 职责：
/// - 发送固定的出题 prompt
/// - 把回复拆成两道题
/// - 不做兜底（由 workflow 决定）
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    ///
    /// 配置中没有 API 密钥时返回 `ConfigError::MissingApiKey`
    pub fn new(config: &Config) -> AppResult<Self> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.llm_api_base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
        })
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去除首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(AppError::llm_request_failed)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(AppError::llm_request_failed)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(AppError::llm_request_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let choice = response.choices.first().ok_or_else(|| LlmError::EmptyResponse {
            model: self.model_name.clone(),
        })?;

        let content = choice
            .message
            .content
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }

    /// 让 LLM 生成两道题
    ///
    /// # 返回
    /// (第一题, 第二题)，回复无法拆分时第二题为空字符串
    pub async fn generate_questions(&self) -> AppResult<(String, String)> {
        info!("🤖 正在请求 LLM 生成题目（模型: {}）...", self.model_name);

        let reply = self
            .send_to_llm(QUESTION_PROMPT, Some(SYSTEM_MESSAGE))
            .await?;

        let (first, second) = split_reply(&reply);
        if second.is_empty() {
            warn!("LLM 回复中没有找到空行分隔的第二题，整段回复作为第一题");
        }

        Ok((first, second))
    }
}

/// 按空行拆分 LLM 回复
///
/// 至少有两段时取前两段，否则返回 (整段回复, "")
pub fn split_reply(reply: &str) -> (String, String) {
    let content = reply.trim();
    let blocks: Vec<&str> = content.split("\n\n").collect();

    match blocks.as_slice() {
        [first, second, ..] => (first.to_string(), second.to_string()),
        _ => (reply.to_string(), String::new()),
    }
}
