use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 图示绘制错误
    #[error("绘图错误: {0}")]
    Render(#[from] RenderError),
    /// 文档生成错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建LLM请求失败: {source}")]
    RequestBuildFailed { source: BoxError },
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed { model: String, source: BoxError },
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed { path: String, source: BoxError },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed { path: String, source: BoxError },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed { path: String, source: BoxError },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {source}")]
    TomlSerializeFailed { source: BoxError },
}

/// 图示绘制错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 字体解析失败
    #[error("无法解析字体 ({path}): {source}")]
    FontParseFailed { path: String, source: BoxError },
    /// 保存图片失败
    #[error("保存图片失败 ({path}): {source}")]
    SaveFailed { path: String, source: BoxError },
}

/// 文档生成错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 图片无法嵌入文档
    #[error("无法嵌入图片 ({path}): {source}")]
    PictureFailed { path: String, source: BoxError },
    /// 打包 docx 失败
    #[error("保存文档失败 ({path}): {source}")]
    PackFailed { path: String, source: BoxError },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少 API 密钥
    #[error("LLM 模式需要 OPENAI_API_KEY")]
    MissingApiKey,
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM请求构建错误
    pub fn llm_request_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Llm(LlmError::RequestBuildFailed {
            source: Box::new(source),
        })
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建图片保存错误
    pub fn render_save_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Render(RenderError::SaveFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
