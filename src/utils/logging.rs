/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::path::Path;
use tracing::info;

use crate::models::GenerationMode;

/// 记录程序启动信息
///
/// # 参数
/// - `mode`: 本次运行选择的生成模式
/// - `output_dir`: 输出目录
pub fn log_startup(mode: GenerationMode, output_dir: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 数学题目生成");
    match mode {
        GenerationMode::Llm => info!("✅ LLM 模式已启用（检测到 API 密钥）"),
        GenerationMode::Fallback => {
            info!("⚠ 兜底模式已启用（未找到 API 密钥），将生成随机示例题目")
        }
    }
    info!("📁 输出目录: {}", output_dir.display());
    info!("{}", "=".repeat(60));
}

/// 记录题目预览
///
/// # 参数
/// - `order`: 题目序号（从1开始）
/// - `text`: 题目全文
/// - `verbose`: 是否输出全文
pub fn log_question_preview(order: usize, text: &str, verbose: bool) {
    if verbose {
        info!("📝 第 {} 题:\n{}", order, text);
    } else {
        let first_line = text.lines().next().unwrap_or_default();
        info!("📝 第 {} 题: {}", order, truncate_text(first_line, 80));
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `mode`: 实际使用的生成模式
/// - `document_path`: 文档路径
/// - `diagram_path`: 图示路径
/// - `export_path`: TOML 导出路径（未导出时为 None）
pub fn print_final_summary(
    mode: GenerationMode,
    document_path: &Path,
    diagram_path: &Path,
    export_path: Option<&Path>,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🧠 题目来源: {}", mode);
    info!("🖼 图示: {}", diagram_path.display());
    if let Some(path) = export_path {
        info!("🗂 TOML 导出: {}", path.display());
    }
    info!("📄 题目已保存至: {}", document_path.display());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
