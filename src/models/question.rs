//! 标签格式题目
//!
//! 题目文本由 `@tag value` 行组成，`@@option` 表示正确选项：
//!
//! ```text
//! @title Packed Spheres
//! @question A rectangular box contains ...
//! @option 7
//! @@option 12
//! @plusmarks 1
//! ```

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 标签行：`@tag value` 或 `@@tag value`
static TAG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@@?)([A-Za-z]+)(?:\s+(.*))?$").expect("标签行正则无效")
});

/// 单个选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub correct: bool,
}

/// 解析后的标签格式题目
///
/// 字段顺序即 TOML 导出顺序，`options` 必须放在最后（数组表）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedQuestion {
    pub title: String,
    pub description: String,
    pub question: String,
    pub instruction: String,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub explanation: String,
    pub subject: String,
    pub unit: String,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plusmarks: Option<u32>,
    #[serde(default)]
    pub options: Vec<QuizOption>,
}

/// 当前正在填充的字段，用于处理跨行内容
#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Description,
    Question,
    Instruction,
    Difficulty,
    Explanation,
    Subject,
    Unit,
    Topic,
    Option(usize),
}

impl TaggedQuestion {
    /// 从标签格式文本解析题目
    ///
    /// - 标签名不区分大小写（`@Order` 与 `@order` 等价）
    /// - 不以 `@` 开头的行追加到上一个字段
    /// - 空行忽略，未知标签忽略
    ///
    /// # 返回
    /// 文本中一个标签都没有时返回错误
    pub fn parse(text: &str) -> Result<Self> {
        let mut question = TaggedQuestion::default();
        let mut current: Option<Field> = None;
        let mut tag_count = 0;

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(caps) = TAG_LINE.captures(line) else {
                if let Some(field) = current {
                    question.append(field, line);
                }
                continue;
            };

            tag_count += 1;
            let marker = caps.get(1).map_or("@", |m| m.as_str());
            let tag = caps.get(2).map_or("", |m| m.as_str()).to_ascii_lowercase();
            let value = caps.get(3).map_or("", |m| m.as_str()).trim().to_string();

            current = match tag.as_str() {
                "title" => Some(question.set(Field::Title, value)),
                "description" => Some(question.set(Field::Description, value)),
                "question" => Some(question.set(Field::Question, value)),
                "instruction" => Some(question.set(Field::Instruction, value)),
                "difficulty" => Some(question.set(Field::Difficulty, value)),
                "explanation" => Some(question.set(Field::Explanation, value)),
                "subject" => Some(question.set(Field::Subject, value)),
                "unit" => Some(question.set(Field::Unit, value)),
                "topic" => Some(question.set(Field::Topic, value)),
                "option" => {
                    question.options.push(QuizOption {
                        text: value,
                        correct: marker == "@@",
                    });
                    Some(Field::Option(question.options.len() - 1))
                }
                "order" => {
                    question.order = value.parse().ok();
                    None
                }
                "plusmarks" => {
                    question.plusmarks = value.parse().ok();
                    None
                }
                other => {
                    debug!("忽略未知标签: @{}", other);
                    None
                }
            };
        }

        if tag_count == 0 {
            anyhow::bail!("文本中没有找到任何标签");
        }

        Ok(question)
    }

    /// 所有标记为正确的选项
    pub fn correct_options(&self) -> Vec<&QuizOption> {
        self.options.iter().filter(|o| o.correct).collect()
    }

    /// 唯一的正确选项（正确选项数量不为 1 时返回 None）
    pub fn correct_option(&self) -> Option<&QuizOption> {
        match self.correct_options().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// 检查题目的基本一致性：有题干、恰好一个正确选项、选项不重复
    pub fn validate(&self) -> Result<()> {
        if self.question.is_empty() {
            anyhow::bail!("缺少 @question 题干");
        }

        let correct = self.correct_options().len();
        if correct != 1 {
            anyhow::bail!("正确选项数量应为 1，实际为 {}", correct);
        }

        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].iter().any(|o| o.text == option.text) {
                anyhow::bail!("选项重复: {}", option.text);
            }
        }

        Ok(())
    }

    fn set(&mut self, field: Field, value: String) -> Field {
        if let Some(slot) = self.slot(field) {
            *slot = value;
        }
        field
    }

    fn append(&mut self, field: Field, line: &str) {
        if let Some(slot) = self.slot(field) {
            if !slot.is_empty() {
                slot.push('\n');
            }
            slot.push_str(line);
        }
    }

    fn slot(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Question => &mut self.question,
            Field::Instruction => &mut self.instruction,
            Field::Difficulty => &mut self.difficulty,
            Field::Explanation => &mut self.explanation,
            Field::Subject => &mut self.subject,
            Field::Unit => &mut self.unit,
            Field::Topic => &mut self.topic,
            Field::Option(idx) => return self.options.get_mut(idx).map(|o| &mut o.text),
        })
    }
}
