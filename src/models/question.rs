use serde::{Deserialize, Serialize};

use crate::models::area::Area;
use crate::models::letter::Letter;

/// 考题数据结构
///
/// 备选项最多 5 个，第 0..4 个分别对应字母 A..E；
/// 题目可能只有不足 5 个可用备选项（空字符串视为不可用）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// 题目 ID
    pub id: String,

    /// 题目背景材料（可为空）
    #[serde(default)]
    pub context: String,

    /// 题干内容
    pub prompt: String,

    /// 备选项列表（≤5 个）
    pub alternatives: Vec<String>,

    /// 图片说明文字列表
    #[serde(default)]
    pub image_captions: Vec<String>,

    /// 领域标签
    pub area: Area,

    /// 主题标签（自由字符串）
    #[serde(default)]
    pub topic: String,

    /// IRT 难度分数（0.0 表示缺失）
    #[serde(default)]
    pub difficulty: f64,

    /// 标准答案（None 表示该题已被取消，无正确答案）
    pub ground_truth: Option<Letter>,
}

impl Question {
    /// 统计非空备选项数量
    ///
    /// 提取出的字母的索引必须落在非空备选项范围内才有效。
    pub fn usable_alternative_count(&self) -> usize {
        self.alternatives
            .iter()
            .filter(|alt| !alt.trim().is_empty())
            .count()
    }

    /// 将所有图片说明拼成一段文字（无图片时为空字符串）
    pub fn caption_text(&self) -> String {
        self.image_captions.join(" ")
    }

    /// 格式化题目文本块（背景材料 + 题干 + 带字母标签的备选项）
    ///
    /// 指令文本由提示词构建器单独生成，本方法只负责题目本身。
    pub fn format_block(&self) -> String {
        let mut block = String::new();

        if !self.context.trim().is_empty() {
            block.push_str("Texto de apoio:\n");
            block.push_str(self.context.trim());
            block.push_str("\n\n");
        }

        for caption in &self.image_captions {
            if !caption.trim().is_empty() {
                block.push_str("Descrição da figura: ");
                block.push_str(caption.trim());
                block.push('\n');
            }
        }
        if !self.image_captions.is_empty() {
            block.push('\n');
        }

        block.push_str("Questão:\n");
        block.push_str(self.prompt.trim());
        block.push_str("\n\nAlternativas:\n");

        for (index, alternative) in self.alternatives.iter().enumerate() {
            if let Some(letter) = Letter::from_index(index) {
                block.push_str(&format!("{}) {}\n", letter.as_char(), alternative.trim()));
            }
        }

        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            id: "q1".to_string(),
            context: "Contexto de exemplo.".to_string(),
            prompt: "Qual é o resultado de 2 + 2?".to_string(),
            alternatives: vec![
                "3".to_string(),
                "4".to_string(),
                "5".to_string(),
                "6".to_string(),
                "".to_string(),
            ],
            image_captions: vec![],
            area: Area::Mathematics,
            topic: "operações".to_string(),
            difficulty: 450.0,
            ground_truth: Some(Letter::B),
        }
    }

    #[test]
    fn test_usable_alternative_count() {
        let question = sample_question();
        // 最后一个备选项为空，不计入
        assert_eq!(question.usable_alternative_count(), 4);
    }

    #[test]
    fn test_format_block_labels() {
        let block = sample_question().format_block();
        assert!(block.contains("Texto de apoio:"));
        assert!(block.contains("A) 3"));
        assert!(block.contains("D) 6"));
        assert!(block.contains("Qual é o resultado de 2 + 2?"));
    }
}
