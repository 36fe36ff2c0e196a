use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, DataError};
use crate::models::area::Area;
use crate::models::letter::Letter;
use crate::models::question::Question;

/// 数据集原始记录
///
/// 每行一条 JSON 记录，字段与 Question 基本对应，
/// 但标签和领域以原始字符串形式出现，需要校验转换。
#[derive(Debug, Deserialize)]
pub struct RawQuestionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub context: String,
    pub prompt: String,
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub image_captions: Vec<String>,
    pub area: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: f64,
    #[serde(default)]
    pub label: String,
}

impl RawQuestionRecord {
    /// 校验并转换为 Question
    pub fn into_question(self) -> Result<Question> {
        if self.alternatives.len() > 5 {
            return Err(AppError::Data(DataError::TooManyAlternatives {
                question_id: self.id.clone(),
                count: self.alternatives.len(),
            })
            .into());
        }

        let area = Area::find(&self.area)
            .with_context(|| format!("无法解析领域标签: {} (题目: {})", self.area, self.id))?;

        // 标签为 A..E 之一；"ANULADO" 或空表示该题已取消
        let ground_truth = parse_label(&self.label)
            .with_context(|| format!("无法解析标准答案: {} (题目: {})", self.label, self.id))?;

        // 标准答案必须落在非空备选项范围内（与固定的 A–E 标签空间无关）
        if let Some(letter) = ground_truth {
            let usable = self
                .alternatives
                .iter()
                .filter(|alternative| !alternative.trim().is_empty())
                .count();
            if letter.index() >= usable {
                anyhow::bail!(
                    "标准答案 {} 越过 {} 个非空备选项 (题目: {})",
                    letter,
                    usable,
                    self.id
                );
            }
        }

        Ok(Question {
            id: self.id,
            context: self.context,
            prompt: self.prompt,
            alternatives: self.alternatives,
            image_captions: self.image_captions,
            area,
            topic: self.topic,
            difficulty: self.difficulty,
            ground_truth,
        })
    }
}

/// 解析标准答案标签
///
/// 返回 Ok(None) 表示该题被取消（无正确答案）。
fn parse_label(label: &str) -> Result<Option<Letter>> {
    let trimmed = label.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("anulado") {
        return Ok(None);
    }

    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(letter) = Letter::from_char(c) {
            return Ok(Some(letter));
        }
    }

    anyhow::bail!("标签不是 A..E 或 ANULADO: {}", trimmed)
}

/// 从 JSONL 文件加载数据集
///
/// 每行一条记录；解析失败的行记录警告后跳过，不中断加载。
pub async fn load_jsonl_dataset(path: &str) -> Result<Vec<Question>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取数据集文件: {}", path))?;

    let mut questions = Vec::new();
    let mut skipped = 0usize;

    for (line_index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<RawQuestionRecord>(line) {
            Ok(raw) => match raw.into_question() {
                Ok(question) => questions.push(question),
                Err(e) => {
                    warn!("第 {} 行记录无效，已跳过: {}", line_index + 1, e);
                    skipped += 1;
                }
            },
            Err(e) => {
                warn!("第 {} 行 JSON 解析失败，已跳过: {}", line_index + 1, e);
                skipped += 1;
            }
        }
    }

    info!("成功加载 {} 道题目，跳过 {} 条无效记录", questions.len(), skipped);

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("C").unwrap(), Some(Letter::C));
        assert_eq!(parse_label("e").unwrap(), Some(Letter::E));
        assert_eq!(parse_label("ANULADO").unwrap(), None);
        assert_eq!(parse_label("").unwrap(), None);
        assert!(parse_label("F").is_err());
        assert!(parse_label("AB").is_err());
    }

    #[test]
    fn test_into_question_rejects_six_alternatives() {
        let raw = RawQuestionRecord {
            id: "q1".to_string(),
            context: String::new(),
            prompt: "p".to_string(),
            alternatives: vec!["1".to_string(); 6],
            image_captions: vec![],
            area: "matematica".to_string(),
            topic: String::new(),
            difficulty: 0.0,
            label: "A".to_string(),
        };
        assert!(raw.into_question().is_err());
    }

    #[test]
    fn test_into_question_rejects_label_past_usable_alternatives() {
        let raw = RawQuestionRecord {
            id: "q1".to_string(),
            context: String::new(),
            prompt: "p".to_string(),
            alternatives: vec![
                "um".to_string(),
                "dois".to_string(),
                "três".to_string(),
                "quatro".to_string(),
                "".to_string(),
            ],
            image_captions: vec![],
            area: "matematica".to_string(),
            topic: String::new(),
            difficulty: 0.0,
            label: "E".to_string(),
        };
        assert!(raw.into_question().is_err());
    }

    #[test]
    fn test_into_question_parses_record() {
        let line = r#"{"id":"2019-42","prompt":"Quanto é 1+1?","alternatives":["1","2","3","4","5"],"area":"matematica","topic":"operações","difficulty":512.3,"label":"B"}"#;
        let raw: RawQuestionRecord = serde_json::from_str(line).unwrap();
        let question = raw.into_question().unwrap();
        assert_eq!(question.ground_truth, Some(Letter::B));
        assert_eq!(question.area, Area::Mathematics);
        assert_eq!(question.difficulty, 512.3);
    }
}
