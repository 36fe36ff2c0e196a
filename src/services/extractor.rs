//! 答案提取服务 - 业务能力层
//!
//! 只负责"模型自由文本 → 字母"的解析，不关心流程
//!
//! 按优先级顺序应用三条规则：
//! 1. 显式标记（RESPOSTA / ALTERNATIVA / GABARITO / LETRA），首个结构化命中生效
//! 2. 末尾若干字符内紧跟结束符 `) . :` 或文本结尾的字母，取最靠后的命中
//! 3. 末尾若干词逆序扫描，剥掉标点后等于 A–E 的独立词
//! 全部落空返回 None。扫描范围（字符数 / 词数）是配置常量，不是语言硬限制。

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::Letter;

/// 答案提取服务
pub struct AnswerExtractor {
    /// 规则 1 的标记模式，按优先级排列
    marker_patterns: Vec<Regex>,
    /// 规则 2 的结束符模式
    delimiter_pattern: Regex,
    /// 规则 2 扫描的末尾字符数
    tail_chars: usize,
    /// 规则 3 扫描的末尾词数
    tail_tokens: usize,
}

impl AnswerExtractor {
    /// 创建新的答案提取服务（编译一次全部正则）
    pub fn new(tail_chars: usize, tail_tokens: usize) -> Result<Self> {
        let markers = [
            r"(?i)RESPOSTA\s*[:：]?\s*\(?([A-E])\b",
            r"(?i)ALTERNATIVA\s*[:：]?\s*\(?([A-E])\b",
            r"(?i)GABARITO\s*[:：]?\s*\(?([A-E])\b",
            r"(?i)LETRA\s*[:：]?\s*\(?([A-E])\b",
        ];

        let marker_patterns = markers
            .iter()
            .map(|pattern| Regex::new(pattern).with_context(|| format!("无法编译标记模式: {}", pattern)))
            .collect::<Result<Vec<_>>>()?;

        // 字母前必须是非字母数字字符（或扫描窗口起点），避免把词尾字母当成答案
        let delimiter_pattern = Regex::new(r"(?i)(?:^|[^\p{L}\p{N}])([A-E])(?:[).:]|$)")
            .context("无法编译结束符模式")?;

        Ok(Self {
            marker_patterns,
            delimiter_pattern,
            tail_chars,
            tail_tokens,
        })
    }

    /// 自由文本 → 字母
    pub fn extract(&self, raw_text: &str) -> Option<Letter> {
        // ========== 规则 1: 显式标记 ==========
        for pattern in &self.marker_patterns {
            if let Some(captures) = pattern.captures(raw_text) {
                if let Some(group) = captures.get(1) {
                    if let Some(c) = group.as_str().chars().next() {
                        return Letter::from_char(c);
                    }
                }
            }
        }

        // ========== 规则 2: 末尾字符窗口内紧跟结束符的字母 ==========
        let chars: Vec<char> = raw_text.chars().collect();
        let start = chars.len().saturating_sub(self.tail_chars);
        let tail: String = chars[start..].iter().collect();

        let mut last_hit = None;
        for captures in self.delimiter_pattern.captures_iter(&tail) {
            if let Some(group) = captures.get(1) {
                last_hit = group.as_str().chars().next();
            }
        }
        if let Some(c) = last_hit {
            if let Some(letter) = Letter::from_char(c) {
                return Some(letter);
            }
        }

        // ========== 规则 3: 末尾词窗口逆序扫描独立字母 ==========
        for token in raw_text.split_whitespace().rev().take(self.tail_tokens) {
            let stripped = token.trim_matches(|c: char| !c.is_alphanumeric());
            let mut stripped_chars = stripped.chars();
            if let (Some(c), None) = (stripped_chars.next(), stripped_chars.next()) {
                if let Some(letter) = Letter::from_char(c) {
                    return Some(letter);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> AnswerExtractor {
        AnswerExtractor::new(200, 10).unwrap()
    }

    #[test]
    fn test_rule1_explicit_markers() {
        let extractor = extractor();
        assert_eq!(extractor.extract("RESPOSTA: C"), Some(Letter::C));
        assert_eq!(extractor.extract("resposta: b"), Some(Letter::B));
        assert_eq!(extractor.extract("GABARITO: E"), Some(Letter::E));
        assert_eq!(extractor.extract("A alternativa D é a única coerente."), Some(Letter::D));
        assert_eq!(extractor.extract("Portanto, letra A."), Some(Letter::A));
    }

    #[test]
    fn test_rule1_marker_does_not_match_word_prefix() {
        let extractor = extractor();
        // "correta" 以 c 开头，但 c 后紧跟字母，不构成标记命中；
        // 结尾的 "D." 由规则 2 捕获
        assert_eq!(
            extractor.extract("...portanto, a alternativa correta é D."),
            Some(Letter::D)
        );
    }

    #[test]
    fn test_rule2_trailing_delimiter() {
        let extractor = extractor();
        assert_eq!(
            extractor.extract("Analisando as opções, conclui-se que é (B)."),
            Some(Letter::B)
        );
        assert_eq!(extractor.extract("A resposta final deve ser C: veja acima"), Some(Letter::C));
    }

    #[test]
    fn test_rule3_standalone_token() {
        let extractor = extractor();
        assert_eq!(extractor.extract("blah blah E"), Some(Letter::E));
        assert_eq!(extractor.extract("depois de muita análise escolho \"d\""), Some(Letter::D));
    }

    #[test]
    fn test_no_letter_returns_none() {
        let extractor = extractor();
        assert_eq!(extractor.extract("no letter here"), None);
        assert_eq!(extractor.extract(""), None);
        assert_eq!(extractor.extract("resultado numérico: 42"), None);
    }

    #[test]
    fn test_marker_has_priority_over_tail() {
        let extractor = extractor();
        // 规则 1 的命中优先于末尾的孤立字母
        assert_eq!(
            extractor.extract("RESPOSTA: A\nobservação final: B"),
            Some(Letter::A)
        );
    }

    #[test]
    fn test_tail_window_is_configurable() {
        // 窗口缩小到 5 个字符后，距结尾较远的 "(B)." 不再被规则 2 看到；
        // 规则 3 的词窗口同样缩小到 1 个词
        let narrow = AnswerExtractor::new(5, 1).unwrap();
        assert_eq!(narrow.extract("é (B). mas não sei qual seria"), None);
    }
}
