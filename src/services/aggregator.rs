//! 共识聚合与答案校验服务 - 业务能力层
//!
//! 只负责"多次调用的字母 → 单一决策"与"字母 → 是否有效"两项能力

use std::collections::BTreeMap;

use crate::models::{AggregateDecision, Letter, PassResult};

/// 共识聚合服务
///
/// 职责：
/// - 丢弃失败调用，对成功提取的字母做多数投票
/// - 置信度 = 胜出票数 / 成功票数
/// - 共识 = 胜出票数 ≥ 配置的下限
/// - 投票与调用顺序无关
pub struct ConsensusAggregator {
    /// 达成共识所需的最低票数
    min_consensus: usize,
}

impl ConsensusAggregator {
    /// 创建新的共识聚合服务
    pub fn new(min_consensus: usize) -> Self {
        Self { min_consensus }
    }

    /// 聚合全部调用结果
    ///
    /// 无任何成功字母时返回弃权决策
    /// (None, 置信度 0, 空分布, 无共识)。
    pub fn aggregate(&self, results: &[PassResult]) -> AggregateDecision {
        // 丢弃失败调用与提取失败，只留成功字母
        let letters: Vec<Letter> = results.iter().filter_map(|pass| pass.letter).collect();

        if letters.is_empty() {
            return AggregateDecision::abstain();
        }

        // 字母 → 票数直方图（BTreeMap 保证遍历顺序为字母序）
        let mut distribution: BTreeMap<Letter, usize> = BTreeMap::new();
        for letter in &letters {
            *distribution.entry(*letter).or_insert(0) += 1;
        }

        // 票数最高者胜出；并列时取字典序最小的字母。
        // 并列规则是显式约定：按字母序遍历且仅在票数严格更高时更新，
        // 保证结果与插入顺序无关。
        let mut winner = None;
        let mut winning_count = 0usize;
        for (letter, count) in &distribution {
            if *count > winning_count {
                winner = Some(*letter);
                winning_count = *count;
            }
        }

        let successful = letters.len();
        AggregateDecision {
            decision: winner,
            confidence: winning_count as f64 / successful as f64,
            distribution,
            consensus_reached: winning_count >= self.min_consensus,
        }
    }
}

/// 答案校验服务
///
/// 字母有效当且仅当它属于 A..E 且零基索引落在
/// 非空备选项数量之内（题目可能不足 5 个可用备选项）。
/// 无效字母在聚合之后、计分之前降级为"未作答"。
pub struct ResponseValidator;

impl ResponseValidator {
    /// 创建新的答案校验服务
    pub fn new() -> Self {
        Self
    }

    /// 校验字母是否能索引到有效备选项
    pub fn validate(&self, letter: Letter, alternatives: &[String]) -> bool {
        let usable = alternatives
            .iter()
            .filter(|alternative| !alternative.trim().is_empty())
            .count();
        letter.index() < usable
    }
}

impl Default for ResponseValidator {
    fn default() -> Self {
        Self::new()
    }
}
