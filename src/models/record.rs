use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::area::Area;
use crate::models::letter::Letter;
use crate::models::tier::Tier;

/// 单次推理结果
///
/// 每次独立调用产生一条，只在单个题目的解析过程中存活。
#[derive(Debug, Clone)]
pub struct PassResult {
    /// 调用序号（从 0 开始）
    pub pass_index: usize,
    /// 模型原始输出（调用成功时）
    pub raw_text: Option<String>,
    /// 错误描述（调用失败时）
    pub error: Option<String>,
    /// 提取出的字母（调用失败或提取失败时为 None）
    pub letter: Option<Letter>,
}

impl PassResult {
    /// 创建成功调用的结果
    pub fn success(pass_index: usize, raw_text: String, letter: Option<Letter>) -> Self {
        Self {
            pass_index,
            raw_text: Some(raw_text),
            error: None,
            letter,
        }
    }

    /// 创建失败调用的结果
    pub fn failed(pass_index: usize, error: String) -> Self {
        Self {
            pass_index,
            raw_text: None,
            error: Some(error),
            letter: None,
        }
    }

    /// 调用本身是否失败（区别于提取失败）
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// 多数投票的聚合决策
///
/// 仅由成功调用的字母集合推导，折算进评测记录后即被丢弃。
#[derive(Debug, Clone)]
pub struct AggregateDecision {
    /// 最终字母（无任何成功字母时为 None）
    pub decision: Option<Letter>,
    /// 置信度 ∈ [0,1]：胜出票数 / 成功票数
    pub confidence: f64,
    /// 字母 → 票数分布
    pub distribution: BTreeMap<Letter, usize>,
    /// 胜出票数是否达到共识下限
    pub consensus_reached: bool,
}

impl AggregateDecision {
    /// 无任何成功字母时的弃权决策
    pub fn abstain() -> Self {
        Self {
            decision: None,
            confidence: 0.0,
            distribution: BTreeMap::new(),
            consensus_reached: false,
        }
    }
}

/// 单题评测记录
///
/// 创建后不再修改，由报表器累积。
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    /// 题目 ID
    pub question_id: String,
    /// 领域
    pub area: Area,
    /// 主题
    pub topic: String,
    /// 难度层级
    pub tier: Tier,
    /// 预测字母（校验失败或弃权时为 None）
    pub predicted: Option<Letter>,
    /// 标准答案
    pub ground_truth: Letter,
    /// 是否答对
    pub correct: bool,
    /// 置信度
    pub confidence: f64,
    /// 是否达成共识
    pub consensus_reached: bool,
    /// 失败的调用次数（服务错误，不含提取失败）
    pub failed_passes: usize,
}
