//! 题目处理上下文
//!
//! 封装"我正在处理第几道题"这一信息

use std::fmt::Display;

use crate::models::Area;

/// 题目处理上下文
///
/// 包含处理单个题目所需的上下文信息
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 题目序号（从 1 开始，仅用于日志显示）
    pub ordinal: usize,

    /// 题目 ID
    pub question_id: String,

    /// 领域
    pub area: Area,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(ordinal: usize, question_id: String, area: Area) -> Self {
        Self {
            ordinal,
            question_id,
            area,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[题目 #{} ID#{} 领域#{}]",
            self.ordinal, self.question_id, self.area
        )
    }
}
