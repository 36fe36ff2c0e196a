//! 自洽推理执行服务 - 业务能力层
//!
//! 只负责"同一题发起 N 次独立调用"能力，不关心流程
//!
//! 每次调用单独包裹：服务错误记为失败调用，不中断剩余调用，
//! 更不中断当前题目。本层不做重试（重试统一在网关实现内部）。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::models::{PassResult, Question};
use crate::services::extractor::AnswerExtractor;
use crate::services::gateway::CompletionGateway;

/// 自洽推理执行服务
///
/// 职责：
/// - 对同一条指令 + 题目发起 n_passes 次无状态补全调用
/// - 低温采样保证各次调用间有多样性（自洽投票的前提）
/// - 相邻调用之间加固定短延迟（对外部服务的礼貌，不影响正确性）
/// - 每次成功调用后立即做答案提取
pub struct InferenceRunner {
    gateway: Arc<dyn CompletionGateway>,
    extractor: AnswerExtractor,
    n_passes: usize,
    pass_delay: Duration,
}

impl InferenceRunner {
    /// 创建新的推理执行服务
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        extractor: AnswerExtractor,
        n_passes: usize,
        pass_delay: Duration,
    ) -> Self {
        Self {
            gateway,
            extractor,
            n_passes,
            pass_delay,
        }
    }

    /// 对单个题目执行全部推理调用
    ///
    /// # 参数
    /// - `instruction`: 已组装好的指令文本（作为系统消息）
    /// - `question`: 题目（题目块在本方法内格式化一次，各次调用复用）
    ///
    /// # 返回
    /// 每次调用一条 PassResult；本方法不返回错误 ——
    /// 所有服务错误都被折算成失败调用。
    pub async fn resolve(&self, instruction: &str, question: &Question) -> Vec<PassResult> {
        let question_block = question.format_block();
        let mut results = Vec::with_capacity(self.n_passes);

        for pass_index in 0..self.n_passes {
            if pass_index > 0 && !self.pass_delay.is_zero() {
                sleep(self.pass_delay).await;
            }

            match self
                .gateway
                .complete(Some(instruction), &question_block)
                .await
            {
                Ok(raw_text) => {
                    let letter = self.extractor.extract(&raw_text);
                    if letter.is_none() {
                        debug!(
                            "第 {} 次调用未能提取字母 (题目: {})",
                            pass_index + 1,
                            question.id
                        );
                    }
                    results.push(PassResult::success(pass_index, raw_text, letter));
                }
                Err(e) => {
                    // 单次失败不中断剩余调用
                    warn!(
                        "第 {} 次调用失败 (题目: {}): {}",
                        pass_index + 1,
                        question.id,
                        e
                    );
                    results.push(PassResult::failed(pass_index, e.to_string()));
                }
            }
        }

        results
    }

    /// 本次配置的调用次数
    pub fn n_passes(&self) -> usize {
        self.n_passes
    }
}
