//! 题目解析流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整解析流程
//!
//! 流程顺序：
//! 1. 难度分数 → 层级
//! 2. (层级, 领域, 主题, 图形类别) → 指令文本
//! 3. N 次独立推理调用 + 逐次答案提取
//! 4. 多数投票聚合
//! 5. 答案校验（越界字母降级为未作答）
//! 6. 产出评测记录
//!
//! 错误不跨题目边界：单题最坏的结果是一条未作答记录。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{EvaluationRecord, Letter, Question};
use crate::services::{
    AnswerExtractor, CompletionGateway, ConsensusAggregator, DifficultyClassifier,
    DifficultyThresholds, ExampleBank, FigureClassifier, InferenceRunner, PromptBuilder,
    ResponseValidator,
};
use crate::workflow::question_ctx::QuestionCtx;

/// 题目解析流程
///
/// 职责：
/// - 编排单个题目从分类到记录的完整流程
/// - 只依赖业务能力（services），不持有外部资源
/// - 组件均为只读状态，可在题目之间无锁复用
pub struct QuestionFlow {
    difficulty: DifficultyClassifier,
    figure: FigureClassifier,
    prompt_builder: PromptBuilder,
    runner: InferenceRunner,
    aggregator: ConsensusAggregator,
    validator: ResponseValidator,
    verbose_logging: bool,
}

impl QuestionFlow {
    /// 创建新的题目解析流程
    pub fn new(config: &Config, gateway: Arc<dyn CompletionGateway>) -> Result<Self> {
        let extractor =
            AnswerExtractor::new(config.extract_tail_chars, config.extract_tail_tokens)?;

        Ok(Self {
            difficulty: DifficultyClassifier::new(DifficultyThresholds::default()),
            figure: FigureClassifier::new(),
            prompt_builder: PromptBuilder::new(ExampleBank::new()),
            runner: InferenceRunner::new(
                gateway,
                extractor,
                config.n_passes,
                Duration::from_millis(config.pass_delay_ms),
            ),
            aggregator: ConsensusAggregator::new(config.min_consensus()),
            validator: ResponseValidator::new(),
            verbose_logging: config.verbose_logging,
        })
    }

    /// 解析单个题目，产出评测记录
    ///
    /// 本方法不返回错误：服务错误已在推理层折算为失败调用，
    /// 全部失败时产出未作答记录。
    pub async fn run(
        &self,
        question: &Question,
        ground_truth: Letter,
        ctx: &QuestionCtx,
    ) -> EvaluationRecord {
        self.log_prompt_preview(ctx, &question.prompt);

        // ========== 流程 1: 难度分类 ==========
        let tier = self.difficulty.classify(question.difficulty);

        // ========== 流程 2: 图形分类 + 指令组装 ==========
        let figure_kind = self.figure.classify(&question.caption_text());
        let instruction =
            self.prompt_builder
                .build(tier, question.area, &question.topic, figure_kind);

        if self.verbose_logging {
            debug!(
                "{} 层级: {} | 图形: {:?} | 指令长度: {} 字符",
                ctx,
                tier,
                figure_kind,
                instruction.len()
            );
        }

        // ========== 流程 3: N 次独立推理 ==========
        let results = self.runner.resolve(&instruction, question).await;
        let failed_passes = results.iter().filter(|pass| pass.is_failed()).count();

        if failed_passes > 0 {
            warn!(
                "{} ⚠️ {}/{} 次调用失败",
                ctx,
                failed_passes,
                results.len()
            );
        }

        // ========== 流程 4: 多数投票聚合 ==========
        let decision = self.aggregator.aggregate(&results);

        // ========== 流程 5: 答案校验 ==========
        // 语法上合法但索引越界的字母在此降级为未作答
        let predicted = match decision.decision {
            Some(letter) if self.validator.validate(letter, &question.alternatives) => {
                Some(letter)
            }
            Some(letter) => {
                warn!(
                    "{} ⚠️ 字母 {} 越过可用备选项范围，降级为未作答",
                    ctx, letter
                );
                None
            }
            None => None,
        };

        // ========== 流程 6: 产出记录 ==========
        let correct = predicted == Some(ground_truth);

        self.log_outcome(ctx, predicted, ground_truth, correct, decision.confidence);

        EvaluationRecord {
            question_id: question.id.clone(),
            area: question.area,
            topic: question.topic.clone(),
            tier,
            predicted,
            ground_truth,
            correct,
            confidence: decision.confidence,
            consensus_reached: decision.consensus_reached,
            failed_passes,
        }
    }

    // ========== 日志辅助方法 ==========

    /// 显示题干预览
    fn log_prompt_preview(&self, ctx: &QuestionCtx, prompt: &str) {
        let preview = if prompt.chars().count() > 80 {
            prompt.chars().take(80).collect::<String>() + "..."
        } else {
            prompt.to_string()
        };
        info!("{} 题干: {}", ctx, preview);
    }

    /// 显示解析结果
    fn log_outcome(
        &self,
        ctx: &QuestionCtx,
        predicted: Option<Letter>,
        ground_truth: Letter,
        correct: bool,
        confidence: f64,
    ) {
        match predicted {
            Some(letter) if correct => {
                info!(
                    "{} ✓ 预测 {} = 标准答案 {} (置信度: {:.2})",
                    ctx, letter, ground_truth, confidence
                );
            }
            Some(letter) => {
                info!(
                    "{} ✗ 预测 {} ≠ 标准答案 {} (置信度: {:.2})",
                    ctx, letter, ground_truth, confidence
                );
            }
            None => {
                info!("{} ✗ 未作答 (标准答案 {})", ctx, ground_truth);
            }
        }
    }
}
