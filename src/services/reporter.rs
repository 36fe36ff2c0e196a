//! 评测报表服务 - 业务能力层
//!
//! 只负责"评测记录 → 汇总报告"的累积，不关心流程
//!
//! 纯增量累积：每条记录进来时更新计数器，
//! 不回头重算既有记录。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::models::{EvaluationRecord, Letter};

/// 单维度正确率桶
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccuracyBucket {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
}

impl AccuracyBucket {
    fn add(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    fn finalize(&mut self) {
        self.accuracy = if self.total > 0 {
            self.correct as f64 / self.total as f64
        } else {
            0.0
        };
    }
}

/// 按是否达成共识分层的正确率
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsensusBreakdown {
    pub with_consensus: AccuracyBucket,
    pub without_consensus: AccuracyBucket,
}

/// 汇总报告
///
/// 预测字母分布与标准答案字母分布并列输出，
/// 用于暴露模型对特定字母的选择偏置。
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    pub generated_at: String,
    pub total_questions: usize,
    pub total_correct: usize,
    pub overall_accuracy: f64,
    /// 未作答题数（全部调用失败、提取失败或校验失败）
    pub no_answer_count: usize,
    /// 失败调用总数（服务错误，按题累计）
    pub total_failed_passes: usize,
    pub accuracy_by_tier: BTreeMap<String, AccuracyBucket>,
    pub accuracy_by_area: BTreeMap<String, AccuracyBucket>,
    pub accuracy_by_topic: BTreeMap<String, AccuracyBucket>,
    pub predicted_letter_distribution: BTreeMap<String, usize>,
    pub ground_truth_letter_distribution: BTreeMap<String, usize>,
    pub consensus: ConsensusBreakdown,
    pub records: Vec<EvaluationRecord>,
}

/// 评测报表服务
#[derive(Debug, Default)]
pub struct EvaluationReporter {
    records: Vec<EvaluationRecord>,
    total_correct: usize,
    no_answer_count: usize,
    total_failed_passes: usize,
    by_tier: BTreeMap<String, AccuracyBucket>,
    by_area: BTreeMap<String, AccuracyBucket>,
    by_topic: BTreeMap<String, AccuracyBucket>,
    predicted_distribution: BTreeMap<String, usize>,
    truth_distribution: BTreeMap<String, usize>,
    consensus: ConsensusBreakdown,
}

impl EvaluationReporter {
    /// 创建新的评测报表服务
    pub fn new() -> Self {
        Self::default()
    }

    /// 累积一条评测记录
    pub fn push(&mut self, record: EvaluationRecord) {
        if record.correct {
            self.total_correct += 1;
        }
        self.total_failed_passes += record.failed_passes;

        self.by_tier
            .entry(record.tier.name().to_string())
            .or_default()
            .add(record.correct);
        self.by_area
            .entry(record.area.name().to_string())
            .or_default()
            .add(record.correct);
        self.by_topic
            .entry(record.topic.clone())
            .or_default()
            .add(record.correct);

        match record.predicted {
            Some(letter) => {
                *self
                    .predicted_distribution
                    .entry(letter.to_string())
                    .or_insert(0) += 1;
            }
            None => self.no_answer_count += 1,
        }
        *self
            .truth_distribution
            .entry(record.ground_truth.to_string())
            .or_insert(0) += 1;

        if record.consensus_reached {
            self.consensus.with_consensus.add(record.correct);
        } else {
            self.consensus.without_consensus.add(record.correct);
        }

        self.records.push(record);
    }

    /// 已累积的记录数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否尚无记录
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 结算为最终报告
    pub fn finish(mut self) -> EvaluationReport {
        let total = self.records.len();
        let overall_accuracy = if total > 0 {
            self.total_correct as f64 / total as f64
        } else {
            0.0
        };

        for bucket in self.by_tier.values_mut() {
            bucket.finalize();
        }
        for bucket in self.by_area.values_mut() {
            bucket.finalize();
        }
        for bucket in self.by_topic.values_mut() {
            bucket.finalize();
        }
        self.consensus.with_consensus.finalize();
        self.consensus.without_consensus.finalize();

        // 所有字母在两个分布中都占位，偏置一目了然
        for letter in Letter::ALL {
            self.predicted_distribution
                .entry(letter.to_string())
                .or_insert(0);
            self.truth_distribution.entry(letter.to_string()).or_insert(0);
        }

        EvaluationReport {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_questions: total,
            total_correct: self.total_correct,
            overall_accuracy,
            no_answer_count: self.no_answer_count,
            total_failed_passes: self.total_failed_passes,
            accuracy_by_tier: self.by_tier,
            accuracy_by_area: self.by_area,
            accuracy_by_topic: self.by_topic,
            predicted_letter_distribution: self.predicted_distribution,
            ground_truth_letter_distribution: self.truth_distribution,
            consensus: self.consensus,
            records: self.records,
        }
    }
}

/// 将报告写为带时间戳的 JSON 文件，返回文件路径
pub fn write_report(report: &EvaluationReport, output_dir: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("无法创建输出目录: {}", output_dir))?;

    let file_name = format!(
        "eval_report_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let path = Path::new(output_dir).join(file_name);

    let json = serde_json::to_string_pretty(report).context("无法序列化报告")?;
    std::fs::write(&path, json)
        .map_err(|e| crate::error::AppError::file_write_failed(path.display().to_string(), e))?;

    info!("报告已保存至: {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Area, Tier};

    fn record(
        id: &str,
        tier: Tier,
        predicted: Option<Letter>,
        truth: Letter,
        consensus: bool,
    ) -> EvaluationRecord {
        EvaluationRecord {
            question_id: id.to_string(),
            area: Area::Mathematics,
            topic: "geometria".to_string(),
            tier,
            predicted,
            ground_truth: truth,
            correct: predicted == Some(truth),
            confidence: if predicted.is_some() { 1.0 } else { 0.0 },
            consensus_reached: consensus,
            failed_passes: 0,
        }
    }

    #[test]
    fn test_overall_accuracy() {
        let mut reporter = EvaluationReporter::new();
        reporter.push(record("q1", Tier::Easy, Some(Letter::A), Letter::A, true));
        reporter.push(record("q2", Tier::Easy, Some(Letter::B), Letter::C, true));
        reporter.push(record("q3", Tier::Hard, None, Letter::D, false));

        let report = reporter.finish();
        assert_eq!(report.total_questions, 3);
        assert_eq!(report.total_correct, 1);
        assert!((report.overall_accuracy - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.no_answer_count, 1);
    }

    #[test]
    fn test_tier_breakdown() {
        let mut reporter = EvaluationReporter::new();
        reporter.push(record("q1", Tier::Easy, Some(Letter::A), Letter::A, true));
        reporter.push(record("q2", Tier::Hard, Some(Letter::B), Letter::C, false));

        let report = reporter.finish();
        assert_eq!(report.accuracy_by_tier["easy"].correct, 1);
        assert_eq!(report.accuracy_by_tier["easy"].total, 1);
        assert!((report.accuracy_by_tier["easy"].accuracy - 1.0).abs() < 1e-9);
        assert_eq!(report.accuracy_by_tier["hard"].correct, 0);
    }

    #[test]
    fn test_letter_bias_surfaces_in_distributions() {
        let mut reporter = EvaluationReporter::new();
        for (index, truth) in [Letter::A, Letter::B, Letter::C, Letter::D].iter().enumerate() {
            reporter.push(record(
                &format!("q{}", index),
                Tier::Medium,
                Some(Letter::E),
                *truth,
                true,
            ));
        }

        let report = reporter.finish();
        // 预测分布集中在 E，标准答案分布近似均匀
        assert_eq!(report.predicted_letter_distribution["E"], 4);
        assert_eq!(report.predicted_letter_distribution["A"], 0);
        assert_eq!(report.ground_truth_letter_distribution["A"], 1);
        assert_eq!(report.ground_truth_letter_distribution["D"], 1);
        assert_eq!(report.total_correct, 0);
    }

    #[test]
    fn test_consensus_stratification() {
        let mut reporter = EvaluationReporter::new();
        reporter.push(record("q1", Tier::Easy, Some(Letter::A), Letter::A, true));
        reporter.push(record("q2", Tier::Easy, Some(Letter::B), Letter::B, false));
        reporter.push(record("q3", Tier::Easy, Some(Letter::C), Letter::D, false));

        let report = reporter.finish();
        assert_eq!(report.consensus.with_consensus.total, 1);
        assert_eq!(report.consensus.with_consensus.correct, 1);
        assert_eq!(report.consensus.without_consensus.total, 2);
        assert_eq!(report.consensus.without_consensus.correct, 1);
    }
}
