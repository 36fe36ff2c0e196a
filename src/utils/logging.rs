//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::services::EvaluationReport;

/// 初始化日志
///
/// # 参数
/// - `verbosity`: CLI 的 -v 计数（0=info, 1=debug, ≥2=trace）
///
/// 环境变量 RUST_LOG 存在时优先生效。
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 自洽多数投票评测模式");
    info!("🤖 模型: {} @ {}", config.llm_model_name, config.llm_api_base_url);
    info!("📊 每题调用次数: {} (共识下限: {})", config.n_passes, config.min_consensus());
    info!("{}", "=".repeat(60));
}

/// 记录筛选后的题目信息
///
/// # 参数
/// - `total`: 待评测题目总数
/// - `n_passes`: 每题调用次数
pub fn log_questions_selected(total: usize, n_passes: usize) {
    info!("✓ 共 {} 道题目进入评测", total);
    info!("💡 每道题发起 {} 次独立调用后投票\n", n_passes);
}

/// 记录单题开始信息
pub fn log_question_start(ordinal: usize, total: usize) {
    info!("\n{}", "─".repeat(30));
    info!("处理第 {}/{} 道题目", ordinal, total);
}

/// 打印最终统计信息
pub fn print_final_stats(report: &EvaluationReport, report_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评测完成统计");
    info!("完成时间: {}", report.generated_at);
    info!("{}", "=".repeat(60));
    info!(
        "✅ 正确: {}/{} (正确率 {:.1}%)",
        report.total_correct,
        report.total_questions,
        report.overall_accuracy * 100.0
    );
    info!("❓ 未作答: {}", report.no_answer_count);
    info!("❌ 失败调用总数: {}", report.total_failed_passes);
    for (tier, bucket) in &report.accuracy_by_tier {
        info!(
            "  层级 {}: {}/{} ({:.1}%)",
            tier,
            bucket.correct,
            bucket.total,
            bucket.accuracy * 100.0
        );
    }
    for (area, bucket) in &report.accuracy_by_area {
        info!(
            "  领域 {}: {}/{} ({:.1}%)",
            area,
            bucket.correct,
            bucket.total,
            bucket.accuracy * 100.0
        );
    }
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", report_path.display());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abc", 5), "abc");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
    }
}
