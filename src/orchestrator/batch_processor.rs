//! 批量评测处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责数据集级别的评测和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：构建 LLM 网关（凭证检查已在配置阶段完成）
//! 2. **数据集加载**：读取 JSONL 数据集（`Vec<Question>`）
//! 3. **过滤**：领域过滤 + 题目数量上限；被取消的题目跳过
//! 4. **顺序评测**：逐题委托 QuestionFlow，累积评测记录
//! 5. **报告输出**：写出带时间戳的 JSON 报告并打印统计
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个题目的细节
//! - **向下委托**：委托 workflow::QuestionFlow 处理单个 Question
//! - **失败隔离**：单题最坏产出一条未作答记录，评测总能完成并出报告

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::models::{load_jsonl_dataset, Area, Question};
use crate::services::{write_report, CompletionGateway, EvaluationReport, EvaluationReporter, LlmService};
use crate::utils::logging;
use crate::workflow::{QuestionCtx, QuestionFlow};

/// 应用主结构
pub struct App {
    config: Config,
    gateway: Arc<dyn CompletionGateway>,
}

impl App {
    /// 初始化应用
    ///
    /// 凭证缺失在 `Config::from_env` 阶段即已致命中止，
    /// 到这里配置一定完整。
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let gateway: Arc<dyn CompletionGateway> = Arc::new(LlmService::new(&config));

        Ok(Self { config, gateway })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<PathBuf> {
        // 加载数据集
        info!("\n📁 正在加载数据集: {}", self.config.dataset_path);
        let all_questions = load_jsonl_dataset(&self.config.dataset_path).await?;

        let questions = filter_questions(all_questions, &self.config)?;

        if questions.is_empty() {
            warn!("⚠️ 过滤后没有可评测的题目，程序结束");
            anyhow::bail!("没有可评测的题目");
        }

        logging::log_questions_selected(questions.len(), self.config.n_passes);

        // 逐题评测
        let report = run_evaluation(&questions, self.gateway.clone(), &self.config).await?;

        // 输出报告
        let path = write_report(&report, &self.config.output_dir)?;
        logging::print_final_stats(&report, &path);

        Ok(path)
    }
}

/// 应用过滤条件：领域过滤 + 数量上限
fn filter_questions(questions: Vec<Question>, config: &Config) -> Result<Vec<Question>> {
    let area_filter = match &config.area_filter {
        Some(tag) => Some(Area::find(tag).ok_or_else(|| {
            AppError::Config(ConfigError::InvalidAreaFilter { value: tag.clone() })
        })?),
        None => None,
    };

    let filtered: Vec<Question> = questions
        .into_iter()
        .filter(|question| match area_filter {
            Some(area) => question.area == area,
            None => true,
        })
        .take(config.question_limit.unwrap_or(usize::MAX))
        .collect();

    Ok(filtered)
}

/// 对给定题目集合执行完整评测
///
/// 网关以参数注入，集成测试用桩实现驱动同一条代码路径。
/// 题目之间互相独立，只共享只读状态；
/// 源流程按顺序逐题处理，这里保持一致。
pub async fn run_evaluation(
    questions: &[Question],
    gateway: Arc<dyn CompletionGateway>,
    config: &Config,
) -> Result<EvaluationReport> {
    let flow = QuestionFlow::new(config, gateway).context("无法构建题目解析流程")?;
    let mut reporter = EvaluationReporter::new();
    let total = questions.len();
    let mut nullified = 0usize;

    for (index, question) in questions.iter().enumerate() {
        let ordinal = index + 1;
        logging::log_question_start(ordinal, total);

        // 被取消的题目没有标准答案，跳过计分
        let Some(ground_truth) = question.ground_truth else {
            warn!("[题目 #{}] ⚠️ 题目已取消（无正确答案），跳过", ordinal);
            nullified += 1;
            continue;
        };

        let ctx = QuestionCtx::new(ordinal, question.id.clone(), question.area);

        // 执行流程（委托给 QuestionFlow；错误不跨题目边界）
        let record = flow.run(question, ground_truth, &ctx).await;
        reporter.push(record);
    }

    if nullified > 0 {
        info!("已跳过 {} 道被取消的题目", nullified);
    }

    Ok(reporter.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Letter;

    fn question(id: &str, area: Area) -> Question {
        Question {
            id: id.to_string(),
            context: String::new(),
            prompt: "p".to_string(),
            alternatives: vec!["1".to_string(); 5],
            image_captions: vec![],
            area,
            topic: String::new(),
            difficulty: 0.0,
            ground_truth: Some(Letter::A),
        }
    }

    #[test]
    fn test_filter_by_area_and_limit() {
        let questions = vec![
            question("q1", Area::Mathematics),
            question("q2", Area::Languages),
            question("q3", Area::Mathematics),
            question("q4", Area::Mathematics),
        ];

        let mut config = Config::default();
        config.area_filter = Some("matematica".to_string());
        config.question_limit = Some(2);

        let filtered = filter_questions(questions, &config).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "q1");
        assert_eq!(filtered[1].id, "q3");
    }

    #[test]
    fn test_filter_rejects_unknown_area() {
        let mut config = Config::default();
        config.area_filter = Some("astrologia".to_string());
        assert!(filter_questions(vec![], &config).is_err());
    }
}
