//! # Exam Eval
//!
//! 一个对多选题基准数据集做自洽多数投票评测的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Question
//! - `DifficultyClassifier` - IRT 分数 → 难度层级
//! - `FigureClassifier` - 图片说明 → 图形类别
//! - `ExampleBank` - 主题 → 例题静态查找
//! - `PromptBuilder` - (层级, 领域, 主题, 图形) → 指令文本
//! - `InferenceRunner` - N 次独立补全调用
//! - `AnswerExtractor` - 自由文本 → 字母
//! - `ConsensusAggregator` / `ResponseValidator` - 投票聚合与校验
//! - `EvaluationReporter` - 记录累积与报告结算
//! - `LlmService` - 外部补全服务（`CompletionGateway` 的真实实现）
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整解析流程
//! - `QuestionCtx` - 上下文封装（序号 + 题目 ID + 领域）
//! - `QuestionFlow` - 流程编排（classify → prompt → inference → vote → validate）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 数据集级评测，管理过滤与报告输出
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Area, EvaluationRecord, Letter, Question, Tier};
pub use orchestrator::{run_evaluation, App};
pub use services::{CompletionGateway, EvaluationReport};
pub use workflow::{QuestionCtx, QuestionFlow};
