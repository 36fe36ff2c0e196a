//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责数据集级别的评测调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Question>)
//!     ↓
//! workflow::QuestionFlow (处理单个 Question)
//!     ↓
//! services (能力层：classify / prompt / inference / aggregate / report)
//!     ↓
//! gateway (外部补全服务边界)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度和统计，不做具体业务判断
//! 2. **向下依赖**：编排层 → workflow → services → gateway
//! 3. **失败隔离**：错误不跨题目边界，评测总能完成并产出报告

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{run_evaluation, App};
