//! 补全服务网关接口
//!
//! 推理执行器只依赖这个接口，不依赖具体的 LLM 客户端，
//! 测试可以用桩实现替换真实服务。

use anyhow::Result;
use async_trait::async_trait;

/// 补全服务网关
///
/// 一次调用对应一次无状态的聊天补全请求。
/// 重试策略统一收敛在网关实现内部：调用方看到的失败
/// 已经是耗尽有限次重试之后的失败。
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// 发送一次补全请求，返回模型的自由文本
    async fn complete(&self, system_message: Option<&str>, user_message: &str) -> Result<String>;
}
