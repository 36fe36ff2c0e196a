//! LLM 服务 - 业务能力层
//!
//! 只负责"发送一次补全请求"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务
//!
//! ## 重试策略
//! 有限次重试 + 指数退避，统一收敛在本服务内部；
//! 上层（推理执行器）不再做任何重试，失败按失败调用记账。

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, LlmError};
use crate::services::gateway::CompletionGateway;

/// LLM 服务
///
/// 职责：
/// - 调用兼容 OpenAI API 的补全服务
/// - 每次调用独立无状态，失败时有限次重试（指数退避）
/// - 不出现 Vec<Question>
/// - 不关心流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    max_retries: usize,
    retry_base_delay: Duration,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// 发送一次补全请求
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        // 添加用户消息
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求（重试时复用）
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        // ========== 有限次重试 + 指数退避 ==========
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // 第 n 次重试前等待 base * 2^(n-1)
                let delay = self.retry_base_delay * 2u32.pow(attempt as u32 - 1);
                warn!(
                    "LLM API 第 {}/{} 次重试，等待 {:?}...",
                    attempt, self.max_retries, delay
                );
                sleep(delay).await;
            }

            match self.client.chat().create(request.clone()).await {
                Ok(response) => {
                    debug!("LLM API 调用成功");

                    let content = response
                        .choices
                        .first()
                        .and_then(|choice| choice.message.content.clone())
                        .ok_or_else(|| {
                            AppError::Llm(LlmError::EmptyContent {
                                model: self.model_name.clone(),
                            })
                        })?;

                    return Ok(content.trim().to_string());
                }
                Err(e) => {
                    warn!("LLM API 调用失败: {}", e);
                    last_error = Some(e);
                }
            }
        }

        // 重试耗尽
        match last_error {
            Some(e) => Err(AppError::llm_api_failed(&self.model_name, self.max_retries, e).into()),
            None => Err(anyhow::anyhow!("LLM API 调用失败且未记录错误")),
        }
    }
}

#[async_trait]
impl CompletionGateway for LlmService {
    async fn complete(&self, system_message: Option<&str>, user_message: &str) -> Result<String> {
        self.send_to_llm(user_message, system_message).await
    }
}
