use crate::error::{AppError, AppResult};

/// API 凭证的候选环境变量，按优先级排列，取第一个非空值
pub const API_KEY_ENV_CANDIDATES: [&str; 3] = ["EXAM_EVAL_API_KEY", "OPENAI_API_KEY", "LLM_API_KEY"];

/// 程序配置
///
/// 在进程启动时构建一次，之后只读传引用，不使用全局状态。
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 采样温度（较低但非零，保证各次调用间有多样性）
    pub temperature: f32,
    pub max_tokens: u32,
    /// 单次调用的最大重试次数（指数退避）
    pub max_retries: usize,
    /// 重试退避基础延迟（毫秒）
    pub retry_base_delay_ms: u64,
    // --- 自洽推理配置 ---
    /// 每题独立调用次数
    pub n_passes: usize,
    /// 相邻调用之间的礼貌性延迟（毫秒）
    pub pass_delay_ms: u64,
    /// 共识票数下限（未设置时取 n_passes 的严格多数）
    pub min_consensus: Option<usize>,
    // --- 答案提取配置 ---
    /// 末尾扫描的字符数（规则 2）
    pub extract_tail_chars: usize,
    /// 末尾扫描的词数（规则 3）
    pub extract_tail_tokens: usize,
    // --- 评测配置 ---
    /// 数据集文件路径（JSONL）
    pub dataset_path: String,
    /// 题目数量上限（None 表示全部）
    pub question_limit: Option<usize>,
    /// 领域过滤（数据集标签，None 表示全部领域）
    pub area_filter: Option<String>,
    /// 报告输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 2048,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            n_passes: 3,
            pass_delay_ms: 500,
            min_consensus: None,
            extract_tail_chars: 200,
            extract_tail_tokens: 10,
            dataset_path: "dataset.jsonl".to_string(),
            question_limit: None,
            area_filter: None,
            output_dir: "reports".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量构建配置
    ///
    /// API 凭证依次检查候选环境变量，取第一个非空值；
    /// 全部缺失时返回致命配置错误，不进入评测流程。
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();

        let llm_api_key = resolve_api_key()?;

        Ok(Self {
            llm_api_key,
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.temperature),
            max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_tokens),
            max_retries: std::env::var("LLM_MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            retry_base_delay_ms: std::env::var("LLM_RETRY_BASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_base_delay_ms),
            n_passes: std::env::var("EVAL_N_PASSES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.n_passes),
            pass_delay_ms: std::env::var("EVAL_PASS_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pass_delay_ms),
            min_consensus: std::env::var("EVAL_MIN_CONSENSUS").ok().and_then(|v| v.parse().ok()),
            extract_tail_chars: std::env::var("EXTRACT_TAIL_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.extract_tail_chars),
            extract_tail_tokens: std::env::var("EXTRACT_TAIL_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.extract_tail_tokens),
            dataset_path: std::env::var("EVAL_DATASET_PATH").unwrap_or(default.dataset_path),
            question_limit: std::env::var("EVAL_QUESTION_LIMIT").ok().and_then(|v| v.parse().ok()),
            area_filter: std::env::var("EVAL_AREA_FILTER").ok().filter(|v| !v.is_empty()),
            output_dir: std::env::var("EVAL_OUTPUT_DIR").unwrap_or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        })
    }

    /// 共识票数下限：显式配置优先，否则取 n_passes 的严格多数
    pub fn min_consensus(&self) -> usize {
        self.min_consensus.unwrap_or(self.n_passes / 2 + 1)
    }
}

/// 依次检查候选环境变量，取第一个非空值
fn resolve_api_key() -> AppResult<String> {
    for candidate in API_KEY_ENV_CANDIDATES {
        if let Ok(value) = std::env::var(candidate) {
            if !value.trim().is_empty() {
                return Ok(value);
            }
        }
    }
    Err(AppError::api_key_not_found(&API_KEY_ENV_CANDIDATES))
}
