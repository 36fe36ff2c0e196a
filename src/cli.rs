//! CLI 参数定义
//!
//! 薄壳：只负责解析命令行并覆盖配置，不含业务逻辑

use clap::Parser;

use crate::config::Config;

/// 自洽多数投票评测工具
#[derive(Parser, Debug)]
#[command(name = "exam_eval", about = "对多选题数据集运行自洽多数投票评测")]
pub struct Cli {
    /// 数据集文件路径（JSONL，每行一道题）
    #[arg(value_name = "DATASET")]
    pub dataset: Option<String>,

    /// 题目数量上限
    #[arg(long)]
    pub limit: Option<usize>,

    /// 领域过滤（数据集标签，如 matematica）
    #[arg(long)]
    pub area: Option<String>,

    /// 每题独立调用次数
    #[arg(long)]
    pub passes: Option<usize>,

    /// 报告输出目录
    #[arg(long)]
    pub output_dir: Option<String>,

    /// 日志详细程度（-v=debug, -vv=trace）
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// 将命令行参数覆盖到配置上（命令行优先于环境变量）
    pub fn apply(&self, config: &mut Config) {
        if let Some(dataset) = &self.dataset {
            config.dataset_path = dataset.clone();
        }
        if let Some(limit) = self.limit {
            config.question_limit = Some(limit);
        }
        if let Some(area) = &self.area {
            config.area_filter = Some(area.clone());
        }
        if let Some(passes) = self.passes {
            config.n_passes = passes;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if self.verbose > 0 {
            config.verbose_logging = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_config() {
        let cli = Cli::parse_from([
            "exam_eval",
            "data/enem.jsonl",
            "--limit",
            "50",
            "--area",
            "matematica",
            "--passes",
            "5",
        ]);

        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.dataset_path, "data/enem.jsonl");
        assert_eq!(config.question_limit, Some(50));
        assert_eq!(config.area_filter.as_deref(), Some("matematica"));
        assert_eq!(config.n_passes, 5);
    }

    #[test]
    fn test_apply_keeps_defaults_when_absent() {
        let cli = Cli::parse_from(["exam_eval"]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.dataset_path, "dataset.jsonl");
        assert_eq!(config.n_passes, 3);
        assert_eq!(config.question_limit, None);
    }
}
