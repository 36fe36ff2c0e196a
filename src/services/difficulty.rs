//! 难度分类服务 - 业务能力层
//!
//! 只负责"IRT 分数 → 难度层级"的映射，不关心流程

use crate::models::Tier;

/// 难度阈值
///
/// 阈值来自外部 IRT 量表；作为显式配置对象在启动时构建一次，
/// 以只读引用注入，不使用模块级静态表。
#[derive(Debug, Clone, Copy)]
pub struct DifficultyThresholds {
    /// 低于此分数视为缺失数据，回退到 medium
    pub floor: f64,
    /// easy 与 medium 的分界
    pub medium_cut: f64,
    /// medium 与 hard 的分界
    pub hard_cut: f64,
}

impl Default for DifficultyThresholds {
    fn default() -> Self {
        Self {
            floor: 200.0,
            medium_cut: 590.0,
            hard_cut: 690.0,
        }
    }
}

/// 难度分类服务
///
/// 职责：
/// - 将 IRT 难度分数映射为离散层级
/// - 纯函数、全定义域、无副作用
/// - 在 floor 以上对分数单调
pub struct DifficultyClassifier {
    thresholds: DifficultyThresholds,
}

impl DifficultyClassifier {
    /// 创建新的难度分类服务
    pub fn new(thresholds: DifficultyThresholds) -> Self {
        Self { thresholds }
    }

    /// 分数 → 层级
    ///
    /// 分数低于 floor（含 0 哨兵值）视为缺失数据，回退到 medium。
    pub fn classify(&self, score: f64) -> Tier {
        if score < self.thresholds.floor {
            return Tier::Medium;
        }
        if score < self.thresholds.medium_cut {
            return Tier::Easy;
        }
        if score < self.thresholds.hard_cut {
            return Tier::Medium;
        }
        Tier::Hard
    }
}

impl Default for DifficultyClassifier {
    fn default() -> Self {
        Self::new(DifficultyThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_points() {
        let classifier = DifficultyClassifier::default();
        assert_eq!(classifier.classify(550.0), Tier::Easy);
        assert_eq!(classifier.classify(650.0), Tier::Medium);
        assert_eq!(classifier.classify(700.0), Tier::Hard);
        // 缺失数据回退规则
        assert_eq!(classifier.classify(100.0), Tier::Medium);
        assert_eq!(classifier.classify(0.0), Tier::Medium);
    }

    #[test]
    fn test_boundaries() {
        let classifier = DifficultyClassifier::default();
        assert_eq!(classifier.classify(200.0), Tier::Easy);
        assert_eq!(classifier.classify(589.9), Tier::Easy);
        assert_eq!(classifier.classify(590.0), Tier::Medium);
        assert_eq!(classifier.classify(689.9), Tier::Medium);
        assert_eq!(classifier.classify(690.0), Tier::Hard);
    }

    #[test]
    fn test_monotonic_above_floor() {
        let classifier = DifficultyClassifier::default();
        let mut previous_rank = 0u8;
        let mut score = 200.0;
        while score < 1000.0 {
            let rank = classifier.classify(score).rank();
            assert!(rank >= previous_rank, "层级在分数 {} 处发生回退", score);
            previous_rank = rank;
            score += 10.0;
        }
    }
}
