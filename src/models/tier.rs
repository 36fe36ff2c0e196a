use serde::{Deserialize, Serialize};

/// 难度层级枚举
///
/// 由题目的 IRT 难度分数在评测时推导，不独立持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    /// 层级序号（easy=1 < medium=2 < hard=3），用于单调性判断
    pub fn rank(self) -> u8 {
        match self {
            Tier::Easy => 1,
            Tier::Medium => 2,
            Tier::Hard => 3,
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
