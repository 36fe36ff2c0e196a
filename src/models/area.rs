use serde::{Deserialize, Serialize};

/// 考试领域枚举
///
/// 数据集固定使用四个领域标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Area {
    /// 语言及其技术（linguagens）
    #[serde(rename = "linguagens")]
    Languages,
    /// 人文科学（ciências humanas）
    #[serde(rename = "ciencias-humanas")]
    Humanities,
    /// 自然科学（ciências da natureza）
    #[serde(rename = "ciencias-natureza")]
    NaturalSciences,
    /// 数学及其技术（matemática）
    #[serde(rename = "matematica")]
    Mathematics,
}

impl Area {
    /// 全部领域，按固定顺序
    pub const ALL: [Area; 4] = [
        Area::Languages,
        Area::Humanities,
        Area::NaturalSciences,
        Area::Mathematics,
    ];

    /// 获取标准名称（数据集标签）
    pub fn name(self) -> &'static str {
        match self {
            Area::Languages => "linguagens",
            Area::Humanities => "ciencias-humanas",
            Area::NaturalSciences => "ciencias-natureza",
            Area::Mathematics => "matematica",
        }
    }

    /// 尝试从标签解析领域（精确匹配）
    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            "linguagens" => Some(Area::Languages),
            "ciencias-humanas" => Some(Area::Humanities),
            "ciencias-natureza" => Some(Area::NaturalSciences),
            "matematica" => Some(Area::Mathematics),
            _ => None,
        }
    }

    /// 智能查找领域（支持模糊匹配）
    pub fn find(s: &str) -> Option<Self> {
        // 先尝试精确匹配
        if let Some(area) = Self::from_tag(s) {
            return Some(area);
        }

        // 模糊匹配
        let s_lower = s.to_lowercase();
        if s_lower.contains("linguagem") || s_lower.contains("linguagens") {
            return Some(Area::Languages);
        }
        if s_lower.contains("humanas") || s_lower.contains("humana") {
            return Some(Area::Humanities);
        }
        if s_lower.contains("natureza") || s_lower.contains("naturais") {
            return Some(Area::NaturalSciences);
        }
        if s_lower.contains("matematica") || s_lower.contains("matemática") {
            return Some(Area::Mathematics);
        }

        None
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
