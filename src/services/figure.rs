//! 图形复杂度分类服务 - 业务能力层
//!
//! 只负责"图片说明文字 → 图形类别"的映射，不关心流程

/// 图形类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    /// 数据表格
    Table,
    /// 基础图表（柱状、折线、饼图等单序列图）
    BasicChart,
    /// 复杂图表（散点、直方图、多序列等）
    ComplexChart,
    /// 示意图（流程图、地图、结构图等）
    Diagram,
    /// 照片或艺术图像
    Photo,
    /// 无可识别图形
    None,
}

impl FigureKind {
    /// 是否为"简单图形"
    ///
    /// 仅表格与基础图表视为简单；无图形不算简单
    /// （缺省走完整推理路径）。
    pub fn is_simple(self) -> bool {
        matches!(self, FigureKind::Table | FigureKind::BasicChart)
    }
}

/// 图形复杂度分类服务
///
/// 职责：
/// - 按有序规则列表对说明文字做关键词匹配，首个命中即返回
/// - 规则顺序是显式约定：图表规则必须排在表格规则之前，
///   因为两组关键词共享 "linha"（"gráfico de linha" 对
///   表格描述中的 "linhas"），颠倒顺序会把折线图误判为表格
pub struct FigureClassifier {
    rules: Vec<(FigureKind, Vec<&'static str>)>,
    /// 说明文字短于此字符数时视为无图形
    min_caption_len: usize,
}

impl FigureClassifier {
    /// 创建新的图形分类服务（构建有序规则表）
    pub fn new() -> Self {
        // 顺序敏感：ComplexChart → BasicChart → Table → Diagram → Photo
        let rules = vec![
            (
                FigureKind::ComplexChart,
                vec![
                    "dispersão",
                    "dispersao",
                    "histograma",
                    "boxplot",
                    "correlação",
                    "correlacao",
                    "múltiplas séries",
                    "multiplas series",
                    "escala logarítmica",
                    "escala logaritmica",
                ],
            ),
            (
                FigureKind::BasicChart,
                vec![
                    "gráfico de linha",
                    "grafico de linha",
                    "gráfico de barras",
                    "grafico de barras",
                    "gráfico de colunas",
                    "grafico de colunas",
                    "gráfico de pizza",
                    "grafico de pizza",
                    "gráfico de setores",
                    "grafico de setores",
                    "gráfico",
                    "grafico",
                ],
            ),
            (
                FigureKind::Table,
                vec!["tabela", "quadro", "planilha"],
            ),
            (
                FigureKind::Diagram,
                vec![
                    "diagrama",
                    "esquema",
                    "fluxograma",
                    "mapa",
                    "organograma",
                    "infográfico",
                    "infografico",
                ],
            ),
            (
                FigureKind::Photo,
                vec![
                    "foto",
                    "fotografia",
                    "imagem",
                    "retrato",
                    "pintura",
                    "ilustração",
                    "ilustracao",
                ],
            ),
        ];

        Self {
            rules,
            min_caption_len: 3,
        }
    }

    /// 说明文字 → 图形类别
    pub fn classify(&self, caption: &str) -> FigureKind {
        let trimmed = caption.trim();
        if trimmed.chars().count() < self.min_caption_len {
            return FigureKind::None;
        }

        let lowered = trimmed.to_lowercase();
        for (kind, keywords) in &self.rules {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return *kind;
            }
        }

        FigureKind::None
    }
}

impl Default for FigureClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_caption() {
        let classifier = FigureClassifier::new();
        let kind = classifier.classify("Uma tabela com 3 colunas e 5 linhas");
        assert_eq!(kind, FigureKind::Table);
        assert!(kind.is_simple());
    }

    #[test]
    fn test_complex_chart_caption() {
        let classifier = FigureClassifier::new();
        let kind = classifier.classify("Gráfico de dispersão com correlação");
        assert_eq!(kind, FigureKind::ComplexChart);
        assert!(!kind.is_simple());
    }

    #[test]
    fn test_empty_caption() {
        let classifier = FigureClassifier::new();
        let kind = classifier.classify("");
        assert_eq!(kind, FigureKind::None);
        assert!(!kind.is_simple());
    }

    #[test]
    fn test_chart_rule_wins_over_table_rule() {
        let classifier = FigureClassifier::new();
        // 同时出现 "gráfico de linha" 和 "linhas"：图表规则在前，必须命中图表
        let kind = classifier.classify("Gráfico de linha mostrando valores em linhas mensais");
        assert_eq!(kind, FigureKind::BasicChart);
    }

    #[test]
    fn test_diagram_and_photo() {
        let classifier = FigureClassifier::new();
        assert_eq!(
            classifier.classify("Fluxograma do processo de produção"),
            FigureKind::Diagram
        );
        assert_eq!(
            classifier.classify("Fotografia aérea da região"),
            FigureKind::Photo
        );
    }
}
