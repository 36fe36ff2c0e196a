//! 提示词构建服务 - 业务能力层
//!
//! 只负责"(层级, 领域, 主题, 图形类别) → 指令文本"的组装，不关心流程
//!
//! 基础模板按 (层级 × 领域) 分派：4 个领域框架 × 3 个层级方法论，
//! 共 12 种组合。题目本身的材料、题干和备选项由调用方追加，
//! 本服务只产出指令部分。

use crate::models::{Area, Tier};
use crate::services::example_bank::ExampleBank;
use crate::services::figure::FigureKind;

/// 提示词构建服务
///
/// 职责：
/// - 组装基础指令模板（领域框架 + 层级方法论 + 反偏置指令）
/// - medium 层级追加至多 max_examples 个主题例题
/// - 简单图形追加"直接读值"附注；复杂图形不加附注
/// - 每题组装一次，产出后不可变
pub struct PromptBuilder {
    bank: ExampleBank,
    /// medium 层级追加的例题上限
    max_examples: usize,
}

impl PromptBuilder {
    /// 创建新的提示词构建服务（持有注入的示例库）
    pub fn new(bank: ExampleBank) -> Self {
        Self {
            bank,
            max_examples: 3,
        }
    }

    /// 组装指令文本
    pub fn build(&self, tier: Tier, area: Area, topic: &str, figure: FigureKind) -> String {
        let mut prompt = String::new();

        prompt.push_str(Self::area_framing(area));
        prompt.push_str("\n\n");
        prompt.push_str(Self::methodology(tier));
        prompt.push_str("\n\n");

        // 反偏置指令：观测到模型会习惯性偏向特定字母
        prompt.push_str(
            "Pese as cinco alternativas (A, B, C, D, E) com igual atenção; \
             não favoreça nenhuma letra por hábito.\n",
        );
        prompt.push_str("Ao final, escreva sua resposta em uma linha no formato RESPOSTA: <letra>.\n");

        if tier == Tier::Medium {
            let examples = self.bank.lookup(topic, self.max_examples);
            if !examples.is_empty() {
                prompt.push_str("\nExemplos resolvidos do mesmo tema:\n");
                for example in examples {
                    prompt.push_str("\nQuestão: ");
                    prompt.push_str(example.question);
                    prompt.push_str("\nAlternativas: ");
                    for (index, alternative) in example.alternatives.iter().enumerate() {
                        if index > 0 {
                            prompt.push_str("  ");
                        }
                        prompt.push_str(&format!("{}) {}", (b'A' + index as u8) as char, alternative));
                    }
                    prompt.push_str("\nSolução: ");
                    prompt.push_str(example.reasoning);
                    prompt.push_str(&format!("\nRESPOSTA: {}\n", example.solution));
                }
            }
        }

        // 简单图形（表格/基础图表）：紧贴题目块之前注入直接读值附注；
        // 图形存在但不简单时不加附注，走完整推理路径
        if figure.is_simple() {
            prompt.push_str(
                "\nA figura desta questão é simples (tabela ou gráfico básico): \
                 leia o valor pedido diretamente, sem cálculos extensos.\n",
            );
        }

        prompt
    }

    /// 领域框架（4 种）
    fn area_framing(area: Area) -> &'static str {
        match area {
            Area::Languages => {
                "Você é um professor especialista resolvendo uma questão de múltipla escolha \
                 do ENEM, área de Linguagens e suas Tecnologias. Interprete os textos com \
                 atenção ao sentido, ao contexto e à intenção do autor."
            }
            Area::Humanities => {
                "Você é um professor especialista resolvendo uma questão de múltipla escolha \
                 do ENEM, área de Ciências Humanas. Analise os textos e contextos históricos, \
                 geográficos e sociais antes de decidir."
            }
            Area::NaturalSciences => {
                "Você é um professor especialista resolvendo uma questão de múltipla escolha \
                 do ENEM, área de Ciências da Natureza. Interprete os fenômenos físicos, \
                 químicos e biológicos com rigor conceitual."
            }
            Area::Mathematics => {
                "Você é um professor especialista resolvendo uma questão de múltipla escolha \
                 do ENEM, área de Matemática e suas Tecnologias. Resolva com precisão \
                 numérica e verifique os cálculos."
            }
        }
    }

    /// 层级方法论（3 种）
    ///
    /// easy 用 4 步"不过度思考"变体；hard 用 8 步变体，
    /// 含逐项排除和最终自检清单。
    fn methodology(tier: Tier) -> &'static str {
        match tier {
            Tier::Easy => {
                "Siga este método:\n\
                 1. Leia o enunciado com atenção.\n\
                 2. Identifique o dado ou conceito pedido.\n\
                 3. Resolva de forma direta, sem cálculos desnecessários.\n\
                 4. Marque a alternativa que corresponde ao resultado.\n\
                 Não pense demais: questões deste nível costumam ter resolução direta."
            }
            Tier::Medium => {
                "Siga este método:\n\
                 1. Leia o texto de apoio e o enunciado.\n\
                 2. Liste os dados relevantes.\n\
                 3. Planeje a resolução antes de calcular.\n\
                 4. Execute o cálculo ou o raciocínio passo a passo.\n\
                 5. Confira se o resultado corresponde exatamente a uma alternativa."
            }
            Tier::Hard => {
                "Siga este método:\n\
                 1. Leia o enunciado duas vezes antes de começar.\n\
                 2. Liste todos os dados e o que é pedido.\n\
                 3. Planeje a estratégia de resolução.\n\
                 4. Execute os cálculos registrando cada passo.\n\
                 5. Analise cada alternativa (A, B, C, D, E) individualmente e elimine as incompatíveis.\n\
                 6. Verifique unidades e ordens de grandeza.\n\
                 7. Refaça o passo crítico do cálculo para confirmar.\n\
                 8. Checagem final: o resultado responde exatamente ao que foi perguntado? \
                 Alguma alternativa eliminada merece revisão?"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PromptBuilder {
        PromptBuilder::new(ExampleBank::new())
    }

    #[test]
    fn test_all_twelve_combinations_are_distinct() {
        let builder = builder();
        let mut prompts = Vec::new();
        for area in Area::ALL {
            for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
                prompts.push(builder.build(tier, area, "geometria", FigureKind::None));
            }
        }
        assert_eq!(prompts.len(), 12);
        for (i, a) in prompts.iter().enumerate() {
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_medium_appends_examples() {
        let builder = builder();
        let medium = builder.build(Tier::Medium, Area::Mathematics, "geometria", FigureKind::None);
        assert!(medium.contains("Exemplos resolvidos"));
        assert!(medium.contains("Pitágoras"));

        let easy = builder.build(Tier::Easy, Area::Mathematics, "geometria", FigureKind::None);
        assert!(!easy.contains("Exemplos resolvidos"));
        let hard = builder.build(Tier::Hard, Area::Mathematics, "geometria", FigureKind::None);
        assert!(!hard.contains("Exemplos resolvidos"));
    }

    #[test]
    fn test_simple_figure_addendum() {
        let builder = builder();
        let with_table = builder.build(Tier::Easy, Area::Mathematics, "", FigureKind::Table);
        assert!(with_table.contains("leia o valor pedido diretamente"));

        // 图形存在但不简单：不加附注
        let with_complex = builder.build(Tier::Easy, Area::Mathematics, "", FigureKind::ComplexChart);
        assert!(!with_complex.contains("leia o valor pedido diretamente"));

        // 无图形：同样不加附注
        let without = builder.build(Tier::Easy, Area::Mathematics, "", FigureKind::None);
        assert!(!without.contains("leia o valor pedido diretamente"));
    }

    #[test]
    fn test_every_prompt_carries_anti_bias_and_format() {
        let builder = builder();
        for area in Area::ALL {
            for tier in [Tier::Easy, Tier::Medium, Tier::Hard] {
                let prompt = builder.build(tier, area, "números", FigureKind::None);
                assert!(prompt.contains("igual atenção"));
                assert!(prompt.contains("RESPOSTA: <letra>"));
            }
        }
    }

    #[test]
    fn test_hard_tier_has_elimination_step() {
        let builder = builder();
        let hard = builder.build(Tier::Hard, Area::Humanities, "", FigureKind::None);
        assert!(hard.contains("elimine as incompatíveis"));
        assert!(hard.contains("Checagem final"));
    }
}
