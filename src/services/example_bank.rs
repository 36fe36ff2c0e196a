//! 示例库服务 - 业务能力层
//!
//! 只负责"主题 → 例题"的静态查找，不关心流程
//!
//! 在进程启动时构建一次，之后只读注入；
//! 同一主题总是返回相同顺序的相同例题，无随机性。

use crate::models::Letter;

/// 带解答的例题
#[derive(Debug, Clone)]
pub struct WorkedExample {
    /// 例题题干
    pub question: &'static str,
    /// 例题备选项（A..E）
    pub alternatives: [&'static str; 5],
    /// 例题答案字母
    pub solution: Letter,
    /// 解题过程
    pub reasoning: &'static str,
}

/// 主题桶：关键词集合 + 对应例题
struct TopicBucket {
    keywords: Vec<&'static str>,
    examples: Vec<WorkedExample>,
}

/// 示例库服务
///
/// 职责：
/// - 将自由主题字符串归入固定主题桶（大小写不敏感的子串匹配）
/// - 返回桶内前 k 个例题，顺序确定
/// - 未命中任何桶时使用通用兜底桶
pub struct ExampleBank {
    buckets: Vec<TopicBucket>,
    fallback: Vec<WorkedExample>,
}

impl ExampleBank {
    /// 构建示例库（固定内容，启动时执行一次）
    pub fn new() -> Self {
        let buckets = vec![
            TopicBucket {
                keywords: vec!["álgebra", "algebra", "função", "funcao", "funções", "funcoes", "equação", "equacao"],
                examples: vec![
                    WorkedExample {
                        question: "Se f(x) = 2x + 3, qual é o valor de f(5)?",
                        alternatives: ["8", "10", "13", "15", "16"],
                        solution: Letter::C,
                        reasoning: "Substituindo x = 5: f(5) = 2·5 + 3 = 10 + 3 = 13.",
                    },
                    WorkedExample {
                        question: "Qual é a raiz da equação 3x - 12 = 0?",
                        alternatives: ["2", "3", "4", "6", "12"],
                        solution: Letter::C,
                        reasoning: "Isolando x: 3x = 12, logo x = 12/3 = 4.",
                    },
                ],
            },
            TopicBucket {
                keywords: vec!["estatística", "estatistica", "probabilidade", "média", "media", "mediana"],
                examples: vec![
                    WorkedExample {
                        question: "A média aritmética dos números 4, 6 e 11 é:",
                        alternatives: ["5", "6", "7", "8", "9"],
                        solution: Letter::C,
                        reasoning: "Soma = 4 + 6 + 11 = 21; média = 21/3 = 7.",
                    },
                    WorkedExample {
                        question: "Ao lançar um dado comum, qual é a probabilidade de obter um número par?",
                        alternatives: ["1/6", "1/3", "1/2", "2/3", "5/6"],
                        solution: Letter::C,
                        reasoning: "Casos favoráveis: {2, 4, 6}, ou seja 3 de 6; probabilidade = 3/6 = 1/2.",
                    },
                ],
            },
            TopicBucket {
                keywords: vec!["geometria", "triângulo", "triangulo", "círculo", "circulo", "área", "area", "volume"],
                examples: vec![
                    WorkedExample {
                        question: "Um retângulo tem lados de 6 cm e 4 cm. Qual é a sua área?",
                        alternatives: ["10 cm²", "20 cm²", "24 cm²", "28 cm²", "48 cm²"],
                        solution: Letter::C,
                        reasoning: "Área do retângulo = base × altura = 6 × 4 = 24 cm².",
                    },
                    WorkedExample {
                        question: "Um triângulo retângulo tem catetos de 3 cm e 4 cm. Qual é a hipotenusa?",
                        alternatives: ["5 cm", "6 cm", "7 cm", "12 cm", "25 cm"],
                        solution: Letter::A,
                        reasoning: "Pelo teorema de Pitágoras: h² = 3² + 4² = 25, logo h = 5 cm.",
                    },
                ],
            },
            TopicBucket {
                keywords: vec!["medida", "medidas", "grandeza", "grandezas", "escala", "proporção", "proporcao", "unidade"],
                examples: vec![
                    WorkedExample {
                        question: "Um mapa tem escala 1:100000. Dois pontos distam 3 cm no mapa. Qual é a distância real?",
                        alternatives: ["3 km", "30 km", "300 m", "3000 km", "30 m"],
                        solution: Letter::A,
                        reasoning: "3 cm × 100000 = 300000 cm = 3 km.",
                    },
                    WorkedExample {
                        question: "Quantos mililitros há em 2,5 litros?",
                        alternatives: ["25 mL", "250 mL", "2500 mL", "25000 mL", "0,25 mL"],
                        solution: Letter::C,
                        reasoning: "1 L = 1000 mL, portanto 2,5 L = 2500 mL.",
                    },
                ],
            },
            TopicBucket {
                keywords: vec!["número", "numero", "números", "numeros", "operação", "operacao", "operações", "operacoes", "porcentagem", "fração", "fracao"],
                examples: vec![
                    WorkedExample {
                        question: "Quanto é 15% de 200?",
                        alternatives: ["15", "20", "25", "30", "35"],
                        solution: Letter::D,
                        reasoning: "15% de 200 = 0,15 × 200 = 30.",
                    },
                    WorkedExample {
                        question: "Qual é o resultado de 3/4 + 1/2?",
                        alternatives: ["4/6", "1", "5/4", "3/2", "7/4"],
                        solution: Letter::C,
                        reasoning: "Denominador comum 4: 3/4 + 2/4 = 5/4.",
                    },
                ],
            },
            TopicBucket {
                keywords: vec!["combinatória", "combinatoria", "contagem", "permutação", "permutacao", "arranjo", "combinação", "combinacao"],
                examples: vec![
                    WorkedExample {
                        question: "De quantas maneiras distintas 3 pessoas podem se sentar em fila?",
                        alternatives: ["3", "6", "9", "12", "27"],
                        solution: Letter::B,
                        reasoning: "Permutação de 3 elementos: 3! = 3 × 2 × 1 = 6.",
                    },
                    WorkedExample {
                        question: "Com 4 camisas e 2 calças, quantos conjuntos camisa-calça são possíveis?",
                        alternatives: ["6", "8", "10", "12", "16"],
                        solution: Letter::B,
                        reasoning: "Princípio multiplicativo: 4 × 2 = 8 conjuntos.",
                    },
                ],
            },
        ];

        // 通用兜底桶：未命中任何主题时使用
        let fallback = vec![
            WorkedExample {
                question: "Quanto é 12 × 8?",
                alternatives: ["84", "88", "92", "96", "108"],
                solution: Letter::D,
                reasoning: "12 × 8 = 96.",
            },
            WorkedExample {
                question: "Qual é o dobro de 45?",
                alternatives: ["80", "85", "90", "95", "100"],
                solution: Letter::C,
                reasoning: "2 × 45 = 90.",
            },
        ];

        Self { buckets, fallback }
    }

    /// 按主题返回至多 k 个例题
    ///
    /// 主题做小写化子串匹配，首个命中的桶生效；无命中走兜底桶。
    pub fn lookup(&self, topic: &str, k: usize) -> &[WorkedExample] {
        let topic_lower = topic.to_lowercase();

        for bucket in &self.buckets {
            if bucket
                .keywords
                .iter()
                .any(|keyword| topic_lower.contains(keyword))
            {
                let count = k.min(bucket.examples.len());
                return &bucket.examples[..count];
            }
        }

        let count = k.min(self.fallback.len());
        &self.fallback[..count]
    }
}

impl Default for ExampleBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_bucket_match() {
        let bank = ExampleBank::new();
        let examples = bank.lookup("Geometria plana", 3);
        assert_eq!(examples.len(), 2);
        assert!(examples[0].question.contains("retângulo"));
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let bank = ExampleBank::new();
        let first = bank.lookup("probabilidade e estatística", 2);
        let second = bank.lookup("probabilidade e estatística", 2);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.question, b.question);
            assert_eq!(a.solution, b.solution);
        }
    }

    #[test]
    fn test_lookup_fallback() {
        let bank = ExampleBank::new();
        let examples = bank.lookup("história do brasil", 3);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].question, "Quanto é 12 × 8?");
    }

    #[test]
    fn test_lookup_respects_k() {
        let bank = ExampleBank::new();
        assert_eq!(bank.lookup("álgebra", 1).len(), 1);
        assert_eq!(bank.lookup("álgebra", 0).len(), 0);
    }
}
