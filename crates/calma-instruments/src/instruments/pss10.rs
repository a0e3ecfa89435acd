use crate::Scale;
use crate::interpretation::BandTone;
use crate::scoring::{Polarity, ScaleDefinition};

use super::{band, options, questions};

/// PSS-10: Perceived Stress Scale.
/// 10 items rated 0–4 over the last month. Items 4, 5, 7 and 8 are worded
/// positively and reverse-scored. Total 0–40.
pub struct Pss10;

impl Scale for Pss10 {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> =
            std::sync::LazyLock::new(|| ScaleDefinition {
                id: "pss10".to_string(),
                name: "Estresse Percebido (PSS-10)".to_string(),
                description: "No último mês, com que frequência você...".to_string(),
                questions: questions(&[
                    "Ficou triste por causa de algo que aconteceu inesperadamente?",
                    "Sentiu que foi incapaz de controlar as coisas importantes em sua vida?",
                    "Sentiu-se nervoso(a) e estressado(a)?",
                    "Sentiu-se confiante na sua habilidade de resolver problemas pessoais?",
                    "Sentiu que as coisas estavam acontecendo de acordo com a sua vontade?",
                    "Achou que não conseguiria lidar com todas as coisas que tinha que fazer?",
                    "Conseguiu controlar as irritações em sua vida?",
                    "Sentiu que as coisas estavam sob o seu controle?",
                    "Ficou irritado(a) por coisas que estavam fora do seu controle?",
                    "Sentiu que as dificuldades se acumularam tanto que não conseguiria superá-las?",
                ]),
                options: options(&[
                    (0, "Nunca"),
                    (1, "Quase nunca"),
                    (2, "Às vezes"),
                    (3, "Quase sempre"),
                    (4, "Sempre"),
                ]),
                reversed_items: [3, 4, 6, 7].into_iter().collect(),
                thresholds: vec![
                    band(27, "Alto", "Estresse percebido alto", BandTone::Alert),
                    band(14, "Moderado", "Estresse percebido moderado", BandTone::Caution),
                    band(0, "Baixo", "Estresse percebido baixo", BandTone::Positive),
                ],
                polarity: Polarity::HigherIsWorse,
            });
        &DEFINITION
    }
}
