use std::collections::BTreeSet;

use crate::Scale;
use crate::interpretation::BandTone;
use crate::scoring::{Polarity, ScaleDefinition};

use super::{band, questions, two_week_frequency};

/// PHQ-9: Patient Health Questionnaire, depression module.
/// 9 items rated 0–3 over the last two weeks. Total 0–27.
pub struct Phq9;

impl Scale for Phq9 {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> =
            std::sync::LazyLock::new(|| ScaleDefinition {
                id: "phq9".to_string(),
                name: "Depressão (PHQ-9)".to_string(),
                description: "Nas últimas duas semanas, com que frequência você foi \
                              incomodado(a) pelos problemas abaixo?"
                    .to_string(),
                questions: questions(&[
                    "Pouco interesse ou pouco prazer em fazer as coisas",
                    "Sentir-se para baixo, deprimido(a) ou sem perspectiva",
                    "Dificuldade para pegar no sono ou permanecer dormindo, ou dormir mais do que de costume",
                    "Sentir-se cansado(a) ou com pouca energia",
                    "Falta de apetite ou comer demais",
                    "Sentir-se mal consigo mesmo(a), achar que é um fracasso ou que decepcionou sua família",
                    "Dificuldade para se concentrar nas coisas, como ler ou ver televisão",
                    "Lentidão para se movimentar ou falar, ou agitação fora do comum",
                    "Pensar em se ferir de alguma maneira ou que seria melhor estar morto(a)",
                ]),
                options: two_week_frequency(),
                reversed_items: BTreeSet::new(),
                thresholds: vec![
                    band(20, "Severa", "Sintomas depressivos severos", BandTone::Alert),
                    band(
                        15,
                        "Moderadamente severa",
                        "Sintomas depressivos moderadamente severos",
                        BandTone::Alert,
                    ),
                    band(10, "Moderada", "Sintomas depressivos moderados", BandTone::Caution),
                    band(5, "Leve", "Sintomas depressivos leves", BandTone::Neutral),
                    band(0, "Mínima", "Sintomas depressivos mínimos", BandTone::Positive),
                ],
                polarity: Polarity::HigherIsWorse,
            });
        &DEFINITION
    }
}
