use std::collections::BTreeSet;

use crate::Scale;
use crate::interpretation::BandTone;
use crate::scoring::{Polarity, ScaleDefinition};

use super::{band, questions, two_week_frequency};

/// GAD-7: Generalized Anxiety Disorder scale.
/// 7 items rated 0–3 over the last two weeks. Total 0–21.
pub struct Gad7;

impl Scale for Gad7 {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> =
            std::sync::LazyLock::new(|| ScaleDefinition {
                id: "gad7".to_string(),
                name: "Ansiedade (GAD-7)".to_string(),
                description: "Nas últimas duas semanas, com que frequência você foi \
                              incomodado(a) pelos problemas abaixo?"
                    .to_string(),
                questions: questions(&[
                    "Sentir-se nervoso(a), ansioso(a) ou muito tenso(a)",
                    "Não ser capaz de impedir ou de controlar as preocupações",
                    "Preocupar-se muito com diversas coisas",
                    "Dificuldade para relaxar",
                    "Ficar tão agitado(a) que se torna difícil permanecer sentado(a)",
                    "Ficar facilmente aborrecido(a) ou irritado(a)",
                    "Sentir medo como se algo horrível fosse acontecer",
                ]),
                options: two_week_frequency(),
                reversed_items: BTreeSet::new(),
                thresholds: vec![
                    band(15, "Severa", "Sintomas de ansiedade severos", BandTone::Alert),
                    band(10, "Moderada", "Sintomas de ansiedade moderados", BandTone::Caution),
                    band(5, "Leve", "Sintomas de ansiedade leves", BandTone::Neutral),
                    band(0, "Mínima", "Ansiedade mínima ou ausente", BandTone::Positive),
                ],
                polarity: Polarity::HigherIsWorse,
            });
        &DEFINITION
    }
}
