use std::collections::BTreeSet;

use crate::Scale;
use crate::interpretation::BandTone;
use crate::scoring::{Polarity, ScaleDefinition};

use super::{band, options, questions};

/// SWLS: Satisfaction With Life Scale.
/// 5 items rated 1–7. Total 5–35. Higher = greater well-being.
pub struct Swls;

impl Scale for Swls {
    fn definition(&self) -> &ScaleDefinition {
        static DEFINITION: std::sync::LazyLock<ScaleDefinition> =
            std::sync::LazyLock::new(|| ScaleDefinition {
                id: "swls".to_string(),
                name: "Bem-estar Subjetivo (SWLS)".to_string(),
                description: "Indique o quanto você concorda com cada afirmação.".to_string(),
                questions: questions(&[
                    "Na maioria dos aspectos, minha vida é próxima ao meu ideal",
                    "As condições da minha vida são excelentes",
                    "Estou satisfeito(a) com minha vida",
                    "Até agora, tenho conseguido as coisas importantes que quero na vida",
                    "Se pudesse viver minha vida de novo, não mudaria quase nada",
                ]),
                options: options(&[
                    (1, "Discordo totalmente"),
                    (2, "Discordo"),
                    (3, "Discordo ligeiramente"),
                    (4, "Nem concordo nem discordo"),
                    (5, "Concordo ligeiramente"),
                    (6, "Concordo"),
                    (7, "Concordo totalmente"),
                ]),
                reversed_items: BTreeSet::new(),
                thresholds: vec![
                    band(31, "Extremamente satisfeito", "Satisfação com a vida muito alta", BandTone::Positive),
                    band(26, "Satisfeito", "Satisfação com a vida alta", BandTone::Positive),
                    band(21, "Levemente satisfeito", "Satisfação com a vida na média", BandTone::Neutral),
                    band(20, "Neutro", "Nem satisfeito nem insatisfeito", BandTone::Neutral),
                    band(15, "Levemente insatisfeito", "Satisfação um pouco abaixo da média", BandTone::Caution),
                    band(10, "Insatisfeito", "Insatisfação com a vida", BandTone::Caution),
                    band(0, "Extremamente insatisfeito", "Insatisfação com a vida acentuada", BandTone::Alert),
                ],
                polarity: Polarity::HigherIsBetter,
            });
        &DEFINITION
    }
}
