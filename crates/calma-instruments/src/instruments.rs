//! Built-in scales.

pub mod gad7;
pub mod phq9;
pub mod pss10;
pub mod swls;

use crate::interpretation::{BandTone, InterpretationBand, Threshold};
use crate::scoring::{AnswerOption, Question};

fn questions(texts: &[&str]) -> Vec<Question> {
    texts
        .iter()
        .map(|text| Question {
            text: text.to_string(),
        })
        .collect()
}

fn options(pairs: &[(i32, &str)]) -> Vec<AnswerOption> {
    pairs
        .iter()
        .map(|(value, label)| AnswerOption {
            value: *value,
            label: label.to_string(),
        })
        .collect()
}

fn band(min_score: i32, level: &str, description: &str, tone: BandTone) -> Threshold {
    Threshold {
        min_score,
        band: InterpretationBand {
            level: level.to_string(),
            description: description.to_string(),
            tone,
        },
    }
}

/// Frequency options shared by the two-week symptom checklists.
fn two_week_frequency() -> Vec<AnswerOption> {
    options(&[
        (0, "Nenhuma vez"),
        (1, "Vários dias"),
        (2, "Mais da metade dos dias"),
        (3, "Quase todos os dias"),
    ])
}
