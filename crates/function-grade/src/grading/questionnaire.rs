use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Characteristic, RawScores};

/// Answer value per question key (for example `complexity_0`).
pub type Answers = BTreeMap<String, u8>;

/// One survey question scored from zero to `max`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub key: String,
    pub label: String,
    pub max: u8,
}

/// The questions contributing to a single characteristic score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSection {
    pub characteristic: Characteristic,
    pub questions: Vec<Question>,
}

impl QuestionSection {
    fn new(characteristic: Characteristic, questions: &[(&str, u8)]) -> Self {
        let questions = questions
            .iter()
            .enumerate()
            .map(|(index, (label, max))| Question {
                key: format!("{}_{index}", characteristic.key_prefix()),
                label: (*label).to_string(),
                max: *max,
            })
            .collect();
        Self {
            characteristic,
            questions,
        }
    }

    pub fn max_score(&self) -> u16 {
        self.questions
            .iter()
            .map(|question| u16::from(question.max))
            .sum()
    }
}

/// Survey definition turning answers into raw characteristic scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub sections: Vec<QuestionSection>,
}

impl Questionnaire {
    pub fn standard() -> Self {
        Self {
            sections: vec![
                QuestionSection::new(
                    Characteristic::Complexity,
                    &[
                        ("Work is mostly standard (0) vs regularly custom or varied (2)", 2),
                        ("Combines multiple techniques or systems (2)", 2),
                        ("Frequent switching, interruptions, or time pressure (2)", 2),
                        ("Problems require analysis and trade-offs (3)", 3),
                        ("Choices have commercial or financial impact (3)", 3),
                    ],
                ),
                QuestionSection::new(
                    Characteristic::Independence,
                    &[
                        ("Instructions determine the approach (0) vs wide personal freedom (3)", 3),
                        ("Plans own work and decides the order (3)", 3),
                        ("Makes decisions affecting the project or others (3)", 3),
                        ("Gives (functional) direction to others (3)", 3),
                    ],
                ),
                QuestionSection::new(
                    Characteristic::Risk,
                    &[
                        ("Errors: limited loss of time or material (0) vs major damage (3)", 3),
                        ("Errors can affect the customer relationship or reputation (3)", 3),
                        ("Errors can have serious financial consequences or claims (3)", 3),
                        ("Discretion or confidentiality required (3)", 3),
                    ],
                ),
                QuestionSection::new(
                    Characteristic::Physical,
                    &[
                        ("Light (0) vs regularly heavy or unpleasant work (3)", 3),
                        ("Hazardous situations such as heights, falls, or chemicals (3)", 3),
                        ("Structurally heavy or hazardous work (>25% of the time) (3)", 3),
                        ("Protective equipment or unpleasant conditions regularly required (3)", 3),
                    ],
                ),
            ],
        }
    }

    pub fn section(&self, characteristic: Characteristic) -> Option<&QuestionSection> {
        self.sections
            .iter()
            .find(|section| section.characteristic == characteristic)
    }

    pub fn question(&self, key: &str) -> Option<(Characteristic, &Question)> {
        self.sections.iter().find_map(|section| {
            section
                .questions
                .iter()
                .find(|question| question.key == key)
                .map(|question| (section.characteristic, question))
        })
    }

    /// Sum the answers per characteristic. Unanswered questions count as zero.
    pub fn score(&self, answers: &Answers) -> Result<RawScores, QuestionnaireError> {
        let mut scores = RawScores::default();
        for (key, value) in answers {
            let (characteristic, question) = self
                .question(key)
                .ok_or_else(|| QuestionnaireError::UnknownQuestion { key: key.clone() })?;
            if *value > question.max {
                return Err(QuestionnaireError::AnswerOutOfRange {
                    key: key.clone(),
                    value: *value,
                    max: question.max,
                });
            }
            scores.add(characteristic, u16::from(*value));
        }
        Ok(scores)
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("unknown question '{key}'")]
    UnknownQuestion { key: String },
    #[error("answer {value} for '{key}' exceeds the maximum of {max}")]
    AnswerOutOfRange { key: String, value: u8, max: u8 },
}
