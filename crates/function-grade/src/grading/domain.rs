use serde::{Deserialize, Serialize};

use super::classifier::classify;
use super::levels::Level;
use super::reconcile::{reconcile, LevelDecision};

/// The four scored survey dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    Complexity,
    Independence,
    Risk,
    Physical,
}

impl Characteristic {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Complexity,
            Self::Independence,
            Self::Risk,
            Self::Physical,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Complexity => "Complexity",
            Self::Independence => "Independence",
            Self::Risk => "Risk of damage",
            Self::Physical => "Physical aspects",
        }
    }

    /// Prefix used for the answer keys of this characteristic's questions.
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Complexity => "complexity",
            Self::Independence => "independence",
            Self::Risk => "risk",
            Self::Physical => "physical",
        }
    }

    /// Complexity, independence, and risk vote on the final level; physical
    /// aspects only break ties.
    pub const fn is_core(self) -> bool {
        !matches!(self, Self::Physical)
    }
}

/// Summed answers per characteristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScores {
    #[serde(alias = "complexity_score")]
    pub complexity: u16,
    #[serde(alias = "independence_score")]
    pub independence: u16,
    #[serde(alias = "risk_score")]
    pub risk: u16,
    #[serde(alias = "physical_score")]
    pub physical: u16,
}

impl RawScores {
    pub fn get(&self, characteristic: Characteristic) -> u16 {
        match characteristic {
            Characteristic::Complexity => self.complexity,
            Characteristic::Independence => self.independence,
            Characteristic::Risk => self.risk,
            Characteristic::Physical => self.physical,
        }
    }

    pub(crate) fn add(&mut self, characteristic: Characteristic, points: u16) {
        let slot = match characteristic {
            Characteristic::Complexity => &mut self.complexity,
            Characteristic::Independence => &mut self.independence,
            Characteristic::Risk => &mut self.risk,
            Characteristic::Physical => &mut self.physical,
        };
        *slot = slot.saturating_add(points);
    }

    pub fn classify(&self) -> CharacteristicLevels {
        CharacteristicLevels {
            complexity: classify(self.complexity),
            independence: classify(self.independence),
            risk: classify(self.risk),
            physical: classify(self.physical),
        }
    }
}

/// Level indication per characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicLevels {
    #[serde(alias = "complexity_level")]
    pub complexity: Level,
    #[serde(alias = "independence_level")]
    pub independence: Level,
    #[serde(alias = "risk_level")]
    pub risk: Level,
    #[serde(alias = "physical_level")]
    pub physical: Level,
}

impl CharacteristicLevels {
    pub fn get(&self, characteristic: Characteristic) -> Level {
        match characteristic {
            Characteristic::Complexity => self.complexity,
            Characteristic::Independence => self.independence,
            Characteristic::Risk => self.risk,
            Characteristic::Physical => self.physical,
        }
    }

    pub fn reconcile(&self) -> LevelDecision {
        reconcile(self.complexity, self.independence, self.risk, self.physical)
    }
}
