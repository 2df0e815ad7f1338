use serde::{Deserialize, Serialize};

use super::levels::{clamp_level, Level};

/// Physical level distance from the core average that moves the final level.
const PHYSICAL_PUSH_THRESHOLD: i32 = 2;

/// How the final level was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionBasis {
    /// At least two of the three core characteristics agree.
    CoreMajority { level: Level },
    PhysicalPushUp,
    PhysicalPushDown,
    CoreAverage,
}

impl DecisionBasis {
    pub fn summary(&self) -> String {
        match self {
            DecisionBasis::CoreMajority { level } => format!(
                "Decisive: 2 of 3 core characteristics indicate level {level}."
            ),
            DecisionBasis::PhysicalPushUp => {
                "Borderline case: physical aspects push the level one step up.".to_string()
            }
            DecisionBasis::PhysicalPushDown => {
                "Borderline case: physical aspects push the level one step down.".to_string()
            }
            DecisionBasis::CoreAverage => {
                "No clear majority: level set to the average of the core characteristics."
                    .to_string()
            }
        }
    }
}

/// Final function level with the basis it was decided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDecision {
    pub final_level: Level,
    pub basis: DecisionBasis,
}

impl LevelDecision {
    pub fn rationale(&self) -> String {
        self.basis.summary()
    }
}

/// Reconcile four characteristic levels into one function level.
///
/// Complexity, independence, and risk vote; any level held by two of them
/// wins outright. Without a majority the rounded core mean is used, moved one
/// step towards the physical level when that differs from the mean by two or
/// more. The mean is rounded half away from zero.
pub fn reconcile(
    complexity: Level,
    independence: Level,
    risk: Level,
    physical: Level,
) -> LevelDecision {
    let core = [complexity, independence, risk];

    let mut candidates = core;
    candidates.sort_unstable();
    for candidate in candidates {
        if core.iter().filter(|&&level| level == candidate).count() >= 2 {
            return LevelDecision {
                final_level: candidate,
                basis: DecisionBasis::CoreMajority { level: candidate },
            };
        }
    }

    let mean = core.iter().map(|&level| f64::from(level)).sum::<f64>() / core.len() as f64;
    let average = i32::from(clamp_level(mean.round() as i32));
    let physical = i32::from(physical);

    if physical >= average + PHYSICAL_PUSH_THRESHOLD {
        LevelDecision {
            final_level: clamp_level(average + 1),
            basis: DecisionBasis::PhysicalPushUp,
        }
    } else if physical <= average - PHYSICAL_PUSH_THRESHOLD {
        LevelDecision {
            final_level: clamp_level(average - 1),
            basis: DecisionBasis::PhysicalPushDown,
        }
    } else {
        LevelDecision {
            final_level: clamp_level(average),
            basis: DecisionBasis::CoreAverage,
        }
    }
}
