use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::grading::{
    Answers, CharacteristicLevels, DecisionBasis, GradeOutcome, Level, RankedRole, RawScores,
};

/// Identifier wrapper for registered employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered employee with at most one saved assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub notes: String,
    /// Absent, `null` and `{}` all mean "not assessed yet".
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "assessment_slot::deserialize"
    )]
    pub assessment: Option<Assessment>,
}

impl Employee {
    /// Label used in selection lists, e.g. `Jan de Vries (Montage)`.
    pub fn display_label(&self) -> String {
        if self.department.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.department)
        }
    }
}

/// Input for registering an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub notes: String,
}

/// Reviewer input for grading without saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub family: String,
    #[serde(default)]
    pub answers: Answers,
}

/// Reviewer input for a scoring session saved against an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub family: String,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub review_note: String,
}

/// Saved grading result, replaced on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAssessment")]
pub struct Assessment {
    pub family: String,
    pub scores: RawScores,
    pub levels: CharacteristicLevels,
    pub final_level: Level,
    pub basis: DecisionBasis,
    pub rationale: String,
    pub best_role_code: String,
    pub best_role_title: String,
    pub alternatives: Vec<RankedRole>,
    pub review_note: String,
    pub answers: Answers,
    #[serde(serialize_with = "saved_at_format::serialize")]
    pub saved_at: NaiveDateTime,
}

/// On-disk shape of an assessment. Records written before the decision basis
/// was stored carry no `basis`; it is recomputed from the stored levels.
#[derive(Deserialize)]
struct StoredAssessment {
    family: String,
    scores: RawScores,
    levels: CharacteristicLevels,
    final_level: Level,
    #[serde(default)]
    basis: Option<DecisionBasis>,
    #[serde(default)]
    rationale: String,
    #[serde(default)]
    best_role_code: String,
    #[serde(default)]
    best_role_title: String,
    #[serde(default)]
    alternatives: Vec<RankedRole>,
    #[serde(default)]
    review_note: String,
    #[serde(default)]
    answers: Answers,
    #[serde(with = "saved_at_format")]
    saved_at: NaiveDateTime,
}

impl From<StoredAssessment> for Assessment {
    fn from(stored: StoredAssessment) -> Self {
        let basis = stored
            .basis
            .unwrap_or_else(|| stored.levels.reconcile().basis);
        Self {
            family: stored.family,
            scores: stored.scores,
            levels: stored.levels,
            final_level: stored.final_level,
            basis,
            rationale: stored.rationale,
            best_role_code: stored.best_role_code,
            best_role_title: stored.best_role_title,
            alternatives: stored.alternatives,
            review_note: stored.review_note,
            answers: stored.answers,
            saved_at: stored.saved_at,
        }
    }
}

/// `{}` marks an employee without an assessment in the data file.
mod assessment_slot {
    use serde::{Deserialize, Deserializer};

    use super::Assessment;

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Empty {}

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Slot {
        Saved(Box<Assessment>),
        Empty(Empty),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Assessment>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Slot>::deserialize(deserializer)? {
            Some(Slot::Saved(assessment)) => Some(*assessment),
            Some(Slot::Empty(_)) | None => None,
        })
    }
}

/// `saved_at` is stored as `%Y-%m-%d %H:%M:%S`; ISO timestamps are accepted
/// on read.
mod saved_at_format {
    use chrono::NaiveDateTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub(super) fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| raw.parse::<NaiveDateTime>())
            .map_err(D::Error::custom)
    }
}

impl Assessment {
    pub fn from_outcome(
        outcome: GradeOutcome,
        answers: Answers,
        review_note: &str,
        saved_at: NaiveDateTime,
    ) -> Self {
        let saved_at = saved_at.trunc_subsecs(0);
        let (best_role_code, best_role_title) = match &outcome.best_role {
            Some(role) => (role.code.clone(), role.title.clone()),
            None => (String::new(), String::new()),
        };

        Self {
            family: outcome.family,
            scores: outcome.scores,
            levels: outcome.levels,
            final_level: outcome.final_level,
            basis: outcome.basis,
            rationale: outcome.rationale,
            best_role_code,
            best_role_title,
            alternatives: outcome.alternatives,
            review_note: review_note.trim().to_string(),
            answers,
            saved_at,
        }
    }
}
