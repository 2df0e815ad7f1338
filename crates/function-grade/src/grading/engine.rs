use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::{Role, RoleCatalog};
use super::domain::{CharacteristicLevels, RawScores};
use super::levels::Level;
use super::questionnaire::{Answers, Questionnaire, QuestionnaireError};
use super::reconcile::DecisionBasis;

/// Stateless grader combining the questionnaire and the role catalog.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    catalog: Arc<RoleCatalog>,
    questionnaire: Questionnaire,
}

impl GradingEngine {
    pub fn new(catalog: Arc<RoleCatalog>, questionnaire: Questionnaire) -> Self {
        Self {
            catalog,
            questionnaire,
        }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(RoleCatalog::standard()), Questionnaire::standard())
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Classify, reconcile, and match a set of raw scores.
    pub fn grade(&self, family: &str, scores: RawScores) -> GradeOutcome {
        let levels = scores.classify();
        let decision = levels.reconcile();
        let matched = self.catalog.best_match(family, decision.final_level);

        let best_role = matched
            .best
            .as_ref()
            .map(|role| RankedRole::from_role(role, decision.final_level));
        let alternatives = matched
            .alternatives
            .iter()
            .map(|role| RankedRole::from_role(role, decision.final_level))
            .collect();

        GradeOutcome {
            family: family.to_string(),
            scores,
            levels,
            final_level: decision.final_level,
            basis: decision.basis,
            rationale: decision.rationale(),
            best_role,
            alternatives,
        }
    }

    pub fn grade_answers(
        &self,
        family: &str,
        answers: &Answers,
    ) -> Result<GradeOutcome, QuestionnaireError> {
        let scores = self.questionnaire.score(answers)?;
        Ok(self.grade(family, scores))
    }
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Role reference with its distance to the decided level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRole {
    pub code: String,
    pub title: String,
    pub level: Level,
    pub distance: u8,
}

impl RankedRole {
    fn from_role(role: &Role, final_level: Level) -> Self {
        Self {
            code: role.code.clone(),
            title: role.title.clone(),
            level: role.level,
            distance: role.distance_to(final_level),
        }
    }
}

/// Full grading result for one family and set of scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeOutcome {
    pub family: String,
    pub scores: RawScores,
    pub levels: CharacteristicLevels,
    pub final_level: Level,
    pub basis: DecisionBasis,
    pub rationale: String,
    pub best_role: Option<RankedRole>,
    pub alternatives: Vec<RankedRole>,
}

impl GradeOutcome {
    pub fn best_role_title(&self) -> &str {
        self.best_role
            .as_ref()
            .map(|role| role.title.as_str())
            .unwrap_or("")
    }
}
