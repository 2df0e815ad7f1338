//! Function grade scoring core.
//!
//! Raw survey scores are classified into one level per characteristic, the four
//! levels are reconciled into a single function level, and the closest standard
//! role within the chosen family is selected. Everything in here is pure; the
//! only shared data is the read-only [`RoleCatalog`].

mod catalog;
mod classifier;
pub mod domain;
mod engine;
mod levels;
mod matcher;
mod questionnaire;
mod reconcile;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, Role, RoleCatalog};
pub use classifier::{classify, TOP_CLASSIFIED_LEVEL};
pub use domain::{Characteristic, CharacteristicLevels, RawScores};
pub use engine::{GradeOutcome, GradingEngine, RankedRole};
pub use levels::{clamp_level, is_allowed_level, Level, ALLOWED_LEVELS, MAX_LEVEL, MIN_LEVEL};
pub use matcher::{best_match, RoleMatch, MAX_ALTERNATIVES};
pub use questionnaire::{Answers, Question, QuestionSection, Questionnaire, QuestionnaireError};
pub use reconcile::{reconcile, DecisionBasis, LevelDecision};
