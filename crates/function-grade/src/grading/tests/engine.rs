use std::sync::Arc;

use super::common::*;
use crate::grading::{
    DecisionBasis, GradingEngine, Questionnaire, RawScores, RoleCatalog,
};

#[test]
fn grade_runs_classification_reconciliation_and_matching() {
    let engine = GradingEngine::standard();
    let scores = RawScores {
        complexity: 6,
        independence: 5,
        risk: 9,
        physical: 1,
    };

    let outcome = engine.grade("Montage", scores);

    assert_eq!(outcome.levels.complexity, 5);
    assert_eq!(outcome.levels.independence, 5);
    assert_eq!(outcome.levels.risk, 7);
    assert_eq!(outcome.levels.physical, 3);
    assert_eq!(outcome.final_level, 5);
    assert_eq!(outcome.basis, DecisionBasis::CoreMajority { level: 5 });
    assert_eq!(outcome.rationale, outcome.basis.summary());

    let best = outcome.best_role.as_ref().expect("best role");
    assert_eq!(best.code, "MON_5");
    assert_eq!(best.distance, 0);
    assert_eq!(outcome.best_role_title(), "Monteur (5)");
    assert_eq!(outcome.alternatives.len(), 5);
    assert_eq!(outcome.alternatives[0], *best);
    assert!(outcome
        .alternatives
        .windows(2)
        .all(|pair| pair[0].distance <= pair[1].distance));
}

#[test]
fn grade_without_family_roles_has_no_suggestion() {
    let engine = GradingEngine::new(
        Arc::new(RoleCatalog::from_roles(two_level_family()).expect("valid roles")),
        Questionnaire::standard(),
    );

    let outcome = engine.grade("Projectleiding", RawScores::default());

    assert_eq!(outcome.final_level, 3);
    assert!(outcome.best_role.is_none());
    assert!(outcome.alternatives.is_empty());
    assert_eq!(outcome.best_role_title(), "");
}

#[test]
fn grade_answers_scores_questionnaire_first() {
    let engine = GradingEngine::standard();

    let outcome = engine
        .grade_answers("Projectleiding", &full_marks())
        .expect("valid answers");

    assert_eq!(outcome.scores.complexity, 12);
    assert_eq!(outcome.final_level, 8);
    assert_eq!(
        outcome.best_role.expect("best role").code,
        "UITV_8"
    );
}

#[test]
fn grade_answers_propagates_questionnaire_errors() {
    let engine = GradingEngine::standard();

    assert!(engine
        .grade_answers("Montage", &answers(&[("risk_0", 4)]))
        .is_err());
}
