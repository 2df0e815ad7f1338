use crate::grading::{Answers, Level, Role};

pub(super) fn role(code: &str, family: &str, level: Level) -> Role {
    Role::new(code, &format!("{code} ({level})"), family, level)
}

pub(super) fn two_level_family() -> Vec<Role> {
    vec![
        role("HIGH_8", "Werkplaats", 8),
        role("LOW_6", "Werkplaats", 6),
        role("OTHER_7", "Kantoor", 7),
    ]
}

pub(super) fn answers(pairs: &[(&str, u8)]) -> Answers {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}

/// Answers maxing out every question of the standard questionnaire.
pub(super) fn full_marks() -> Answers {
    answers(&[
        ("complexity_0", 2),
        ("complexity_1", 2),
        ("complexity_2", 2),
        ("complexity_3", 3),
        ("complexity_4", 3),
        ("independence_0", 3),
        ("independence_1", 3),
        ("independence_2", 3),
        ("independence_3", 3),
        ("risk_0", 3),
        ("risk_1", 3),
        ("risk_2", 3),
        ("risk_3", 3),
        ("physical_0", 3),
        ("physical_1", 3),
        ("physical_2", 3),
        ("physical_3", 3),
    ])
}
