use serde::Serialize;

use super::catalog::Role;
use super::levels::Level;

/// Number of ranked roles returned alongside the best match.
pub const MAX_ALTERNATIVES: usize = 5;

/// Closest standard roles for a family and level.
///
/// `alternatives` is the ranked head of the candidate list and therefore starts
/// with `best` whenever one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleMatch {
    pub best: Option<Role>,
    pub alternatives: Vec<Role>,
}

impl RoleMatch {
    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }
}

/// Rank the roles of `family` by distance to `final_level`.
///
/// Equally distant roles are ordered lower level first; remaining ties keep
/// catalog order. A family without roles yields an empty match.
pub fn best_match(family: &str, final_level: Level, catalog: &[Role]) -> RoleMatch {
    let mut candidates: Vec<&Role> = catalog
        .iter()
        .filter(|role| role.family == family)
        .collect();

    candidates.sort_by_key(|role| (role.distance_to(final_level), role.level));

    let alternatives: Vec<Role> = candidates
        .into_iter()
        .take(MAX_ALTERNATIVES)
        .cloned()
        .collect();

    RoleMatch {
        best: alternatives.first().cloned(),
        alternatives,
    }
}
