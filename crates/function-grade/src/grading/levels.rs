/// A function grade. Only values from [`ALLOWED_LEVELS`] are ever produced.
pub type Level = u8;

/// The valid function grades, ascending.
pub const ALLOWED_LEVELS: [Level; 8] = [3, 4, 5, 6, 7, 8, 9, 10];

pub const MIN_LEVEL: Level = ALLOWED_LEVELS[0];
pub const MAX_LEVEL: Level = ALLOWED_LEVELS[ALLOWED_LEVELS.len() - 1];

/// Clamp a computed level into `[MIN_LEVEL, MAX_LEVEL]`.
///
/// Only the bounds are enforced; the grade scale is contiguous so every
/// integer in between is a valid grade.
pub fn clamp_level(level: i32) -> Level {
    level.clamp(i32::from(MIN_LEVEL), i32::from(MAX_LEVEL)) as Level
}

pub fn is_allowed_level(level: Level) -> bool {
    ALLOWED_LEVELS.contains(&level)
}
