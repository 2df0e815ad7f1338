use super::levels::Level;

/// Inclusive upper score bound of each band and the level it indicates.
const SCORE_BANDS: [(u16, Level); 5] = [(2, 3), (4, 4), (6, 5), (8, 6), (10, 7)];

/// Level for any score above the last band.
pub const TOP_CLASSIFIED_LEVEL: Level = 8;

/// Map a raw characteristic score to a level indication.
///
/// Every characteristic shares the same step function, so scores above the
/// highest band saturate at [`TOP_CLASSIFIED_LEVEL`] instead of being rejected.
pub fn classify(score: u16) -> Level {
    SCORE_BANDS
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map(|(_, level)| *level)
        .unwrap_or(TOP_CLASSIFIED_LEVEL)
}
