use ratatui::style::Color;

/// Exact-name country colors. Anything not listed here falls back to the
/// position-indexed palette, so an unmapped team keeps one color within a
/// chart but may differ across independent charts.
const COUNTRY_COLORS: &[(&str, Color)] = &[
    ("India", Color::Blue),
    ("Australia", Color::Yellow),
    ("England", Color::Red),
    ("Pakistan", Color::Green),
    ("New Zealand", Color::Gray),
    ("South Africa", Color::LightGreen),
    ("Sri Lanka", Color::LightBlue),
    ("West Indies", Color::Magenta),
    ("Bangladesh", Color::LightRed),
    ("Afghanistan", Color::LightCyan),
    ("Zimbabwe", Color::LightYellow),
    ("Ireland", Color::LightMagenta),
];

const FALLBACK_PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightGreen,
    Color::White,
];

/// Default pair for the phase chart when a team has no registered color:
/// first slot green, second slot red.
pub const PHASE_DEFAULT_PAIR: [Color; 2] = [Color::Green, Color::Red];

pub fn country_color(team: &str) -> Option<Color> {
    COUNTRY_COLORS
        .iter()
        .find(|(name, _)| *name == team)
        .map(|(_, color)| *color)
}

pub fn fallback_color(dataset_index: usize) -> Color {
    FALLBACK_PALETTE[dataset_index % FALLBACK_PALETTE.len()]
}

pub fn series_color(team: &str, dataset_index: usize) -> Color {
    country_color(team).unwrap_or_else(|| fallback_color(dataset_index))
}

pub fn phase_slot_color(team: &str, slot: usize) -> Color {
    country_color(team).unwrap_or(PHASE_DEFAULT_PAIR[slot.min(1)])
}
