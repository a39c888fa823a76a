//! Static colour palette served alongside each snapshot.

use crate::types::Theme;

/// The default palette.
pub fn palette() -> Theme {
    Theme {
        name: "scarlet".to_string(),
        background: "#1b1b1f".to_string(),
        surface: "#26262c".to_string(),
        text: "#f2f2f2".to_string(),
        accent: "#bb0000".to_string(),
        muted: "#8a8a93".to_string(),
    }
}

/// Whether every colour in the palette is a `#rgb` or `#rrggbb` hex string.
pub fn is_valid(theme: &Theme) -> bool {
    [
        &theme.background,
        &theme.surface,
        &theme.text,
        &theme.accent,
        &theme.muted,
    ]
    .iter()
    .all(|c| is_hex_colour(c))
}

fn is_hex_colour(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
