//! Side-to-move resolution from the free-form `turn` hint.

use shakmaty::Color;

/// Resolve a free-form turn hint into a color.
///
/// Only a trimmed, case-insensitive `"white"` resolves to White; every
/// other value, including the empty string, resolves to Black. The
/// permissive default is long-standing client-facing behavior and is
/// kept as is.
pub fn resolve(hint: &str) -> Color {
    if hint.trim().eq_ignore_ascii_case("white") {
        Color::White
    } else {
        Color::Black
    }
}
