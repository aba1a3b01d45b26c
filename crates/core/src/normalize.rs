//! Display-name normalization.
//!
//! Contributor names arrive in arbitrary Unicode but the credits listing is
//! consumed in plain-ASCII contexts, so names are reduced to their closest
//! ASCII rendering before formatting.

use unicode_normalization::UnicodeNormalization;

/// Reduce a display name to its closest ASCII rendering.
///
/// Applies NFKD compatibility decomposition, then drops every character
/// outside the ASCII range. Decomposition splits accented characters into a
/// base character plus combining marks, so the marks fall away while the
/// base survives ("é" becomes "e"). Characters with no ASCII equivalent at
/// all are simply removed. Surrounding whitespace is trimmed.
///
/// Total and deterministic: every input maps to a defined ASCII string,
/// possibly empty.
pub fn normalize_name(name: &str) -> String {
    let ascii: String = name.nfkd().filter(|c| c.is_ascii()).collect();
    ascii.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize_name("Amélie"), "Amelie");
        assert_eq!(normalize_name("José García"), "Jose Garcia");
        assert_eq!(normalize_name("Łukasz"), "ukasz");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_name("  Jane Doe  "), "Jane Doe");
    }

    #[test]
    fn test_compatibility_decomposition() {
        // \u{FB01} is the "fi" ligature.
        assert_eq!(normalize_name("\u{FB01}sh"), "fish");
    }

    #[test]
    fn test_no_ascii_equivalent_yields_empty() {
        assert_eq!(normalize_name("山田太郎"), "");
    }

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(normalize_name("Jane Doe"), "Jane Doe");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(normalize_name("Ángela Núñez"), normalize_name("Ángela Núñez"));
    }
}
