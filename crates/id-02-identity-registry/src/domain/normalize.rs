//! Access-record IDs are contract names folded so that spelling variants
//! (`"Org Identity"`, `"org.identity"` vs. `"ORG  IDÉNTITY"`) land on one key.

use unicode_normalization::{char::canonical_combining_class, UnicodeNormalization};

/// Lowercase, strip nonspacing diacritics and remove all whitespace.
///
/// Spacing marks (combining class 0, e.g. Devanagari vowel signs) are kept.
pub fn normalize_access_name(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| canonical_combining_class(*c) == 0 && !c.is_whitespace())
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_case_accents_and_spaces() {
        assert_eq!(normalize_access_name("Org Identity"), "orgidentity");
        assert_eq!(normalize_access_name("  Energía\tY Minas "), "energiayminas");
        assert_eq!(normalize_access_name("org.identity"), "org.identity");
        assert_eq!(normalize_access_name("ÑANDÚ"), "nandu");
    }

    #[test]
    fn test_keeps_spacing_marks() {
        assert_eq!(normalize_access_name("काम"), "काम");
        assert_eq!(normalize_access_name("Café Bar"), "cafebar");
    }

    #[test]
    fn test_is_idempotent() {
        let once = normalize_access_name("Ministério de Energía");
        assert_eq!(normalize_access_name(&once), once);
    }
}
