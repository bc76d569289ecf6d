// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Deriving the alternate name forms a dataset did not ship.
//!
//! Datasets normally carry all three representations precomputed. When a
//! file lacks the accent-stripped or uppercase column, the loader derives it
//! here so the filter matcher still sees three forms per record.

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Strip diacritics, keeping case and spacing intact.
///
/// - "Besançon" → "Besancon"
/// - "Zürich" → "Zurich"
/// - "Saint-Étienne" → "Saint-Etienne"
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks
/// 3. NFC recompose whatever is left
///
/// Without the feature the input is returned unchanged: the name is assumed to
/// be pre-normalized.
#[cfg(feature = "unicode-normalization")]
pub fn strip_diacritics(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

#[cfg(not(feature = "unicode-normalization"))]
pub fn strip_diacritics(value: &str) -> String {
    value.to_string()
}

/// Uppercase form as the datasets spell it ("Besançon" → "BESANÇON").
pub fn uppercase(value: &str) -> String {
    value.to_uppercase()
}

/// Check if a character is a combining mark (diacritic).
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
