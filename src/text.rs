use regex::Regex;

// (pattern, replacement), applied in order
const RULES: [(&str, &str); 4] = [
    // no space before punctuation
    (r"\s+([,.!?;:])", "$1"),
    // no space after opening brackets
    (r"([(\[{])\s+", "$1"),
    // no space before closing brackets
    (r"\s+([)\]}])", "$1"),
    (r"\s{2,}", " "),
];

/// Tidies whitespace around punctuation and brackets, collapses whitespace
/// runs into a single space and trims the result.
#[must_use]
pub fn normalize_punctuation_spacing(text: &str) -> String {
    let mut normalized = text.to_string();

    for (pattern, replacement) in RULES {
        if let Ok(re) = Regex::new(pattern) {
            normalized = re.replace_all(&normalized, replacement).into_owned();
        }
    }

    normalized.trim().to_string()
}
