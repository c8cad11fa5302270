//! Slug generation for trigger identifiers.

use std::sync::OnceLock;

use regex::Regex;

/// Characters replaced during transliteration.
///
/// Each character maps to the character at the same position in [`PLAIN`].
const ACCENTED: &str = "àáäâãåăæąçćčđďèéěėëêęğǵḧìíïîįłḿǹńňñòóöôœøṕŕřßşśšșťțùúüûǘůűūųẃẍÿýźžż·/_,:;";

/// Replacements for [`ACCENTED`], position for position.
const PLAIN: &str = "aaaaaaaaacccddeeeeeeegghiiiiilmnnnnooooooprrsssssttuuuuuuuuuwxyyzzz------";

struct SlugPatterns {
    whitespace: Regex,
    disallowed: Regex,
    hyphens: Regex,
}

fn patterns() -> &'static SlugPatterns {
    static PATTERNS: OnceLock<SlugPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SlugPatterns {
        whitespace: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        disallowed: Regex::new(r"[^A-Za-z0-9_\-]+").expect("disallowed pattern is valid"),
        hyphens: Regex::new(r"-{2,}").expect("hyphen pattern is valid"),
    })
}

fn transliterate(c: char) -> char {
    if c == '&' {
        return '-';
    }
    ACCENTED
        .chars()
        .position(|accented| accented == c)
        .and_then(|index| PLAIN.chars().nth(index))
        .unwrap_or(c)
}

/// Create a slug from any string.
///
/// The result only contains lower-case ASCII letters, digits and single
/// hyphens, and never starts or ends with a hyphen. A result may start with
/// a digit, and punctuation-only input yields an empty string.
///
/// # Example
///
/// ```
/// use wf_accordion_core::slugify;
///
/// assert_eq!(slugify("Hørßt"), "horst");
/// assert_eq!(slugify("An- und Abreise"), "an-und-abreise");
/// assert_eq!(slugify("2020"), "2020");
/// ```
pub fn slugify(text: &str) -> String {
    let patterns = patterns();

    let lowered = text.to_lowercase();
    let hyphenated = patterns.whitespace.replace_all(&lowered, "-");
    let transliterated: String = hyphenated.chars().map(transliterate).collect();
    let stripped = patterns.disallowed.replace_all(&transliterated, "");
    let collapsed = patterns.hyphens.replace_all(&stripped, "-");

    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliteration_table_is_aligned() {
        assert_eq!(ACCENTED.chars().count(), PLAIN.chars().count());
    }

    #[test]
    fn known_inputs() {
        let data = [
            ("Hørßt", "horst"),
            ("!imp:ort;ant*", "imp-ort-ant"),
            ("2020", "2020"),
            ("Hallo Welt", "hallo-welt"),
            ("An- und Abreise", "an-und-abreise"),
            ("Under_score", "under-score"),
            ("Q&A", "q-a"),
            ("Crème brûlée", "creme-brulee"),
            ("\n    Title\n  ", "title"),
        ];

        for (input, expected) in data {
            assert_eq!(slugify(input), expected, "slug of {input:?}");
        }
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(slugify("?!*"), "");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify(" - "), "");
    }

    #[test]
    fn non_latin_text_is_dropped() {
        assert_eq!(slugify("日本 Guide"), "guide");
    }
}
