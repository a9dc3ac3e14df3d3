//! Case-shape helpers
//!
//! The translation backend tends to normalize letter case, so the protocol
//! records the shape of the original text (all upper-case, or every word
//! capitalized) and forces the same shape back onto the results.

/// Lower-case the whole string, then capitalize the first character.
pub fn uppercase_first(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    let mut result = String::with_capacity(lower.len());
    if let Some(first) = chars.next() {
        result.extend(first.to_uppercase());
        result.extend(chars);
    }
    result
}

/// Capitalize the first letter of every whitespace-separated word and
/// lower-case the rest, e.g. "hello WORLD" becomes "Hello World".
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            word_start = true;
            result.push(c);
        } else if word_start {
            result.extend(c.to_uppercase());
            word_start = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}

/// True when the text contains letters and they are all upper-case.
pub(crate) fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && s.to_uppercase() == s
}

/// True when every word in the text is already capitalized.
pub(crate) fn is_title(s: &str) -> bool {
    !s.is_empty() && title_case(s) == s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_first() {
        assert_eq!(uppercase_first("hello world"), "Hello world");
        assert_eq!(uppercase_first("HELLO WORLD"), "Hello world");
        assert_eq!(uppercase_first(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello world"), "Hello World");
        assert_eq!(title_case("HELLO WORLD"), "Hello World");
        assert_eq!(title_case("already Title"), "Already Title");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_preserves_whitespace() {
        assert_eq!(title_case("two  spaces\tand tab"), "Two  Spaces\tAnd Tab");
    }

    #[test]
    fn test_is_upper() {
        assert!(is_upper("HELLO"));
        assert!(is_upper("HELLO WORLD!"));
        assert!(!is_upper("Hello"));
        // No letters at all does not count as an upper-case shape
        assert!(!is_upper("123"));
        assert!(!is_upper(""));
    }

    #[test]
    fn test_is_title() {
        assert!(is_title("Hello World"));
        assert!(is_title("Hello"));
        assert!(!is_title("Hello world"));
        assert!(!is_title("HELLO"));
        assert!(!is_title(""));
    }
}
