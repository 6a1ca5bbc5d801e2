//! Custom patterns run in the visitor's browser as a JavaScript `RegExp`, so
//! the preview accepts a pattern only when both sides read it the same way.
//!
//! `fancy-regex` covers the lookaround and backreferences the browser
//! supports. Syntax it shares with the `regex` crate but the browser rejects
//! or reads differently (inline flags, `(?P<..>)` groups, `\A`/`\z`, Unicode
//! classes without the `u` flag, class set operations) is refused up front.

use fancy_regex::Regex;

/// Compiles `pattern` for the preview, or explains why the browser would
/// not run it the same way.
pub fn browser_pattern(pattern: &str) -> Result<Regex, String> {
    if let Some(reason) = browser_incompatibility(pattern) {
        return Err(reason);
    }
    Regex::new(pattern).map_err(|e| e.to_string())
}

/// Whether `text` matches. A pattern the browser would not run constrains
/// nothing, and neither does a match that gives up on backtracking.
pub fn matches(pattern: &str, text: &str) -> bool {
    match browser_pattern(pattern) {
        Ok(re) => re.is_match(text).unwrap_or(true),
        Err(_) => true,
    }
}

fn browser_incompatibility(pattern: &str) -> Option<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match c {
            '\\' => {
                match next {
                    Some(e @ ('A' | 'z' | 'Z')) if !in_class => {
                        return Some(format!("\\{} is not supported in the browser", e));
                    }
                    Some(e @ ('p' | 'P')) => {
                        return Some(format!("\\{} classes are not supported in the browser", e));
                    }
                    _ => {}
                }
                i += 2;
                continue;
            }
            '[' if in_class && next == Some(':') => {
                return Some("POSIX classes like [:alpha:] are not supported in the browser".into());
            }
            '[' if in_class => {
                return Some("nested classes are not supported in the browser; escape the [".into());
            }
            '[' => {
                in_class = true;
                if next == Some('^') {
                    i += 1;
                }
                // the browser reads [] and [^] as complete classes
                if chars.get(i + 1) == Some(&']') {
                    return Some("empty classes like [] and [^] are not supported".into());
                }
            }
            ']' if in_class => in_class = false,
            '&' | '~' | '-' if in_class && next == Some(c) => {
                return Some(format!("class operator {}{} is not supported in the browser", c, c));
            }
            '(' if !in_class && next == Some('?') => {
                match chars.get(i + 2).copied() {
                    Some('P') => {
                        return Some("(?P...) groups are not supported in the browser; use (?<name>...)".into());
                    }
                    Some(f) if "imsxuUR-".contains(f) => {
                        return Some("inline flags like (?i) are not supported in the browser".into());
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookahead_is_accepted() {
        let re = browser_pattern(r"^(?=.*\d).{8,}$").unwrap();
        assert!(re.is_match("abcdefg1").unwrap());
        assert!(!re.is_match("abcdefgh").unwrap());
    }

    #[test]
    fn backreferences_and_named_groups_are_accepted() {
        assert!(matches(r"^(\w)\1$", "aa"));
        assert!(!matches(r"^(\w)\1$", "ab"));
        assert!(browser_pattern(r"^(?<year>\d{4})-\k<year>$").is_ok());
        assert!(browser_pattern(r"^(?:ab)+(?!c)$").is_ok());
    }

    #[test]
    fn rust_only_syntax_is_refused() {
        for pattern in [
            r"(?i)^abc\z",
            r"^abc\z",
            r"\Aabc",
            r"(?P<word>\w+)",
            r"(?-i)abc",
            r"\p{Greek}+",
            r"[[:alpha:]]+",
            r"[a-z&&[^aeiou]]",
            r"^[]a]+$",
            r"[a[bc]]",
        ] {
            assert!(browser_pattern(pattern).is_err(), "{} should be refused", pattern);
        }
    }

    #[test]
    fn escaped_and_bracketed_lookalikes_are_fine() {
        assert!(browser_pattern(r"^\\z$").is_ok());
        assert!(browser_pattern(r"^[(?i)]+$").is_ok());
        assert!(browser_pattern(r"^[\]a]+$").is_ok());
        assert!(browser_pattern(r"^[a\[]+$").is_ok());
        assert!(browser_pattern(r"^[a-z-]+$").is_ok());
        assert!(browser_pattern(r"^a&&b$").is_ok());
    }

    #[test]
    fn broken_patterns_report_and_match_everything() {
        assert!(browser_pattern("([").is_err());
        assert!(matches("([", "anything"));
    }
}
