//! Bracket nesting guard run before the JSON parser

/// Scan `text` for `{`/`[` nesting deeper than `limit`
///
/// Brackets inside string literals are ignored. Returns the byte offset of
/// the first bracket that goes past the limit. Malformed JSON is left for
/// the parser to report.
pub(crate) fn check(text: &str, limit: usize) -> Result<(), usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > limit {
                    return Err(offset);
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limit() {
        assert_eq!(check(r#"{"a": [{"b": []}]}"#, 4), Ok(()));
    }

    #[test]
    fn test_reports_first_offending_bracket() {
        assert_eq!(check(r#"{"a": [{"b": []}]}"#, 3), Err(13));
    }

    #[test]
    fn test_siblings_do_not_accumulate() {
        assert_eq!(check("[[],[],[],[]]", 2), Ok(()));
    }

    #[test]
    fn test_brackets_in_strings_ignored() {
        assert_eq!(check(r#"{"label": "[[[[{{{{"}"#, 1), Ok(()));
        assert_eq!(check(r#"{"label": "say \"[[[\" twice"}"#, 1), Ok(()));
    }

    #[test]
    fn test_escaped_backslash_ends_string() {
        // The string is `\\`, so the following bracket is structural.
        assert_eq!(check(r#"["\\", ["x"]]"#, 1), Err(7));
    }
}
