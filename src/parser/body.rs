//! Body accumulation for lines after the terminal header.

/// Append `line` to `body`, preceded by a line separator.
///
/// Lines are stored verbatim with no size limit.
pub fn append_line(body: &mut String, line: &str) {
    body.push('\n');
    body.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_line_is_prefixed() {
        let mut body = String::new();
        append_line(&mut body, "hello");
        append_line(&mut body, "world");
        assert_eq!(body, "\nhello\nworld");
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let mut body = String::new();
        append_line(&mut body, "");
        append_line(&mut body, "  Here is our forecast  ");
        assert_eq!(body, "\n\n  Here is our forecast  ");
    }
}
