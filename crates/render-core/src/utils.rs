/// Split text into lines the way a text block prints them. Empty text has no lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_newlines() {
        assert_eq!(split_lines("a\nb\r\nc"), vec!["a", "b", "c"]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("one"), vec!["one"]);
    }
}
