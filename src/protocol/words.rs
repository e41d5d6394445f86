/// Cursor over one protocol line.
/// Hands out whitespace separated words and, at any point,
/// the untouched remainder of the line for free-text tails.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    at: usize,
}

impl<'a> From<&'a str> for Words<'a> {
    fn from(text: &'a str) -> Self {
        Self { text, at: 0 }
    }
}

impl<'a> Words<'a> {
    /// Skips `n` words.
    pub fn skip(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.next();
        }
        self
    }
    /// Everything after the last word taken, separator consumed.
    pub fn rest(&self) -> &'a str {
        &self.text[self.at..]
    }
    /// Next word parsed into `T`.
    pub fn parse<T>(&mut self) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.next().and_then(|w| w.parse().ok())
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<Self::Item> {
        let tail = &self.text[self.at..];
        let lead = tail.len() - tail.trim_start_matches([' ', '\n']).len();
        let start = self.at + lead;
        if start >= self.text.len() {
            self.at = self.text.len();
            return None;
        }
        let word = self.text[start..]
            .split([' ', '\n'])
            .next()
            .unwrap_or_default();
        let end = start + word.len();
        self.at = (end + 1).min(self.text.len());
        Some(&self.text[start..end])
    }
}

/// Restores line breaks the server escapes as 0x01 (CR) and 0x02 (LF).
pub fn decode_crlf(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{1}' => '\r',
            '\u{2}' => '\n',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn words_and_rest() {
        let mut words = Words::from("tell bob  hello there");
        assert_eq!(words.next(), Some("tell"));
        assert_eq!(words.next(), Some("bob"));
        assert_eq!(words.rest(), " hello there");
        assert_eq!(words.next(), Some("hello"));
        assert_eq!(words.rest(), "there");
        assert_eq!(words.next(), Some("there"));
        assert_eq!(words.rest(), "");
        assert_eq!(words.next(), None);
    }
    #[test]
    fn skip_then_rest() {
        let words = Words::from("table 7 bob end (;GM[Skat]) extra");
        assert_eq!(words.skip(4).rest(), "(;GM[Skat]) extra");
    }
    #[test]
    fn skip_past_end() {
        let words = Words::from("error");
        assert_eq!(words.skip(3).rest(), "");
    }
    #[test]
    fn parse_numbers() {
        let mut words = Words::from("3 x 1.5");
        assert_eq!(words.parse::<usize>(), Some(3));
        assert_eq!(words.parse::<usize>(), None);
        assert_eq!(words.parse::<f64>(), Some(1.5));
    }
    #[test]
    fn crlf_escapes() {
        assert_eq!(decode_crlf("a\u{1}\u{2}b"), "a\r\nb");
        assert_eq!(decode_crlf("plain"), "plain");
    }
}
