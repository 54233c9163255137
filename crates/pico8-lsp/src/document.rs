//! Immutable document snapshot with normalised line endings

use std::borrow::Cow;

use crate::error::Result;

/// Replace `\r\n` terminators with `\n`
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Text of one document snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            text: normalize_line_endings(text).into_owned(),
        }
    }

    /// Decode raw file contents; non-UTF-8 input is a caller error
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(std::str::from_utf8(bytes)?))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// All lines, including a trailing empty line after a final newline
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    pub fn line_count(&self) -> usize {
        self.text.bytes().filter(|&b| b == b'\n').count() + 1
    }

    /// 0-based index of the last line
    pub fn last_line(&self) -> u32 {
        (self.line_count() - 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FoldError;

    #[test]
    fn test_crlf_is_normalised() {
        let doc = Document::new("a\r\nb\r\n");
        assert_eq!(doc.text(), "a\nb\n");
        assert_eq!(doc.lines(), vec!["a", "b", ""]);
    }

    #[test]
    fn test_line_count_matches_split() {
        for text in ["", "x", "x\n", "a\nb\nc"] {
            let doc = Document::new(text);
            assert_eq!(doc.line_count(), doc.lines().len(), "text {:?}", text);
        }
        assert_eq!(Document::new("").last_line(), 0);
        assert_eq!(Document::new("a\nb\nc").last_line(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let result = Document::from_bytes(&[b'a', 0xff, b'b']);
        assert!(matches!(result, Err(FoldError::InvalidUtf8(_))));
    }

    #[test]
    fn test_borrowed_when_already_normalised() {
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }
}
