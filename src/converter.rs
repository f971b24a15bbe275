//! Whole-buffer conversion into a single target charset

use crate::charset::{CandidateList, Charset, ConvertError};
use crate::newline::{split_lines, NewlineStyle};

/// Converts a buffer whose lines may carry different charsets into one
/// target charset with one newline convention.
///
/// Lines are resolved independently, so a file concatenated from a UTF-8
/// part and a GB2312 part still repairs cleanly. The cost is that no
/// cross-line context is available to disambiguate a single line.
#[derive(Debug, Clone)]
pub struct Converter {
    target: Charset,
    newline: NewlineStyle,
    candidates: CandidateList,
}

impl Converter {
    /// Create a converter with the defaults: UTF-8 output, unix newlines
    pub fn new() -> Self {
        Self {
            target: Charset::Utf8,
            newline: NewlineStyle::Unix,
            candidates: CandidateList::default(),
        }
    }

    /// Set the output charset
    pub fn with_target(mut self, target: Charset) -> Self {
        self.target = target;
        self
    }

    /// Set the output newline style
    pub fn with_newline(mut self, newline: NewlineStyle) -> Self {
        self.newline = newline;
        self
    }

    /// Replace the candidate list used to resolve each line
    pub fn with_candidates(mut self, candidates: CandidateList) -> Self {
        self.candidates = candidates;
        self
    }

    /// Convert a whole buffer.
    ///
    /// Splits into lines, resolves and decodes each line against the
    /// candidate list, re-encodes into the target charset, and joins with
    /// the target newline marker. Any per-line failure aborts the whole
    /// conversion; there is no partial output and no lossy fallback.
    pub fn convert(&self, input: &[u8]) -> Result<Vec<u8>, ConvertError> {
        // The marker is emitted in the target charset. Every supported
        // target is an ASCII superset, so encoding it cannot fail.
        let marker = self
            .target
            .encode(self.newline.as_str())
            .expect("newline markers are ASCII and every target charset covers ASCII");

        let mut output = Vec::with_capacity(input.len());
        for (line_index, line) in split_lines(input).into_iter().enumerate() {
            if line_index > 0 {
                output.extend_from_slice(&marker);
            }
            let (_, text) = self.candidates.resolve(line).ok_or_else(|| {
                ConvertError::UndecodableLine {
                    line_index,
                    raw_bytes: line.to_vec(),
                }
            })?;
            let encoded =
                self.target
                    .encode(&text)
                    .ok_or(ConvertError::UnencodableText {
                        line_index,
                        target: self.target,
                    })?;
            output.extend_from_slice(&encoded);
        }
        Ok(output)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "你好" in GB2312
    const NIHAO_GB2312: &[u8] = b"\xc4\xe3\xba\xc3";

    #[test]
    fn test_convert_is_idempotent_on_clean_utf8() {
        // "中" is three bytes, so the line is not valid GBK and resolves
        // as utf-8; the whole file converts to itself
        let input = "first line\nlone 中\nthird\n".as_bytes();
        let output = Converter::new().convert(input).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_convert_repairs_gb2312_to_utf8() {
        let mut input = Vec::from(NIHAO_GB2312);
        input.push(b'\n');
        input.extend_from_slice(b"ascii tail");

        let output = Converter::new().convert(&input).unwrap();
        assert_eq!(output, "你好\nascii tail".as_bytes());
    }

    #[test]
    fn test_convert_repairs_mixed_charset_lines() {
        // Line 1 GB2312, line 2 UTF-8: both repair into one charset
        let mut input = Vec::from(NIHAO_GB2312);
        input.push(b'\n');
        input.extend_from_slice("中".as_bytes());

        let output = Converter::new().convert(&input).unwrap();
        assert_eq!(output, "你好\n中".as_bytes());
    }

    #[test]
    fn test_convert_normalizes_mixed_newlines_to_windows() {
        let input = b"a\nb\rc\r\nd";
        let output = Converter::new()
            .with_newline(NewlineStyle::Windows)
            .convert(input)
            .unwrap();
        assert_eq!(output, b"a\r\nb\r\nc\r\nd");
    }

    #[test]
    fn test_convert_to_mac_style() {
        let output = Converter::new()
            .with_newline(NewlineStyle::Mac)
            .convert(b"a\r\nb\nc")
            .unwrap();
        assert_eq!(output, b"a\rb\rc");
    }

    #[test]
    fn test_convert_to_gb2312_target() {
        // "中" is D6D0 in GB2312
        let input = "中\nworld".as_bytes();
        let output = Converter::new()
            .with_target(Charset::Gb2312)
            .convert(input)
            .unwrap();
        assert_eq!(output, b"\xd6\xd0\nworld");
    }

    #[test]
    fn test_convert_empty_input() {
        assert_eq!(Converter::new().convert(b"").unwrap(), b"");
    }

    #[test]
    fn test_convert_preserves_trailing_newline() {
        let output = Converter::new()
            .with_newline(NewlineStyle::Windows)
            .convert(b"a\n")
            .unwrap();
        assert_eq!(output, b"a\r\n");
    }

    #[test]
    fn test_convert_fails_on_undecodable_line() {
        let err = Converter::new().convert(b"fine\n\xff\xff\nalso fine").unwrap_err();
        assert_eq!(
            err,
            ConvertError::UndecodableLine {
                line_index: 1,
                raw_bytes: vec![0xFF, 0xFF],
            }
        );
    }

    #[test]
    fn test_convert_fails_on_unencodable_target() {
        let err = Converter::new()
            .with_target(Charset::Ascii)
            .convert("plain\n中文".as_bytes())
            .unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnencodableText {
                line_index: 1,
                target: Charset::Ascii,
            }
        );
    }

    #[test]
    fn test_convert_honors_custom_candidates() {
        // Without the utf-8 candidate, a utf-8-only line is undecodable
        let candidates =
            CandidateList::new(vec![Charset::Ascii, Charset::Gb2312]).unwrap();
        let err = Converter::new()
            .with_candidates(candidates)
            .convert("中".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ConvertError::UndecodableLine { line_index: 0, .. }));
    }
}
