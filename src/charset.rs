//! Charset identification and strict per-line transcoding

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{GBK, UTF_8};

/// Candidate charsets in tie-break priority order.
///
/// `Ascii` comes first so a pure 7-bit line never resolves to a wider
/// charset, even though the wider charsets would also accept it.
pub const DEFAULT_CANDIDATES: [Charset; 3] = [Charset::Ascii, Charset::Gb2312, Charset::Utf8];

/// A supported character encoding.
///
/// This is a closed set: each variant maps to a concrete strict decode and
/// encode routine, not a charset-name string handed to a generic codec call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Charset {
    /// 7-bit ASCII
    Ascii,
    /// Simplified Chinese, via the WHATWG `GBK` encoding (`gb2312` is a GBK
    /// label there; GB18030 four-byte sequences are rejected)
    Gb2312,
    /// UTF-8
    Utf8,
}

impl Charset {
    /// Canonical label, as accepted by `--to` and printed in reports
    pub fn label(&self) -> &'static str {
        match self {
            Charset::Ascii => "ascii",
            Charset::Gb2312 => "gb2312",
            Charset::Utf8 => "utf-8",
        }
    }

    /// Strictly decode a whole line under this charset.
    ///
    /// Returns `None` on the first invalid byte sequence; replacement
    /// characters are never substituted.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Charset::Ascii => {
                if bytes.is_ascii() {
                    // ASCII is a UTF-8 subset, so this cannot fail
                    std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
                } else {
                    None
                }
            }
            Charset::Gb2312 => GBK.decode_without_bom_handling_and_without_replacement(bytes),
            Charset::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
        }
    }

    /// Strictly encode text into this charset.
    ///
    /// Returns `None` if any character is unrepresentable; lossy output
    /// (numeric character references) is never returned.
    pub fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        match self {
            Charset::Ascii => {
                if text.is_ascii() {
                    Some(Cow::Borrowed(text.as_bytes()))
                } else {
                    None
                }
            }
            Charset::Gb2312 => {
                let (bytes, _, had_errors) = GBK.encode(text);
                if had_errors {
                    None
                } else {
                    Some(bytes)
                }
            }
            Charset::Utf8 => Some(Cow::Borrowed(text.as_bytes())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Charset {
    type Err = ParseCharsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(Charset::Ascii),
            "gb2312" | "gbk" => Ok(Charset::Gb2312),
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            _ => Err(ParseCharsetError {
                input: s.to_string(),
            }),
        }
    }
}

/// An ordered list of charsets to try when resolving a line.
///
/// Order is the tie-break priority: earlier entries win. The list is a
/// configuration value injected into the converter and detector, so
/// extending the candidate set is a configuration change, not a code change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    charsets: Vec<Charset>,
}

impl CandidateList {
    /// Build a list, rejecting empty input and duplicate entries
    pub fn new(charsets: impl Into<Vec<Charset>>) -> Result<Self, CandidateListError> {
        let charsets = charsets.into();
        if charsets.is_empty() {
            return Err(CandidateListError::Empty);
        }
        for (i, charset) in charsets.iter().enumerate() {
            if charsets[..i].contains(charset) {
                return Err(CandidateListError::Duplicate { charset: *charset });
            }
        }
        Ok(Self { charsets })
    }

    /// The candidates, in priority order
    pub fn charsets(&self) -> &[Charset] {
        &self.charsets
    }

    /// Resolve a single line: the first candidate that strictly decodes the
    /// whole line wins, and later candidates are not tried.
    ///
    /// Returns `None` when no candidate decodes the line; callers turn that
    /// into [`ConvertError::UndecodableLine`] with the line index they know.
    pub fn resolve<'a>(&self, line: &'a [u8]) -> Option<(Charset, Cow<'a, str>)> {
        self.charsets
            .iter()
            .find_map(|charset| charset.decode(line).map(|text| (*charset, text)))
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self {
            charsets: DEFAULT_CANDIDATES.to_vec(),
        }
    }
}

/// Error converting or analyzing a byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No candidate charset could strictly decode this line.
    /// Fatal for the whole operation; there is no partial output.
    UndecodableLine {
        /// Zero-based index of the offending line
        line_index: usize,
        /// Raw bytes of the line, for diagnostics
        raw_bytes: Vec<u8>,
    },
    /// The decoded text cannot be represented in the requested target
    /// charset. Fatal, same propagation as `UndecodableLine`.
    UnencodableText {
        /// Zero-based index of the offending line
        line_index: usize,
        /// The requested target charset
        target: Charset,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UndecodableLine {
                line_index,
                raw_bytes,
            } => {
                write!(
                    f,
                    "line {} ({} bytes) does not decode under any candidate charset",
                    line_index + 1,
                    raw_bytes.len()
                )
            }
            ConvertError::UnencodableText { line_index, target } => {
                write!(f, "line {} cannot be encoded as {}", line_index + 1, target)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Error building a [`CandidateList`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateListError {
    /// The list must contain at least one charset
    Empty,
    /// Each charset may appear at most once
    Duplicate {
        /// The repeated charset
        charset: Charset,
    },
}

impl fmt::Display for CandidateListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateListError::Empty => write!(f, "candidate charset list is empty"),
            CandidateListError::Duplicate { charset } => {
                write!(f, "duplicate candidate charset: {}", charset)
            }
        }
    }
}

impl std::error::Error for CandidateListError {}

/// Error parsing a charset label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCharsetError {
    input: String,
}

impl fmt::Display for ParseCharsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported charset '{}' (expected ascii, gb2312, or utf-8)",
            self.input
        )
    }
}

impl std::error::Error for ParseCharsetError {}
