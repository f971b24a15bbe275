//! # moji-iconv
//!
//! Repairs "mojibake" text files whose lines were written with inconsistent
//! or unknown character sets.
//!
//! Each line is decoded independently against a prioritized candidate list
//! and the whole file is re-encoded into a single target charset with a
//! normalized newline style. Per-line resolution is what makes repair of
//! concatenated files work: a log assembled from a UTF-8 half and a GB2312
//! half converts cleanly even though no single charset fits the whole file.
//!
//! ## Line resolution
//!
//! Candidates are tried in a fixed priority order:
//!
//! ```text
//! ascii -> gb2312 -> utf-8
//! ```
//!
//! The first charset that strictly decodes the entire line wins. ASCII is
//! first so 7-bit lines never resolve to a wider charset. Strict means
//! strict: an invalid byte sequence fails the candidate outright, and no
//! replacement characters are ever produced. A line no candidate accepts
//! aborts the whole operation with [`ConvertError::UndecodableLine`].
//!
//! ## Newline handling
//!
//! Input may mix `\n`, `\r`, and `\r\n` freely; all three markers are
//! recognized simultaneously, with `\r\n` matched greedily so a Windows
//! line never splits into a phantom empty line. Output uses exactly one
//! marker, chosen by [`NewlineStyle`].
//!
//! ## Converting and detecting
//!
//! [`Converter`] produces the repaired bytes:
//!
//! ```
//! use moji_iconv::Converter;
//!
//! let fixed = Converter::new().convert(b"plain ascii\r\nlines")?;
//! assert_eq!(fixed, b"plain ascii\nlines");
//! # Ok::<(), moji_iconv::ConvertError>(())
//! ```
//!
//! [`Detector`] answers "does this file mix encodings?" without converting:
//! it collects the distinct charsets resolved across all lines, ignoring
//! pure-ASCII lines, into a [`DetectionReport`].

pub mod charset;
pub mod converter;
pub mod detector;
pub mod newline;

pub use charset::{
    CandidateList, CandidateListError, Charset, ConvertError, ParseCharsetError,
    DEFAULT_CANDIDATES,
};
pub use converter::Converter;
pub use detector::{DetectionReport, Detector};
pub use newline::{split_lines, NewlineStyle, ParseNewlineError};
