//! Example demonstrating basic mojibake repair
//!
//! Builds a buffer with mixed newline conventions and mixed per-line
//! charsets, then converts it to UTF-8 with unix newlines.

use moji_iconv::{Charset, Converter, NewlineStyle};

fn main() -> anyhow::Result<()> {
    println!("=== Basic Conversion Example ===\n");

    // A file stitched together from three sources: an ASCII header with
    // Windows line endings, a GB2312 line, and a UTF-8 line.
    let mut mojibake: Vec<u8> = Vec::new();
    mojibake.extend_from_slice(b"report header\r\n");
    mojibake.extend_from_slice(b"\xc4\xe3\xba\xc3"); // GB2312
    mojibake.push(b'\r');
    mojibake.extend_from_slice("你好吗".as_bytes()); // UTF-8

    println!("Input ({} bytes): {:?}\n", mojibake.len(), mojibake);

    // Default target: utf-8, unix newlines
    let fixed = Converter::new().convert(&mojibake)?;
    println!("Repaired as UTF-8/unix:");
    println!("{}\n", String::from_utf8(fixed)?);

    // Same input, normalized the other way: GB2312 with Windows newlines
    let legacy = Converter::new()
        .with_target(Charset::Gb2312)
        .with_newline(NewlineStyle::Windows)
        .convert(&mojibake)?;
    println!("Repaired as GB2312/windows ({} bytes): {:?}", legacy.len(), legacy);

    Ok(())
}
