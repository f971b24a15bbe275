//! Example demonstrating mixed-encoding detection
//!
//! Runs the detector over uniform and mixed buffers, then repairs the
//! mixed one once detection flags it.

use moji_iconv::{Converter, Detector};

fn main() -> anyhow::Result<()> {
    println!("=== Mixed-Encoding Detection Example ===\n");

    let detector = Detector::new();

    let samples: [(&str, Vec<u8>); 3] = [
        ("ascii.txt", b"nothing but 7-bit lines\nsecond line\n".to_vec()),
        ("legacy.txt", b"\xc4\xe3\xba\xc3\n\xc4\xe3\xba\xc3\n".to_vec()),
        (
            "stitched.txt",
            [b"\xc4\xe3\xba\xc3".as_ref(), b"\n", "你好吗".as_bytes()].concat(),
        ),
    ];

    for (name, data) in &samples {
        let report = detector.detect(data)?;
        let labels: Vec<&str> = report.charsets().map(|c| c.label()).collect();

        println!(
            "{}: {} ({})",
            name,
            if report.is_mixed() { "MIXED" } else { "uniform" },
            if labels.is_empty() {
                "ascii only".to_string()
            } else {
                labels.join(", ")
            }
        );
    }

    // The mixed file is exactly what the converter exists for
    let (_, stitched) = &samples[2];
    let fixed = Converter::new().convert(stitched)?;
    println!("\nstitched.txt repaired: {}", String::from_utf8(fixed)?);

    Ok(())
}
