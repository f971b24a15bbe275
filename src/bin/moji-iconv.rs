//! moji-iconv CLI
//!
//! Detect and repair mojibake text files (iconv-style front end for the
//! per-line charset resolver).

use anyhow::{Context, Result};
use clap::Parser;
use moji_iconv::{Charset, Converter, DetectionReport, Detector, NewlineStyle};
use std::fs;
use std::io::{self, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "moji-iconv")]
#[command(version)]
#[command(about = "Detect and repair mojibake text files")]
struct Cli {
    /// Charset to save as
    #[arg(short = 't', long = "to", default_value = "utf-8")]
    to: Charset,

    /// Newline style to save with
    #[arg(long, default_value = "unix")]
    style: NewlineStyle,

    /// Report the charsets found in the input instead of converting
    #[arg(short = 'k', long)]
    only_check: bool,

    /// Mojibake file ("-" reads standard input)
    #[arg(default_value = "-")]
    input: String,

    /// Output file ("-" writes standard output)
    #[arg(default_value = "-")]
    output: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data = read_input(&cli.input)?;

    if cli.only_check {
        let report = Detector::new()
            .detect(&data)
            .with_context(|| format!("Failed to analyze: {}", cli.input))?;
        println!("{}", render_report(&cli.input, &report));
        return Ok(());
    }

    let converted = Converter::new()
        .with_target(cli.to)
        .with_newline(cli.style)
        .convert(&data)
        .with_context(|| format!("Failed to convert: {}", cli.input))?;

    write_output(&cli.output, &converted)
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read standard input")?;
        Ok(buffer)
    } else {
        fs::read(path).with_context(|| format!("Failed to read file: {}", path))
    }
}

fn write_output(path: &str, data: &[u8]) -> Result<()> {
    if path == "-" {
        io::stdout()
            .write_all(data)
            .context("Failed to write standard output")?;
    } else {
        fs::write(path, data).with_context(|| format!("Failed to write: {}", path))?;
    }
    Ok(())
}

/// Render a detection report the way the check mode prints it.
/// An empty report means no line needed more than ASCII.
fn render_report(name: &str, report: &DetectionReport) -> String {
    let labels: Vec<&str> = if report.is_empty() {
        vec![Charset::Ascii.label()]
    } else {
        report.charsets().map(|c| c.label()).collect()
    };

    if report.is_mixed() {
        format!("file {} mixes encodings: {}", name, labels.join(", "))
    } else {
        format!("file {} encoding: {}", name, labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "你好" in GB2312
    const NIHAO_GB2312: &[u8] = b"\xc4\xe3\xba\xc3";

    #[test]
    fn test_render_report_mixed() {
        let mut input = Vec::from(NIHAO_GB2312);
        input.push(b'\n');
        input.extend_from_slice("中".as_bytes());

        let report = Detector::new().detect(&input).unwrap();
        assert_eq!(
            render_report("bad.txt", &report),
            "file bad.txt mixes encodings: gb2312, utf-8"
        );
    }

    #[test]
    fn test_render_report_uniform() {
        let report = Detector::new().detect(NIHAO_GB2312).unwrap();
        assert_eq!(
            render_report("legacy.txt", &report),
            "file legacy.txt encoding: gb2312"
        );
    }

    #[test]
    fn test_render_report_pure_ascii() {
        let report = Detector::new().detect(b"nothing fancy\n").unwrap();
        assert_eq!(
            render_report("plain.txt", &report),
            "file plain.txt encoding: ascii"
        );
    }

    #[test]
    fn test_file_round_trip_through_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("mojibake.txt");
        let output_path = dir.path().join("fixed.txt");

        let mut data = Vec::from(NIHAO_GB2312);
        data.extend_from_slice(b"\r\nascii tail\r\n");
        fs::write(&input_path, &data).unwrap();

        let raw = read_input(input_path.to_str().unwrap()).unwrap();
        let converted = Converter::new().convert(&raw).unwrap();
        write_output(output_path.to_str().unwrap(), &converted).unwrap();

        let fixed = fs::read(&output_path).unwrap();
        assert_eq!(fixed, "你好\nascii tail\n".as_bytes());
    }

    #[test]
    fn test_read_input_missing_file_has_context() {
        let err = read_input("/no/such/file").unwrap_err();
        assert!(err.to_string().contains("/no/such/file"));
    }
}
