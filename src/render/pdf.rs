//! Minimal single-page PDF emission.
//!
//! Emits PDF 1.4 with the base-14 Times faces in WinAnsi encoding: catalog,
//! one page, three font resources, one uncompressed content stream of
//! positioned text, xref table. That is everything a print job needs, and
//! keeping the writer on `std::io::Write` keeps it platform-free and easy to
//! test against an in-memory buffer.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::{NewsprintError, Result};
use crate::layout::{Document, Font};

fn font_ref(font: Font) -> &'static str {
    match font {
        Font::TimesRoman => "F1",
        Font::TimesBold => "F2",
        Font::TimesItalic => "F3",
    }
}

/// Serialize `doc` as a complete PDF file.
pub fn write_document(doc: &Document, out: &mut impl Write) -> std::io::Result<()> {
    let content = content_stream(doc);

    let mut objects: Vec<Vec<u8>> = Vec::new();
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec());
    objects.push(
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 5 0 R /F2 6 0 R /F3 7 0 R >> >> \
             /Contents 4 0 R >>",
            doc.geometry().page_width,
            doc.geometry().page_height
        )
        .into_bytes(),
    );

    let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    stream.extend_from_slice(content.as_bytes());
    stream.extend_from_slice(b"endstream");
    objects.push(stream);

    for base in ["Times-Roman", "Times-Bold", "Times-Italic"] {
        objects.push(
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                base
            )
            .into_bytes(),
        );
    }

    let mut buf: Vec<u8> = Vec::new();
    buf.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, obj) in objects.iter().enumerate() {
        offsets.push(buf.len());
        buf.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        buf.extend_from_slice(obj);
        buf.extend_from_slice(b"\nendobj\n");
    }

    let xref_pos = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        buf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_pos
        )
        .as_bytes(),
    );

    out.write_all(&buf)
}

/// Write `doc` to `dir` as `rss_printout_{timestamp}.pdf` and return the
/// path. The timestamp has second resolution, one file per cycle.
pub fn save_document(doc: &Document, dir: &Path) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("rss_printout_{}.pdf", timestamp));

    let mut file = fs::File::create(&path).map_err(|e| NewsprintError::Render {
        path: path.clone(),
        source: e,
    })?;
    write_document(doc, &mut file).map_err(|e| NewsprintError::Render {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

/// Text operators for every placed line. One `BT`/`ET` block per line; runs
/// within a line continue from the pen position, so only the first needs a
/// `Td`.
fn content_stream(doc: &Document) -> String {
    let mut s = String::new();
    for line in doc.lines() {
        s.push_str("BT\n");
        let _ = writeln!(s, "{:.2} {:.2} Td", line.x, line.baseline);
        for run in &line.runs {
            let _ = writeln!(s, "/{} {:.2} Tf", font_ref(run.font), run.size);
            let _ = writeln!(s, "{:.3} {:.3} {:.3} rg", run.color.0, run.color.1, run.color.2);
            s.push('(');
            s.push_str(&escape_string(&run.text));
            s.push_str(") Tj\n");
        }
        s.push_str("ET\n");
    }
    s
}

/// Escape a text string for a PDF literal, encoding to WinAnsi. Characters
/// without a WinAnsi code point degrade to '?'.
fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let byte = winansi_byte(c);
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{:03o}", byte);
            }
        }
    }
    out
}

fn winansi_byte(c: char) -> u8 {
    match c {
        // WinAnsi extensions for common typographic characters
        '\u{2018}' => 0x91, // left single quote
        '\u{2019}' => 0x92, // right single quote
        '\u{201C}' => 0x93, // left double quote
        '\u{201D}' => 0x94, // right double quote
        '\u{2022}' => 0x95, // bullet
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{2026}' => 0x85, // ellipsis
        '\u{20AC}' => 0x80, // euro sign
        _ => {
            let code = c as u32;
            // ASCII and Latin-1 map straight through
            if (0x20..=0x7e).contains(&code) || (0xa0..=0xff).contains(&code) {
                code as u8
            } else {
                b'?'
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NormalizedEntry;
    use crate::layout::{layout, PageGeometry};

    fn sample_document() -> Document {
        let entries = vec![
            NormalizedEntry::banner("Guardian World"),
            NormalizedEntry {
                title: "A headline".into(),
                published: "Mon, 01 Jan 2024 00:00:00 +0000".into(),
                summary: "A short summary.".into(),
            },
        ];
        layout(&entries, &PageGeometry::a4()).unwrap()
    }

    #[test]
    fn test_pdf_framing() {
        let mut buf = Vec::new();
        write_document(&sample_document(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/BaseFont /Times-Bold"));
        assert!(text.contains("(Feed Source: Guardian World) Tj"));
        assert!(text.contains("(A short summary.) Tj"));
    }

    #[test]
    fn test_stream_length_matches() {
        let mut buf = Vec::new();
        write_document(&sample_document(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let length: usize = text
            .split("/Length ")
            .nth(1)
            .and_then(|rest| rest.split(' ').next())
            .unwrap()
            .parse()
            .unwrap();
        let stream_start = text.find("stream\n").unwrap() + "stream\n".len();
        let stream_end = text.find("endstream").unwrap();
        assert_eq!(stream_end - stream_start, length);
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut buf = Vec::new();
        write_document(&sample_document(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let xref = text.split("xref\n").nth(1).unwrap();
        for (i, line) in xref.lines().skip(2).take(7).enumerate() {
            let offset: usize = line.split(' ').next().unwrap().parse().unwrap();
            assert!(
                text[offset..].starts_with(&format!("{} 0 obj", i + 1)),
                "object {} offset wrong",
                i + 1
            );
        }
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_string("(a) \\ b"), "\\(a\\) \\\\ b");
        // em dash is a WinAnsi octal escape, not a '?'
        assert_eq!(escape_string("\u{2014}"), "\\227");
        // outside WinAnsi degrades
        assert_eq!(escape_string("日"), "?");
    }

    #[test]
    fn test_save_document_names_file_by_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_document(&sample_document(), dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("rss_printout_"));
        assert!(name.ends_with(".pdf"));
        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_save_document_unwritable_dir_errors() {
        let doc = sample_document();
        let err = save_document(&doc, Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, NewsprintError::Render { .. }));
    }
}
