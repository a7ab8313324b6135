//! Minimal inline-markup handling for paragraph text.
//!
//! Summaries routinely carry basic emphasis: `<b>`/`<strong>` and
//! `<i>`/`<em>` switch faces, `<br>` forces a line break, every other tag is
//! stripped. HTML entities are decoded so escaped characters render
//! literally.

use html_escape::decode_html_entities;

use crate::layout::{Font, Span};

/// A single span of decoded text with no markup interpretation. Used for
/// titles and dates, which arrive pre-escaped.
pub fn plain(text: &str, font: Font) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Span {
        text: decode_html_entities(text).into_owned(),
        font,
    }]
}

/// Parse semi-trusted inline markup into font-tagged spans.
pub fn parse(text: &str, base: Font) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut bold = 0u32;
    let mut italic = 0u32;
    let mut current = base;

    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            buf.push(c);
            continue;
        }

        let mut tag = String::new();
        for t in chars.by_ref() {
            if t == '>' {
                break;
            }
            tag.push(t);
        }

        let trimmed = tag.trim().trim_end_matches('/').trim();
        let (closing, name) = match trimmed.strip_prefix('/') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };
        // drop attributes, keep the bare tag name
        let name = name
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match name.as_str() {
            "b" | "strong" => {
                flush(&mut spans, &mut buf, current);
                if closing {
                    bold = bold.saturating_sub(1);
                } else {
                    bold += 1;
                }
            }
            "i" | "em" => {
                flush(&mut spans, &mut buf, current);
                if closing {
                    italic = italic.saturating_sub(1);
                } else {
                    italic += 1;
                }
            }
            "br" => buf.push('\n'),
            _ => {}
        }

        current = font_for(base, bold, italic);
    }

    flush(&mut spans, &mut buf, current);
    spans
}

fn flush(spans: &mut Vec<Span>, buf: &mut String, font: Font) {
    if buf.is_empty() {
        return;
    }
    spans.push(Span {
        text: decode_html_entities(buf.as_str()).into_owned(),
        font,
    });
    buf.clear();
}

fn font_for(base: Font, bold: u32, italic: u32) -> Font {
    if bold > 0 {
        Font::TimesBold
    } else if italic > 0 {
        Font::TimesItalic
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decodes_entities() {
        let spans = plain("Tom &amp; Jerry &lt;live&gt;", Font::TimesBold);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Tom & Jerry <live>");
        assert_eq!(spans[0].font, Font::TimesBold);
    }

    #[test]
    fn test_plain_empty_is_empty() {
        assert!(plain("", Font::TimesRoman).is_empty());
    }

    #[test]
    fn test_bold_run_switches_face() {
        let spans = parse("a <b>bold</b> word", Font::TimesRoman);
        let faces: Vec<_> = spans.iter().map(|s| (s.text.as_str(), s.font)).collect();
        assert_eq!(
            faces,
            vec![
                ("a ", Font::TimesRoman),
                ("bold", Font::TimesBold),
                (" word", Font::TimesRoman),
            ]
        );
    }

    #[test]
    fn test_em_and_strong_aliases() {
        let spans = parse("<strong>x</strong><em>y</em>", Font::TimesRoman);
        assert_eq!(spans[0].font, Font::TimesBold);
        assert_eq!(spans[1].font, Font::TimesItalic);
    }

    #[test]
    fn test_unknown_tags_stripped() {
        let spans = parse(
            "<p>one <a href=\"https://example.com\">two</a></p> three",
            Font::TimesRoman,
        );
        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "one two three");
    }

    #[test]
    fn test_br_becomes_line_break() {
        let spans = parse("up<br/>down", Font::TimesRoman);
        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "up\ndown");
    }

    #[test]
    fn test_entities_decoded_inside_markup() {
        let spans = parse("<b>&quot;quoted&quot;</b>", Font::TimesRoman);
        assert_eq!(spans[0].text, "\"quoted\"");
    }

    #[test]
    fn test_unbalanced_close_is_harmless() {
        let spans = parse("</b>plain", Font::TimesRoman);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].font, Font::TimesRoman);
    }
}
