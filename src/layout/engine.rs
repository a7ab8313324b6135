//! The fitting algorithm: entries in, one page out.
//!
//! Entries are expanded into paragraphs and spacers in strict order, each
//! paragraph word-wrapped against the available width, then placed top-down
//! until the available height runs out. Overflow is resolved by cutting the
//! tail: the last partially fitting paragraph is clipped line by line and
//! everything after it is dropped. Earlier entries always win over later
//! ones, and the output never spans a second page.

use tracing::debug;

use crate::app::{NewsprintError, Result};
use crate::domain::NormalizedEntry;
use crate::layout::inline;
use crate::layout::metrics::{char_width, text_width};
use crate::layout::{BlockItem, Font, PageGeometry, Rgb, Span, Style, ENTRY_SPACER};

const EPSILON: f32 = 0.01;

/// A run of text in one face, placed on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

/// One line of placed text. `baseline` is in page coordinates, measured from
/// the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub baseline: f32,
    pub runs: Vec<PlacedRun>,
}

/// A laid-out single page, ready for rendering. Owns no entries.
#[derive(Debug, Clone)]
pub struct Document {
    geometry: PageGeometry,
    lines: Vec<PlacedLine>,
    used_height: f32,
    truncated: bool,
}

impl Document {
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }

    /// Vertical extent consumed below the top margin. Never exceeds
    /// `available_height`.
    pub fn used_height(&self) -> f32 {
        self.used_height
    }

    /// Whether content was cut to fit the page.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Plain text of every placed line, top to bottom. For logs and tests.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                line.runs
                    .iter()
                    .map(|run| run.text.as_str())
                    .collect::<String>()
            })
            .collect()
    }
}

/// Lay out `entries` on a single page of `geometry`.
///
/// Empty input yields a page with the single paragraph "No entries found.".
/// The only error is a geometry without printable area; too much content is
/// handled by truncation, never by failing.
pub fn layout(entries: &[NormalizedEntry], geometry: &PageGeometry) -> Result<Document> {
    if !geometry.is_printable() {
        return Err(NewsprintError::Layout(format!(
            "page geometry leaves no printable area ({:.1} x {:.1} pt)",
            geometry.available_width(),
            geometry.available_height()
        )));
    }

    Ok(fit(build_items(entries), geometry))
}

/// Expand entries into renderable items, four per entry, in entry order.
fn build_items(entries: &[NormalizedEntry]) -> Vec<BlockItem> {
    if entries.is_empty() {
        let style = Style::placeholder();
        return vec![BlockItem::Paragraph {
            spans: inline::plain("No entries found.", style.font),
            style,
        }];
    }

    let mut items = Vec::with_capacity(entries.len() * 4);
    for entry in entries {
        items.push(BlockItem::Paragraph {
            spans: inline::plain(&entry.title, Style::title().font),
            style: Style::title(),
        });
        // empty date/summary paragraphs render nothing, including spacing
        if !entry.published.is_empty() {
            items.push(BlockItem::Paragraph {
                spans: inline::plain(&entry.published, Style::date().font),
                style: Style::date(),
            });
        }
        if !entry.summary.is_empty() {
            items.push(BlockItem::Paragraph {
                spans: inline::parse(&entry.summary, Style::summary().font),
                style: Style::summary(),
            });
        }
        items.push(BlockItem::Spacer(ENTRY_SPACER));
    }
    items
}

fn fit(items: Vec<BlockItem>, geometry: &PageGeometry) -> Document {
    let limit = geometry.available_height();
    let top = geometry.page_height - geometry.top_margin;
    let mut used = 0.0f32;
    let mut lines: Vec<PlacedLine> = Vec::new();
    let mut truncated = false;

    'items: for item in items {
        match item {
            BlockItem::Spacer(h) => {
                // trailing whitespace is invisible; a spacer alone never truncates
                used = (used + h).min(limit);
            }
            BlockItem::Paragraph { spans, style } => {
                let max_width = (geometry.available_width() - style.left_indent).max(1.0);
                let wrapped = wrap(&spans, style.size, max_width);
                if wrapped.is_empty() {
                    continue;
                }

                let x = geometry.left_margin + style.left_indent;
                let mut cursor = used + style.space_before;
                for (i, line) in wrapped.into_iter().enumerate() {
                    if cursor + style.leading > limit + EPSILON {
                        truncated = true;
                        if i > 0 {
                            // keep the clipped head of this paragraph
                            used = cursor;
                        }
                        break 'items;
                    }
                    cursor += style.leading;
                    lines.push(PlacedLine {
                        x,
                        baseline: top - cursor + 0.2 * style.size,
                        runs: line
                            .into_iter()
                            .map(|(text, font)| PlacedRun {
                                text,
                                font,
                                size: style.size,
                                color: style.color,
                            })
                            .collect(),
                    });
                    used = cursor;
                }
                used = (used + style.space_after).min(limit);
            }
        }
    }

    if truncated {
        debug!(
            "page content truncated to fit {:.1} pt of available height",
            limit
        );
    }

    Document {
        geometry: *geometry,
        lines,
        used_height: used,
        truncated,
    }
}

type WrappedLine = Vec<(String, Font)>;

enum Tok {
    Word(String, Font),
    Space(Font),
    Break,
}

fn tokenize(spans: &[Span]) -> Vec<Tok> {
    let mut toks = Vec::new();
    let mut word = String::new();
    let mut word_font = Font::TimesRoman;

    for span in spans {
        for c in span.text.chars() {
            if c == '\n' {
                flush_word(&mut toks, &mut word, word_font);
                toks.push(Tok::Break);
            } else if c.is_whitespace() {
                flush_word(&mut toks, &mut word, word_font);
                if !matches!(toks.last(), Some(Tok::Space(_)) | None) {
                    toks.push(Tok::Space(span.font));
                }
            } else {
                if word.is_empty() {
                    word_font = span.font;
                }
                word.push(c);
            }
        }
        flush_word(&mut toks, &mut word, word_font);
    }
    toks
}

fn flush_word(toks: &mut Vec<Tok>, word: &mut String, font: Font) {
    if !word.is_empty() {
        toks.push(Tok::Word(std::mem::take(word), font));
    }
}

/// Greedy word wrap against `max_width`. Words wider than a whole line are
/// split by character.
fn wrap(spans: &[Span], size: f32, max_width: f32) -> Vec<WrappedLine> {
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut cur: WrappedLine = Vec::new();
    let mut cur_w = 0.0f32;
    let mut pending_space: Option<Font> = None;

    for tok in tokenize(spans) {
        match tok {
            Tok::Break => {
                lines.push(std::mem::take(&mut cur));
                cur_w = 0.0;
                pending_space = None;
            }
            Tok::Space(font) => {
                if !cur.is_empty() {
                    pending_space = Some(font);
                }
            }
            Tok::Word(word, font) => {
                let word_w = text_width(font, size, &word);
                let space_w = pending_space
                    .map(|f| text_width(f, size, " "))
                    .unwrap_or(0.0);

                if !cur.is_empty() && cur_w + space_w + word_w > max_width {
                    lines.push(std::mem::take(&mut cur));
                    cur_w = 0.0;
                    pending_space = None;
                }

                if let Some(space_font) = pending_space.take() {
                    push_run(&mut cur, " ", space_font);
                    cur_w += space_w;
                }

                if word_w > max_width && cur.is_empty() {
                    cur_w = hard_split(&mut lines, &mut cur, &word, font, size, max_width);
                } else {
                    push_run(&mut cur, &word, font);
                    cur_w += word_w;
                }
            }
        }
    }

    if !cur.is_empty() {
        lines.push(cur);
    }
    lines.retain(|line| !line.is_empty());
    lines
}

/// Break an overlong word into line-width chunks. Full chunks become their
/// own lines; the remainder stays on the current line and its width is
/// returned.
fn hard_split(
    lines: &mut Vec<WrappedLine>,
    cur: &mut WrappedLine,
    word: &str,
    font: Font,
    size: f32,
    max_width: f32,
) -> f32 {
    let mut chunk = String::new();
    let mut chunk_w = 0.0f32;

    for c in word.chars() {
        let cw = char_width(font, c) as f32 * size / 1000.0;
        if chunk_w + cw > max_width && !chunk.is_empty() {
            lines.push(vec![(std::mem::take(&mut chunk), font)]);
            chunk_w = 0.0;
        }
        chunk.push(c);
        chunk_w += cw;
    }

    if !chunk.is_empty() {
        push_run(cur, &chunk, font);
    }
    chunk_w
}

fn push_run(line: &mut WrappedLine, text: &str, font: Font) {
    match line.last_mut() {
        Some((existing, f)) if *f == font => existing.push_str(text),
        _ => line.push((text.to_string(), font)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, published: &str, summary: &str) -> NormalizedEntry {
        NormalizedEntry {
            title: title.into(),
            published: published.into(),
            summary: summary.into(),
        }
    }

    fn geometry_with_height(available_height: f32) -> PageGeometry {
        let mut geometry = PageGeometry::a4();
        geometry.page_height = available_height + geometry.top_margin + geometry.bottom_margin;
        geometry
    }

    fn page_text(doc: &Document) -> String {
        doc.text_lines().join("\n")
    }

    #[test]
    fn test_empty_input_yields_placeholder_only() {
        let doc = layout(&[], &PageGeometry::a4()).unwrap();
        assert_eq!(doc.text_lines(), vec!["No entries found."]);
        assert!(!doc.truncated());
    }

    #[test]
    fn test_single_page_invariant_under_heavy_input() {
        let geometry = PageGeometry::a4();
        let long_summary = "An unusually long summary sentence that wraps over many lines. "
            .repeat(20);
        let entries: Vec<_> = (0..200)
            .map(|i| entry(&format!("Headline number {}", i), "Mon, 01 Jan 2024", &long_summary))
            .collect();

        let doc = layout(&entries, &geometry).unwrap();

        assert!(doc.truncated());
        assert!(doc.used_height() <= geometry.available_height() + EPSILON);
        for line in doc.lines() {
            assert!(line.baseline >= geometry.bottom_margin - EPSILON);
            assert!(line.baseline <= geometry.page_height - geometry.top_margin);
        }
    }

    #[test]
    fn test_invariant_holds_for_small_entry_counts() {
        let geometry = PageGeometry::a4();
        for n in 0..10 {
            let entries: Vec<_> = (0..n)
                .map(|i| entry(&format!("T{}", i), "D", "Summary text"))
                .collect();
            let doc = layout(&entries, &geometry).unwrap();
            assert!(doc.used_height() <= geometry.available_height() + EPSILON);
        }
    }

    #[test]
    fn test_entry_order_preserved_banner_first() {
        let mut entries = vec![NormalizedEntry::banner("Ars Technica")];
        entries.extend((0..5).map(|i| entry(&format!("UniqueTitle{}", i), "", "")));

        let doc = layout(&entries, &PageGeometry::a4()).unwrap();
        let text = page_text(&doc);

        let mut last = text.find("Feed Source: Ars Technica").expect("banner missing");
        for i in 0..5 {
            let pos = text
                .find(&format!("UniqueTitle{}", i))
                .unwrap_or_else(|| panic!("UniqueTitle{} missing", i));
            assert!(pos > last, "titles out of order");
            last = pos;
        }
    }

    #[test]
    fn test_truncation_prefers_head_of_input() {
        // Room for the banner plus two full entries, not more.
        let geometry = geometry_with_height(200.0);
        let mut entries = vec![NormalizedEntry::banner("Guardian World")];
        entries.extend((1..=5).map(|i| entry(&format!("T{}", i), &format!("D{}", i), &format!("S{}", i))));

        let doc = layout(&entries, &geometry).unwrap();
        let text = page_text(&doc);

        assert!(doc.truncated());
        assert!(text.contains("Feed Source: Guardian World"));
        assert!(text.contains("T1"));
        assert!(text.contains("T2"));
        assert!(!text.contains("T4"));
        assert!(!text.contains("T5"));
    }

    #[test]
    fn test_geometry_for_banner_plus_one_entry() {
        // End-to-end scenario: banner + first entry fit, second entry dropped.
        let geometry = geometry_with_height(140.0);
        let entries = vec![
            NormalizedEntry::banner("Guardian World"),
            entry("T1", "D1", "S1"),
            entry("T2", "D2", "S2"),
        ];

        let doc = layout(&entries, &geometry).unwrap();
        let text = page_text(&doc);

        assert!(text.contains("Feed Source: Guardian World"));
        assert!(text.contains("T1"));
        assert!(text.contains("D1"));
        assert!(text.contains("S1"));
        assert!(!text.contains("T2"));
        assert!(doc.truncated());
    }

    #[test]
    fn test_banner_survives_tiny_page() {
        let geometry = geometry_with_height(40.0);
        let mut entries = vec![NormalizedEntry::banner("Civil Georgia")];
        entries.push(entry("T1", "D1", "S1"));

        let doc = layout(&entries, &geometry).unwrap();

        assert!(page_text(&doc).contains("Feed Source: Civil Georgia"));
        assert!(doc.truncated());
    }

    #[test]
    fn test_long_title_clipped_line_by_line() {
        // One line of title fits, the rest of the paragraph is clipped.
        let geometry = geometry_with_height(30.0);
        let long_title = "word ".repeat(60);
        let doc = layout(&[entry(long_title.trim(), "", "")], &geometry).unwrap();

        assert_eq!(doc.lines().len(), 1);
        assert!(doc.truncated());
        assert!(doc.used_height() <= geometry.available_height() + EPSILON);
    }

    #[test]
    fn test_empty_date_and_summary_render_nothing() {
        let doc = layout(&[entry("Only a title", "", "")], &PageGeometry::a4()).unwrap();
        assert_eq!(doc.text_lines(), vec!["Only a title"]);
    }

    #[test]
    fn test_degenerate_geometry_is_an_error() {
        let mut geometry = PageGeometry::a4();
        geometry.top_margin = geometry.page_height;
        assert!(layout(&[entry("t", "d", "s")], &geometry).is_err());
    }

    #[test]
    fn test_title_entities_render_literally() {
        let doc = layout(
            &[entry("Fish &amp; Chips &lt;fresh&gt;", "", "")],
            &PageGeometry::a4(),
        )
        .unwrap();
        assert_eq!(doc.text_lines(), vec!["Fish & Chips <fresh>"]);
    }

    #[test]
    fn test_summary_markup_switches_faces() {
        let doc = layout(
            &[entry("T", "", "plain <b>bold</b> tail")],
            &PageGeometry::a4(),
        )
        .unwrap();

        let summary_line = &doc.lines()[1];
        let fonts: Vec<_> = summary_line.runs.iter().map(|r| r.font).collect();
        assert!(fonts.contains(&Font::TimesBold));
        assert!(fonts.contains(&Font::TimesRoman));
    }

    #[test]
    fn test_wrap_respects_width() {
        let spans = vec![Span {
            text: "alpha beta gamma delta epsilon zeta".into(),
            font: Font::TimesRoman,
        }];
        let lines = wrap(&spans, 13.0, 80.0);

        assert!(lines.len() > 1);
        for line in &lines {
            let w: f32 = line
                .iter()
                .map(|(text, font)| text_width(*font, 13.0, text))
                .sum();
            assert!(w <= 80.0 + EPSILON);
        }
    }

    #[test]
    fn test_wrap_hard_splits_overlong_words() {
        let spans = vec![Span {
            text: "x".repeat(400),
            font: Font::TimesRoman,
        }];
        let lines = wrap(&spans, 13.0, 100.0);

        assert!(lines.len() > 1);
        let total: usize = lines
            .iter()
            .flat_map(|l| l.iter().map(|(t, _)| t.chars().count()))
            .sum();
        assert_eq!(total, 400);
    }
}
