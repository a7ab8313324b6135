//! Width metrics for the base-14 Times faces.
//!
//! Widths are in thousandths of the font size, bucketed from the Adobe AFM
//! tables rather than copied glyph-by-glyph. The wrap only needs a
//! deterministic, reasonably close measure; the viewer positions glyphs from
//! the real font metrics at draw time.

use crate::layout::Font;

pub fn text_width(font: Font, size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(font, c)).sum();
    units as f32 * size / 1000.0
}

pub fn char_width(font: Font, c: char) -> u32 {
    match font {
        Font::TimesRoman => roman_width(c),
        Font::TimesBold => bold_width(c),
        Font::TimesItalic => italic_width(c),
    }
}

fn roman_width(c: char) -> u32 {
    match c {
        ' ' => 250,
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '!' | '\'' | '|' => 278,
        'f' | 't' | 'r' | 's' | '(' | ')' | '[' | ']' | '-' | '"' | '/' => 333,
        'I' => 333,
        'J' | 'F' => 389,
        'm' => 778,
        'w' => 722,
        'M' => 889,
        'W' => 944,
        'A' | 'V' => 722,
        'G' | 'H' | 'K' | 'N' | 'O' | 'Q' | 'U' | 'X' | 'Y' => 722,
        'D' | 'C' | 'R' => 667,
        'A'..='Z' => 611,
        '0'..='9' | '$' | '#' | '_' => 500,
        '&' => 778,
        '%' => 833,
        '?' => 444,
        _ => 500,
    }
}

fn bold_width(c: char) -> u32 {
    match c {
        ' ' => 250,
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '!' | '\'' | '|' => 278,
        'f' | 't' | 'r' | 's' | '(' | ')' | '[' | ']' | '-' | '"' | '/' => 333,
        'I' => 389,
        'J' => 500,
        'm' => 833,
        'w' => 722,
        'M' => 944,
        'W' => 1000,
        'A'..='Z' => 722,
        '0'..='9' | '$' | '#' | '_' => 500,
        '&' => 833,
        '%' => 1000,
        '?' => 500,
        _ => 540,
    }
}

fn italic_width(c: char) -> u32 {
    match c {
        ' ' => 250,
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '!' | '\'' | '|' => 278,
        'f' | 't' | 'r' | 's' | '(' | ')' | '[' | ']' | '-' | '"' | '/' => 333,
        'I' => 333,
        'm' => 722,
        'w' => 667,
        'M' => 833,
        'W' => 833,
        'A'..='Z' => 611,
        '0'..='9' | '$' | '#' | '_' => 500,
        '&' => 778,
        '%' => 833,
        '?' => 500,
        _ => 480,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_deterministic() {
        let a = text_width(Font::TimesRoman, 13.0, "The quick brown fox");
        let b = text_width(Font::TimesRoman, 13.0, "The quick brown fox");
        assert_eq!(a, b);
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width(Font::TimesRoman, 10.0, "hello");
        let large = text_width(Font::TimesRoman, 20.0, "hello");
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_narrow_vs_wide_glyphs() {
        assert!(char_width(Font::TimesRoman, 'i') < char_width(Font::TimesRoman, 'm'));
        assert!(char_width(Font::TimesRoman, 'W') > char_width(Font::TimesRoman, 'w'));
    }

    #[test]
    fn test_empty_text_has_zero_width() {
        assert_eq!(text_width(Font::TimesBold, 17.0, ""), 0.0);
    }
}
