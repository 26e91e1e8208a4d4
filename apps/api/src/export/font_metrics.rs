//! Glyph-width measurement and greedy line wrapping for PDF export.
//!
//! Widths are in em units (relative to font size). The core Helvetica font uses
//! a static table taken from its AFM metrics; an embedded TrueType font is
//! measured from its own `hmtx` advances.

/// Static character-width table for a core PDF font.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
pub struct FontMetricTable {
    pub name: &'static str,
    widths: [f32; 95],
    /// Fallback width for characters outside 0x20..=0x7E.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }
}

/// Helvetica (PDF core font) AFM advance widths / 1000.
pub static HELVETICA: FontMetricTable = FontMetricTable {
    name: "Helvetica",
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
};

/// Width source for the font actually used in a document.
pub enum GlyphMetrics<'a> {
    Table(&'static FontMetricTable),
    Face(ttf_parser::Face<'a>),
}

impl GlyphMetrics<'_> {
    /// Rendered width of `s` in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        match self {
            GlyphMetrics::Table(table) => table.measure_str(s),
            GlyphMetrics::Face(face) => {
                let units_per_em = f32::from(face.units_per_em().max(1));
                // Missing glyphs render as .notdef; half an em is close enough.
                let fallback = units_per_em / 2.0;
                s.chars()
                    .map(|c| {
                        face.glyph_index(c)
                            .and_then(|g| face.glyph_hor_advance(g))
                            .map(f32::from)
                            .unwrap_or(fallback)
                            / units_per_em
                    })
                    .sum()
            }
        }
    }

    /// Greedy word wrap of one logical line into rows no wider than `max_width_em`.
    ///
    /// Breaks at single spaces; a word wider than a whole row is broken by
    /// character. An empty line yields one empty row.
    pub fn wrap_line(&self, line: &str, max_width_em: f32) -> Vec<String> {
        let space_w = self.measure_str(" ");
        let mut rows = Vec::new();
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for word in line.split(' ') {
            let word_w = self.measure_str(word);

            if current.is_empty() && word_w <= max_width_em {
                current.push_str(word);
                current_w = word_w;
                continue;
            }
            if !current.is_empty() && current_w + space_w + word_w <= max_width_em {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
                continue;
            }

            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_w = 0.0;
            }
            if word_w <= max_width_em {
                current.push_str(word);
                current_w = word_w;
                continue;
            }
            for c in word.chars() {
                let mut buf = [0u8; 4];
                let c_w = self.measure_str(c.encode_utf8(&mut buf));
                if !current.is_empty() && current_w + c_w > max_width_em {
                    rows.push(std::mem::take(&mut current));
                    current_w = 0.0;
                }
                current.push(c);
                current_w += c_w;
            }
        }

        rows.push(current);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helvetica() -> GlyphMetrics<'static> {
        GlyphMetrics::Table(&HELVETICA)
    }

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(HELVETICA.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let w = HELVETICA.measure_str("Hi");
        assert!((w - (0.722 + 0.222)).abs() < 1e-6);
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        assert!((HELVETICA.measure_str("é") - HELVETICA.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_short_line_is_one_row() {
        assert_eq!(helvetica().wrap_line("Dear Hiring Manager,", 50.0), vec!["Dear Hiring Manager,"]);
    }

    #[test]
    fn test_empty_line_is_one_empty_row() {
        assert_eq!(helvetica().wrap_line("", 50.0), vec![String::new()]);
    }

    #[test]
    fn test_long_line_wraps_at_spaces() {
        let m = helvetica();
        // "aaaa" = 2.224em, "aaaa aaaa" = 4.726em
        let rows = m.wrap_line("aaaa aaaa aaaa", 5.0);
        assert_eq!(rows, vec!["aaaa aaaa", "aaaa"]);
        for row in &rows {
            assert!(m.measure_str(row) <= 5.0);
        }
    }

    #[test]
    fn test_overlong_word_broken_by_character() {
        let m = helvetica();
        // each 'a' = 0.556em → 3 per 1.8em row
        let rows = m.wrap_line("aaaaaaa", 1.8);
        assert_eq!(rows, vec!["aaa", "aaa", "a"]);
    }

    #[test]
    fn test_wrap_preserves_all_words() {
        let line = "Experienced engineer with a track record of shipping reliable services";
        let rows = helvetica().wrap_line(line, 10.0);
        assert!(rows.len() > 1);
        assert_eq!(rows.join(" "), line);
    }
}
