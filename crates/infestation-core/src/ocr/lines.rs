//! Reconstruction of text lines from unordered word boxes.

use std::fmt;

use crate::geometry::{position_key, BoundingBox, Bounded};
use crate::ocr::Word;

/// A row of words sharing one rounded vertical center, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    words: Vec<&'a Word>,
}

impl<'a> Line<'a> {
    pub fn new(mut words: Vec<&'a Word>, precision: u32) -> Self {
        words.sort_by(|a, b| {
            a.bbox
                .center(precision)
                .x
                .total_cmp(&b.bbox.center(precision).x)
        });
        Self { words }
    }

    pub fn words(&self) -> &[&'a Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_texts(&self) -> Vec<String> {
        self.words.iter().map(|w| w.text()).collect()
    }

    pub fn text(&self) -> String {
        self.word_texts().join(" ")
    }

    /// Average width of one character of this line's text.
    pub fn char_width(&self) -> f64 {
        let chars = self.text().chars().count();
        if chars == 0 {
            return 0.0;
        }
        self.width() / chars as f64
    }
}

impl Bounded for Line<'_> {
    /// Vertical extent of the leftmost word, horizontal extent from the
    /// leftmost word's left edge to the rightmost word's right edge.
    fn bounding_box(&self) -> BoundingBox {
        match (self.words.first(), self.words.last()) {
            (Some(first), Some(last)) => BoundingBox::from_extents(
                first.pos_left(),
                first.pos_top(),
                last.pos_right(),
                first.pos_bottom(),
            ),
            _ => BoundingBox::default(),
        }
    }
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A line rendered with an indentation that mimics its position on the page.
#[derive(Debug, Clone)]
pub struct PaddedLine<'a> {
    pub line: Line<'a>,
    pub char_width: f64,
    pub print_scale: f64,
}

impl PaddedLine<'_> {
    pub fn padding(&self) -> usize {
        if !self.char_width.is_finite() || self.char_width <= 0.0 {
            return 0;
        }
        let pad = (self.print_scale * self.line.pos_left() / self.char_width).round();
        if pad.is_finite() && pad > 0.0 {
            pad as usize
        } else {
            0
        }
    }
}

impl fmt::Display for PaddedLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", " ".repeat(self.padding()), self.line)
    }
}

/// Group words into lines by their vertical center rounded to `precision`.
///
/// Lines come out top to bottom. An empty word list yields no lines.
pub fn reconstruct_lines(mut words: Vec<&Word>, precision: u32) -> Vec<Line<'_>> {
    words.sort_by_key(|w| position_key(w.bbox.center(precision).y, precision));

    words
        .chunk_by(|a, b| {
            position_key(a.bbox.center(precision).y, precision)
                == position_key(b.bbox.center(precision).y, precision)
        })
        .map(|group| Line::new(group.to_vec(), precision))
        .collect()
}
