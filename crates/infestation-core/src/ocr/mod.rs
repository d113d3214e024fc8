pub mod lines;
pub mod raw;

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ExtractionConfig;
use crate::error::InfestationError;
use crate::geometry::{BoundingBox, Bounded, Vertex};
use lines::{reconstruct_lines, Line};
use raw::{RawBoundingPoly, RawResponse};

/// A single recognized character.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub text: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl Bounded for Symbol {
    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A recognized word. Its box comes from the service, not from its symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub symbols: Vec<Symbol>,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl Word {
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }
}

impl Bounded for Word {
    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub words: Vec<Word>,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Bounded for Paragraph {
    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub paragraphs: Vec<Paragraph>,
    /// Block kind reported by the service (e.g. "TEXT", "TABLE").
    pub block_type: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl Bounded for Block {
    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

/// One recognized page image, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub width: u32,
    pub height: u32,
    pub confidence: f64,
    pub blocks: Vec<Block>,
}

/// A page of the source document and everything recognized on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub source: String,
    pub number: u32,
    /// Full text as recognized by the service.
    pub text: String,
    pub annotations: Vec<Annotation>,
}

impl Page {
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.annotations
            .iter()
            .flat_map(|a| a.blocks.iter())
            .flat_map(|b| b.paragraphs.iter())
    }

    /// Every word on the page, flattened out of the block hierarchy.
    pub fn words(&self) -> Vec<&Word> {
        self.paragraphs().flat_map(|p| p.words.iter()).collect()
    }

    /// Reconstructed text lines, top to bottom.
    pub fn lines(&self, config: &ExtractionConfig) -> Vec<Line<'_>> {
        reconstruct_lines(self.words(), config.precision)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page #{} of {}", self.number, self.source)
    }
}

/// An OCR'd document, identified by its source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub source: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// Load a saved service response from disk.
    pub fn load(path: &Path) -> Result<Document, InfestationError> {
        let json = std::fs::read_to_string(path)?;
        Document::from_json(&path.display().to_string(), &json)
    }

    /// Parse a service response. Per-page payloads live at `responses[0].responses`.
    pub fn from_json(source: &str, json: &str) -> Result<Document, InfestationError> {
        let raw: RawResponse = serde_json::from_str(json)?;
        Document::from_raw(source, raw)
    }

    pub fn from_raw(source: &str, raw: RawResponse) -> Result<Document, InfestationError> {
        let file = raw.responses.into_iter().next().ok_or_else(|| {
            InfestationError::DocumentStructure(format!("{source}: response has no 'responses[0]'"))
        })?;

        let pages = file
            .responses
            .into_iter()
            .enumerate()
            .map(|(i, page)| {
                let number = page.context.page_number.unwrap_or(i as u32 + 1);
                let mut degenerate = 0usize;
                let (text, annotations) = match page.full_text_annotation {
                    Some(annotation) => {
                        let annotations = annotation
                            .pages
                            .into_iter()
                            .map(|a| convert_annotation(a, &mut degenerate))
                            .collect();
                        (annotation.text, annotations)
                    }
                    None => (String::new(), Vec::new()),
                };
                if degenerate > 0 {
                    warn!(
                        source,
                        page = number,
                        count = degenerate,
                        "substituted zero-sized boxes for missing geometry"
                    );
                }
                Page {
                    source: source.to_string(),
                    number,
                    text,
                    annotations,
                }
            })
            .collect();

        Ok(Document {
            source: source.to_string(),
            pages,
        })
    }
}

fn convert_annotation(raw: raw::RawAnnotation, degenerate: &mut usize) -> Annotation {
    Annotation {
        width: raw.width,
        height: raw.height,
        confidence: raw.confidence,
        blocks: raw
            .blocks
            .into_iter()
            .map(|b| Block {
                bbox: convert_box(b.bounding_box.as_ref(), "block", degenerate),
                block_type: b.block_type.unwrap_or_else(|| "UNKNOWN".into()),
                confidence: b.confidence,
                paragraphs: b
                    .paragraphs
                    .into_iter()
                    .map(|p| Paragraph {
                        bbox: convert_box(p.bounding_box.as_ref(), "paragraph", degenerate),
                        confidence: p.confidence,
                        words: p
                            .words
                            .into_iter()
                            .map(|w| convert_word(w, degenerate))
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn convert_word(raw: raw::RawWord, degenerate: &mut usize) -> Word {
    Word {
        bbox: convert_box(raw.bounding_box.as_ref(), "word", degenerate),
        confidence: raw.confidence,
        symbols: raw
            .symbols
            .into_iter()
            .map(|s| Symbol {
                bbox: convert_box(s.bounding_box.as_ref(), "symbol", degenerate),
                text: s.text,
                confidence: s.confidence,
            })
            .collect(),
    }
}

/// Missing or malformed geometry degrades to the all-zero box.
fn convert_box(
    raw: Option<&RawBoundingPoly>,
    kind: &'static str,
    degenerate: &mut usize,
) -> BoundingBox {
    let vertices: Option<Vec<Vertex>> = raw.map(|poly| {
        poly.normalized_vertices
            .iter()
            .map(|v| Vertex::new(v.x, v.y))
            .collect()
    });

    match vertices.as_deref().and_then(BoundingBox::from_vertices) {
        Some(bbox) => bbox,
        None => {
            debug!(kind, "missing or malformed bounding box");
            *degenerate += 1;
            BoundingBox::default()
        }
    }
}
