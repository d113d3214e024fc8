use serde::{Deserialize, Serialize};

/// Decimal places used for every positional comparison unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A quadrilateral in normalized page coordinates (0..1).
///
/// Vertex order is left-top, right-top, right-bottom, left-bottom. Extents are
/// derived from the vertices on every call, so a skewed box still reports the
/// tightest axis-aligned bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    vertices: [Vertex; 4],
}

impl BoundingBox {
    pub fn new(vertices: [Vertex; 4]) -> Self {
        Self { vertices }
    }

    /// Axis-aligned box from its four extents.
    pub fn from_extents(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new([
            Vertex::new(left, top),
            Vertex::new(right, top),
            Vertex::new(right, bottom),
            Vertex::new(left, bottom),
        ])
    }

    /// Returns `None` unless exactly four vertices are given.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let vertices: [Vertex; 4] = vertices.try_into().ok()?;
        Some(Self::new(vertices))
    }

    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.vertices
    }

    pub fn top(&self) -> f64 {
        self.vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min)
    }

    pub fn bottom(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.y)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn left(&self) -> f64 {
        self.vertices.iter().map(|v| v.x).fold(f64::INFINITY, f64::min)
    }

    pub fn right(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.x)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Center point rounded to `precision` decimal places.
    pub fn center(&self, precision: u32) -> Vertex {
        Vertex::new(
            round_to((self.left() + self.right()) / 2.0, precision),
            round_to((self.top() + self.bottom()) / 2.0, precision),
        )
    }

    /// True for the all-zero box substituted for missing geometry.
    pub fn is_degenerate(&self) -> bool {
        *self == BoundingBox::default()
    }
}

pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Integer grouping key: `value` scaled by 10^precision and rounded.
///
/// Two positions share a key exactly when they are equal after rounding,
/// without comparing floats for equality.
pub fn position_key(value: f64, precision: u32) -> i64 {
    (value * 10f64.powi(precision as i32)).round() as i64
}

/// Geometry shared by every text unit of the OCR hierarchy.
pub trait Bounded {
    fn bounding_box(&self) -> BoundingBox;

    fn pos_top(&self) -> f64 {
        self.bounding_box().top()
    }

    fn pos_bottom(&self) -> f64 {
        self.bounding_box().bottom()
    }

    fn pos_left(&self) -> f64 {
        self.bounding_box().left()
    }

    fn pos_right(&self) -> f64 {
        self.bounding_box().right()
    }

    fn width(&self) -> f64 {
        self.bounding_box().width()
    }

    fn height(&self) -> f64 {
        self.bounding_box().height()
    }

    fn center(&self) -> Vertex {
        self.bounding_box().center(DEFAULT_PRECISION)
    }
}

impl Bounded for BoundingBox {
    fn bounding_box(&self) -> BoundingBox {
        *self
    }
}
