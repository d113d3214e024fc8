//! Wire shapes of the document-recognition service's JSON response.
//!
//! The service omits zero-valued coordinates and occasionally whole
//! `boundingBox` objects, so nearly every field is defaulted.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub responses: Vec<RawFileResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFileResponse {
    #[serde(default)]
    pub responses: Vec<RawPageResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageResponse {
    #[serde(default)]
    pub context: RawContext,
    pub full_text_annotation: Option<RawTextAnnotation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContext {
    pub page_number: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTextAnnotation {
    #[serde(default)]
    pub pages: Vec<RawAnnotation>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnnotation {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub bounding_box: Option<RawBoundingPoly>,
    #[serde(default)]
    pub paragraphs: Vec<RawParagraph>,
    pub block_type: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParagraph {
    pub bounding_box: Option<RawBoundingPoly>,
    #[serde(default)]
    pub words: Vec<RawWord>,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWord {
    pub bounding_box: Option<RawBoundingPoly>,
    #[serde(default)]
    pub symbols: Vec<RawSymbol>,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSymbol {
    pub bounding_box: Option<RawBoundingPoly>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBoundingPoly {
    #[serde(default)]
    pub normalized_vertices: Vec<RawVertex>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawVertex {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}
