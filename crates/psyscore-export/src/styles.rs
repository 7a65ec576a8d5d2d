use serde::{Deserialize, Serialize};

/// Typography and page layout for generated result documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    pub body_font: String,
    pub heading_font: String,
    /// Points.
    pub body_size: usize,
    pub heading1_size: usize,
    pub heading2_size: usize,
    pub heading3_size: usize,
    /// Uniform page margin.
    pub margin_inches: f64,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 12,
            heading1_size: 16,
            heading2_size: 14,
            heading3_size: 12,
            margin_inches: 0.8,
        }
    }
}
