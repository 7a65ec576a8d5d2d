use crate::docx::generate_docx;
use crate::error::ExportError;
use crate::format::FormattedResult;
use crate::render::render_template;
use crate::styles::DocumentStyles;
use crate::templates::TemplateStore;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A finished result document, ready to be saved or attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Produces the downloadable document for a formatted result.
pub trait DocumentGenerator {
    fn generate(&self, result: &FormattedResult) -> Result<GeneratedDocument, ExportError>;
}

/// Renders the instrument's template with the payload and packs it as DOCX.
#[derive(Debug, Clone, Default)]
pub struct DocxGenerator {
    templates: TemplateStore,
    styles: DocumentStyles,
}

impl DocxGenerator {
    pub fn new(templates: TemplateStore, styles: DocumentStyles) -> Self {
        Self { templates, styles }
    }
}

impl DocumentGenerator for DocxGenerator {
    fn generate(&self, result: &FormattedResult) -> Result<GeneratedDocument, ExportError> {
        let template = self.templates.load(&result.template)?;
        let rendered = render_template(&result.template, &template, &result.payload)?;
        let bytes = generate_docx(&rendered, &self.styles)?;

        let file_name = document_file_name(result);
        tracing::info!(file_name, size = bytes.len(), "generated result document");
        Ok(GeneratedDocument {
            file_name,
            content_type: DOCX_CONTENT_TYPE,
            bytes,
        })
    }
}

/// `<template>_result_<yyyy-mm-dd>.docx`, dated by the evaluation date.
pub fn document_file_name(result: &FormattedResult) -> String {
    let date = result.payload.text("evaluated_on").unwrap_or("undated");
    format!("{}_result_{date}.docx", result.template)
}
