//! TransformationResult Schema
//!
//! Strict JSON contract returned by the generative text model.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::sanitize::truncate_chars;

pub const MAX_TITLE_CHARS: usize = 70;
pub const MAX_SEO_SUMMARY_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformationResult {
    pub titulo: String,
    pub resumo_seo: String,
    pub produto_venda: String,
    pub conteudo_html: String,
}

impl TransformationResult {
    /// Parses a raw model response, tolerating markdown code fences
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned = strip_code_fences(raw);
        let mut result: TransformationResult = serde_json::from_str(cleaned.trim())
            .map_err(|e| PipelineError::MalformedOutput(e.to_string()))?;

        if result.titulo.trim().is_empty() || result.produto_venda.trim().is_empty() {
            return Err(PipelineError::MalformedOutput(
                "empty titulo or produto_venda".to_string(),
            ));
        }

        result.titulo = truncate_chars(result.titulo.trim(), MAX_TITLE_CHARS);
        result.resumo_seo = truncate_chars(result.resumo_seo.trim(), MAX_SEO_SUMMARY_CHARS);
        result.produto_venda = result.produto_venda.trim().to_string();
        Ok(result)
    }
}

/// Removes ```json / ``` delimiters anywhere in the response
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}
