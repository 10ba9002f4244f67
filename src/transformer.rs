//! Content transformation
//!
//! Builds the editorial prompt, calls the model in JSON mode and parses the
//! reply into a `TransformationResult`.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::llm::TextCompletion;
use crate::schemas::TransformationResult;

/// Product suggested to the model when a story has no concrete tie-in
pub const FALLBACK_PRODUCT: &str = "Kindle";

pub struct ContentTransformer {
    model: Arc<dyn TextCompletion>,
    temperature: f32,
}

impl ContentTransformer {
    pub fn new(model: Arc<dyn TextCompletion>, temperature: f32) -> Self {
        Self { model, temperature }
    }

    /// Rewrites one story; any call or parse failure skips the entry
    ///
    /// `summary` is expected to be sanitized and bounded already.
    pub async fn transform(
        &self,
        title: &str,
        summary: &str,
        category: &str,
    ) -> Result<TransformationResult> {
        let prompt = build_prompt(title, summary, category);

        debug!(model = %self.model.model(), category = %category, "Transforming entry");

        let raw = self.model.complete_json(&prompt, self.temperature).await?;
        TransformationResult::parse(&raw).map_err(|e| {
            warn!(error = %e, response_len = raw.len(), "Model returned unusable JSON");
            e
        })
    }
}

/// Fixed instruction template
pub fn build_prompt(title: &str, summary: &str, category: &str) -> String {
    format!(
        r#"Você é editor-chefe de um portal de notícias e especialista em e-commerce.

Tarefas:
1. Reescreva a notícia abaixo como um artigo original, em português, com tom adequado à editoria '{category}'.
2. Escolha UM produto físico vendido na Amazon que tenha relação com a notícia.
   Exemplo: notícia sobre "Copa do Mundo" -> "Camisa Seleção Brasil".
   Exemplo: notícia sobre "Dólar Alto" -> "Livro Investimentos".
   Se a notícia for abstrata demais para um produto concreto (ex.: política), use "{fallback}".

Notícia: "{title}" - "{summary}"

Responda SOMENTE com um objeto JSON com exatamente estas chaves:
{{
    "titulo": "título chamativo (máximo 70 caracteres)",
    "resumo_seo": "resumo para buscadores (máximo 150 caracteres)",
    "produto_venda": "nome do produto na Amazon",
    "conteudo_html": "<p>texto jornalístico em HTML</p>"
}}"#,
        category = category,
        fallback = FALLBACK_PRODUCT,
        title = title,
        summary = summary,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedModel {
        reply: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextCompletion for CannedModel {
        async fn complete_json(&self, prompt: &str, _temperature: f32) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(PipelineError::ModelError)
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }

        fn model(&self) -> &str {
            "canned"
        }
    }

    fn transformer(reply: std::result::Result<&str, &str>) -> (ContentTransformer, Arc<CannedModel>) {
        let model = Arc::new(CannedModel {
            reply: reply.map(String::from).map_err(String::from),
            prompts: Mutex::new(Vec::new()),
        });
        (ContentTransformer::new(model.clone(), 0.7), model)
    }

    #[test]
    fn test_prompt_mentions_inputs() {
        let prompt = build_prompt("Dólar dispara", "Moeda sobe 3%", "MERCADO");
        assert!(prompt.contains("'MERCADO'"));
        assert!(prompt.contains("\"Dólar dispara\" - \"Moeda sobe 3%\""));
        assert!(prompt.contains(FALLBACK_PRODUCT));
        for key in ["titulo", "resumo_seo", "produto_venda", "conteudo_html"] {
            assert!(prompt.contains(key));
        }
    }

    #[tokio::test]
    async fn test_transform_success() {
        let (t, model) = transformer(Ok(
            r#"{"titulo":"T","resumo_seo":"R","produto_venda":"Kindle","conteudo_html":"<p>c</p>"}"#,
        ));
        let result = t.transform("Title", "Resumo da notícia", "PLANTÃO").await.unwrap();
        assert_eq!(result.produto_venda, "Kindle");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"Title\" - \"Resumo da notícia\""));
    }

    #[tokio::test]
    async fn test_transform_failures() {
        let (t, _) = transformer(Err("connection refused"));
        assert!(matches!(
            t.transform("a", "b", "c").await,
            Err(PipelineError::ModelError(_))
        ));

        let (t, _) = transformer(Ok("Sure! Here is the article you asked for."));
        assert!(matches!(
            t.transform("a", "b", "c").await,
            Err(PipelineError::MalformedOutput(_))
        ));
    }
}
