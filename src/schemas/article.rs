//! Article Schema
//!
//! The persisted row. Column names match the `noticias` table consumed by the
//! publishing front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub titulo_viral: String,
    pub titulo_original: String,
    pub conteudo_html: String,
    pub resumo_seo: String,
    pub categoria: String,
    pub imagem_capa: String,
    pub imagem_alt: String,
    pub call_to_action_prod: String,
    pub link_afiliado_gerado: String,
    pub created_at: DateTime<Utc>,
    /// Source link, unique across the store
    pub fonte_original: String,
    pub views_fake: i32,
}
