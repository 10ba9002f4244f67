//! Static category → feed catalog

use serde::{Deserialize, Serialize};

/// One feed endpoint under its editorial category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub category: String,
    pub url: String,
}

impl Source {
    pub fn new(category: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            url: url.into(),
        }
    }
}

const DEFAULT_CATALOG: &[(&str, &[&str])] = &[
    ("PLANTÃO", &[
        "https://g1.globo.com/rss/g1/mundo/",
        "https://feeds.bbci.co.uk/portuguese/rss.xml",
        "https://www.cnnbrasil.com.br/feed/",
    ]),
    ("ARENA", &[
        "https://ge.globo.com/rss/ge/",
        "https://www.espn.com.br/espn/rss/news",
        "https://www.uol.com.br/esporte/rss.xml",
    ]),
    ("HOLOFOTE", &[
        "https://revistaquem.globo.com/rss/quem/",
        "https://vogue.globo.com/rss/vogue/gente/",
        "https://ofuxico.com.br/feed/",
    ]),
    ("MERCADO", &[
        "https://www.infomoney.com.br/feed/",
        "https://exame.com/feed/",
        "https://br.investing.com/rss/news.rss",
    ]),
    ("PIXEL", &[
        "https://canaltech.com.br/rss/",
        "https://tecnoblog.net/feed/",
        "https://olhardigital.com.br/feed/",
    ]),
    ("PLAY", &[
        "https://br.ign.com/feed.xml",
        "https://jovemnerd.com.br/feed/",
    ]),
    ("VITAL", &[
        "https://saude.abril.com.br/feed/",
        "https://www.minhavida.com.br/rss",
    ]),
    ("MOTOR", &[
        "https://quatrorodas.abril.com.br/feed/",
        "https://motor1.uol.com.br/rss/news/all/",
    ]),
    ("ESTILO", &[
        "https://vogue.globo.com/rss/vogue/moda/",
        "https://elle.com.br/feed",
    ]),
    ("VIRAL", &[
        "https://www.buzzfeed.com/br/index.xml",
        "https://www.hypeness.com.br/feed/",
    ]),
];

/// Ordered mapping of category name to its feed sources
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    categories: Vec<(String, Vec<Source>)>,
}

impl SourceCatalog {
    /// The built-in portal catalog
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        for (category, urls) in DEFAULT_CATALOG {
            for url in *urls {
                catalog.add(category, *url);
            }
        }
        catalog
    }

    /// Builds a catalog from (category, urls) pairs
    pub fn from_pairs<C, U>(pairs: impl IntoIterator<Item = (C, Vec<U>)>) -> Self
    where
        C: Into<String>,
        U: Into<String>,
    {
        let mut catalog = Self::default();
        for (category, urls) in pairs {
            let category = category.into();
            for url in urls {
                catalog.add(&category, url);
            }
        }
        catalog
    }

    /// Adds a source, creating the category if needed
    pub fn add(&mut self, category: &str, url: impl Into<String>) {
        let source = Source::new(category, url);
        match self.categories.iter_mut().find(|(name, _)| name == category) {
            Some((_, sources)) => sources.push(source),
            None => self.categories.push((category.to_string(), vec![source])),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn sources(&self, category: &str) -> &[Source] {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, sources)| sources.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|(_, s)| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
