//! IgdbContentProvider -- [`ContentProvider`] backed by the IGDB v4 API.
//!
//! Queries are POSTed to `{base_url}/games` as plain-text field/where/limit
//! statements. Requests carry the configured `Client-ID` header and, when
//! present, a bearer token read from `VERSUS_CONTENT_TOKEN`.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};
use versus_core::content::provider::ContentProvider;
use versus_types::config::ContentProviderConfig;
use versus_types::error::ContentError;
use versus_types::id::ExternalId;
use versus_types::item::{CatalogEntry, Motivation, Submotivation};

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "VERSUS_CONTENT_TOKEN";

const GAME_FIELDS: &str =
    "name,slug,summary,cover.image_id,similar_games,themes.name,keywords.name";

/// IGDB content provider.
///
/// Does not derive Debug; the token is a [`SecretString`] and is only
/// exposed when building request headers.
pub struct IgdbContentProvider {
    client: reqwest::Client,
    base_url: String,
    client_id: Option<String>,
    token: Option<SecretString>,
}

impl IgdbContentProvider {
    /// Build a provider from config, with an explicit token.
    pub fn new(
        config: &ContentProviderConfig,
        token: Option<SecretString>,
    ) -> Result<Self, ContentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContentError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            token,
        })
    }

    /// Build a provider from config, reading the token from [`TOKEN_ENV`].
    pub fn from_env(config: &ContentProviderConfig) -> Result<Self, ContentError> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);
        if token.is_none() {
            debug!("{TOKEN_ENV} not set, content provider requests are unauthenticated");
        }
        Self::new(config, token)
    }

    async fn query_games(&self, body: String) -> Result<Vec<CatalogEntry>, ContentError> {
        let url = format!("{}/games", self.base_url);
        let mut request = self
            .client
            .post(&url)
            .header("accept", "application/json")
            .body(body);
        if let Some(client_id) = &self.client_id {
            request = request.header("Client-ID", client_id);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let games: Vec<IgdbGame> = response
            .json()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))?;

        Ok(games.into_iter().filter_map(IgdbGame::into_entry).collect())
    }
}

fn request_error(e: reqwest::Error) -> ContentError {
    if e.is_timeout() {
        ContentError::Timeout
    } else {
        ContentError::Request(e.to_string())
    }
}

/// Quote a keyword for an IGDB `where` clause.
fn quote(keyword: &str) -> String {
    format!("\"{}\"", keyword.replace('\\', "\\\\").replace('"', "\\\""))
}

fn by_ids_query(ids: &[ExternalId]) -> String {
    let ids = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("fields {GAME_FIELDS}; where id = ({ids}); limit 500;")
}

fn by_keywords_query(keywords: &[String], limit: u32) -> String {
    let keywords = keywords
        .iter()
        .map(|k| quote(k))
        .collect::<Vec<_>>()
        .join(",");
    format!("fields {GAME_FIELDS}; where keywords.name = ({keywords}); limit {limit};")
}

#[derive(Debug, Deserialize)]
struct IgdbGame {
    id: u64,
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    cover: Option<IgdbCover>,
    #[serde(default)]
    similar_games: Vec<u64>,
    #[serde(default)]
    themes: Vec<IgdbNamed>,
    #[serde(default)]
    keywords: Vec<IgdbNamed>,
}

#[derive(Debug, Deserialize)]
struct IgdbCover {
    image_id: String,
}

#[derive(Debug, Deserialize)]
struct IgdbNamed {
    name: String,
}

impl IgdbGame {
    fn into_entry(self) -> Option<CatalogEntry> {
        let external_id = match ExternalId::new(self.id) {
            Ok(id) => id,
            Err(e) => {
                warn!("dropping catalog entry: {e}");
                return None;
            }
        };

        Some(CatalogEntry {
            external_id,
            name: self.name,
            slug: self.slug,
            summary: self.summary,
            tags: self
                .themes
                .iter()
                .filter_map(|t| Motivation::new(&t.name).ok())
                .collect(),
            sub_tags: self
                .keywords
                .iter()
                .filter_map(|k| Submotivation::new(&k.name).ok())
                .collect(),
            related_ids: self
                .similar_games
                .into_iter()
                .filter_map(|id| ExternalId::new(id).ok())
                .collect(),
            cover_image_id: self.cover.map(|c| c.image_id),
        })
    }
}

impl ContentProvider for IgdbContentProvider {
    fn name(&self) -> &str {
        "igdb"
    }

    async fn fetch_by_ids(&self, ids: &[ExternalId]) -> Result<Vec<CatalogEntry>, ContentError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query_games(by_ids_query(ids)).await
    }

    async fn search_by_keywords(
        &self,
        keywords: &[String],
        limit: u32,
    ) -> Result<Vec<CatalogEntry>, ContentError> {
        if keywords.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        self.query_games(by_keywords_query(keywords, limit)).await
    }
}
