//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::error::TmdbError;
use super::types::{MovieDetail, MovieSummary, PageResult, TimeWindow, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Sub-resources embedded into the movie details response.
const DETAIL_APPEND: &str = "credits,videos";

/// Number of key characters shown in the startup log.
const KEY_PREFIX_LEN: usize = 4;

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as the `api_key` query parameter (may be empty).
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key.
    ///
    /// Optional: without a key the client still builds, but TMDB rejects
    /// every request with HTTP 401.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let api_key = self
            .api_key
            .map(|key| String::from(key.trim()))
            .unwrap_or_default();
        if api_key.is_empty() {
            tracing::error!(
                "TMDB API key is not set. Set TMDB_API_KEY; requests will be rejected until then"
            );
        } else {
            let prefix: String = api_key.chars().take(KEY_PREFIX_LEN).collect();
            tracing::debug!("TMDB API key loaded: {prefix}...");
        }

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET request with the API key and query params.
    ///
    /// Every failure is logged and returned; nothing is retried.
    #[instrument(skip_all, fields(path = %path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(?query, "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "Network error: no response from TMDB API");
            })
            .map_err(|e| TmdbError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            tracing::error!(status = status.as_u16(), %body, "TMDB API error");
            if status == StatusCode::UNAUTHORIZED {
                tracing::error!("Invalid TMDB API key. Check TMDB_API_KEY");
            }
            let message = serde_json::from_str::<TmdbErrorResponse>(&body)
                .map_or(body, |error_response| error_response.status_message);
            return Err(TmdbError::Upstream {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to read TMDB response body"))
            .map_err(|e| TmdbError::Transport(e.to_string()))?;
        let parsed: T = serde_json::from_str(&body)
            .inspect_err(|e| tracing::error!(error = %e, "failed to decode TMDB response"))
            .map_err(|e| TmdbError::Decode(format!("{path}: {e}")))?;
        Ok(parsed)
    }
}

/// TMDB rejects page 0; the smallest page is 1.
const fn page_param(page: u32) -> u32 {
    if page == 0 { 1 } else { page }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip(self))]
    async fn popular_movies(&self, page: u32) -> Result<PageResult<MovieSummary>> {
        let query = [("page", page_param(page).to_string())];
        self.get_json("movie/popular", &query).await
    }

    #[instrument(skip(self))]
    async fn top_rated_movies(&self, page: u32) -> Result<PageResult<MovieSummary>> {
        let query = [("page", page_param(page).to_string())];
        self.get_json("movie/top_rated", &query).await
    }

    #[instrument(skip(self))]
    async fn trending_movies(&self, window: TimeWindow) -> Result<PageResult<MovieSummary>> {
        let path = format!("trending/movie/{}", window.as_str());
        self.get_json(&path, &[]).await
    }

    #[instrument(skip(self))]
    async fn search_movies(&self, query: &str, page: u32) -> Result<PageResult<MovieSummary>> {
        let params = [
            ("query", String::from(query)),
            ("page", page_param(page).to_string()),
        ];
        self.get_json("search/movie", &params).await
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail> {
        let path = format!("movie/{movie_id}");
        let query = [("append_to_response", String::from(DETAIL_APPEND))];
        self.get_json(&path, &query).await
    }
}
