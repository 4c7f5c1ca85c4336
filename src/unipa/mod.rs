//! Client for the UniPA course catalog (offertaformativa.unipa.it).
//!
//! The catalog is a JSF/Seam application that requires stateful view-state
//! round-tripping and a cookie-based session, so every search is a two-step
//! exchange: prime a session from the search page, then replay the form
//! submission the way a browser would.

pub mod errors;
pub mod form;
pub mod parse;
pub mod types;

pub use errors::UnipaError;
pub use parse::{CurriculumLink, SearchResult};
pub use types::{Anno, CourseType};

use anyhow::Context;
use cookie::Cookie;
use html_scraper::Html;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::unipa::form::FormState;

/// Production search page of the UniPA catalog.
pub const SEARCH_URL: &str =
    "https://offertaformativa.unipa.it/offweb/public/corso/ricercaSemplice.seam";

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:102.0) Gecko/20100101 Firefox/102.0";
const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "it,en-US;q=0.7,en;q=0.3";

/// Client for searching the UniPA course catalog.
pub struct UnipaClient {
    http: reqwest::Client,
    search_url: String,
    /// Scheme+host of `search_url`, sent as the `Origin` header.
    origin: String,
}

impl UnipaClient {
    /// Build a client against the production catalog.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Self::with_search_url(SEARCH_URL.to_string(), timeout)
    }

    /// Build a client against an arbitrary search page (tests point this at
    /// a local stub).
    pub fn with_search_url(search_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let origin = Url::parse(&search_url)
            .context("Invalid search URL")?
            .origin()
            .ascii_serialization();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build reqwest client")?;
        Ok(Self {
            http,
            search_url,
            origin,
        })
    }

    /// Run a catalog search for the given year.
    pub async fn search(&self, anno: Anno) -> Result<Vec<SearchResult>, UnipaError> {
        let (cookie, state) = self.bootstrap().await?;
        let params = state.into_params(anno);

        let resp = self
            .http
            .post(&self.search_url)
            .headers(self.search_headers(&cookie))
            .form(&params)
            .send()
            .await
            .context("Failed to POST search form")?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UnipaError::UpstreamStatus {
                status: status.as_u16(),
                url: self.search_url.clone(),
            });
        }

        let body = resp
            .text()
            .await
            .context("Failed to read search response body")?;
        let results = parse::parse_search_results(&Html::parse_document(&body));
        info!(anno = %anno, results = results.len(), "Catalog search complete");

        Ok(results)
    }

    /// Prime a session: fetch the search page, require a `Set-Cookie`
    /// response header, and scrape the hidden form state from the body.
    async fn bootstrap(&self) -> Result<(String, FormState), UnipaError> {
        let resp = self
            .http
            .get(&self.search_url)
            .send()
            .await
            .context("Failed to GET search page")?;

        let cookie =
            session_cookie_header(resp.headers()).ok_or(UnipaError::MissingSessionCookie)?;

        let body = resp
            .text()
            .await
            .context("Failed to read search page body")?;
        let state = FormState::extract(&Html::parse_document(&body));
        debug!(
            fields = state.fields.len(),
            view_state = %state.view_state,
            "Extracted search form state"
        );

        Ok((cookie, state))
    }

    /// Fixed browser-mimicking header set for the postback. Deterministic
    /// given the cookie; `Content-Type` comes from reqwest's form encoding
    /// and `Accept-Encoding` from its transport features.
    fn search_headers(&self, cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE),
        );
        if let Ok(value) = HeaderValue::from_str(&self.search_url) {
            headers.insert(header::REFERER, value);
        }
        if let Ok(value) = HeaderValue::from_str(&self.origin) {
            headers.insert(header::ORIGIN, value);
        }
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            HeaderValue::from_static("1"),
        );
        headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        if let Ok(value) = HeaderValue::from_str(cookie) {
            headers.insert(header::COOKIE, value);
        }
        headers
    }
}

/// Fold every `Set-Cookie` response header into a single `Cookie` request
/// value (`name=value; name2=value2`). `None` when no cookie was issued.
fn session_cookie_header(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<String> = headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| {
            Cookie::parse(raw)
                .ok()
                .map(|c| format!("{}={}", c.name(), c.value()))
        })
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}
