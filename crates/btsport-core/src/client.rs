//! HTTP client for the BT Sport endpoints
//!
//! Thin wrapper over `reqwest` that follows redirects by hand so cookies
//! set on intermediate hops are not lost. The client keeps no cookie jar
//! between calls: session cookies are always passed in explicitly.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue, LOCATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{BtSportError, Result};
use crate::url::SITE_BASE_URL;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const MAX_REDIRECTS: usize = 5;

/// Locations of every upstream endpoint the pipeline talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Video hub page embedding the category list
    pub categories_url: String,
    /// Base that category page paths are resolved against
    pub site_base_url: String,
    /// Video search API
    pub search_api_url: String,
    /// Site sign-in form target
    pub login_url: String,
    /// `TARGET` field sent with the sign-in form
    pub login_target: String,
    /// SAML federation exchange
    pub federation_url: String,
    /// AVS backend (login and CDN resolution)
    pub avs_url: String,
    /// All-channels programme guide feed
    pub epg_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            categories_url: "http://sport.bt.com/all-videos/videos-01364228997406".to_string(),
            site_base_url: SITE_BASE_URL.to_string(),
            search_api_url: "http://api-search.sport.bt.com/search/sport/select".to_string(),
            login_url: "https://signin1.bt.com/siteminderagent/forms/login.fcc".to_string(),
            login_target: "https://home.bt.com/secure/".to_string(),
            federation_url: "https://samlfed.bt.com/sportgetfedwebhls".to_string(),
            avs_url: "https://be.avs.bt.com/AVS/besc".to_string(),
            epg_url: "https://epg.cdn.vision.bt.com/JSON/all".to_string(),
        }
    }
}

impl Endpoints {
    /// Endpoints with the production paths mounted under a single host
    ///
    /// Useful for proxies and mock servers.
    ///
    /// # Example
    /// ```
    /// use btsport_core::Endpoints;
    /// let endpoints = Endpoints::rooted_at("http://127.0.0.1:8080/");
    /// assert_eq!(endpoints.avs_url, "http://127.0.0.1:8080/AVS/besc");
    /// ```
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            categories_url: format!("{}/all-videos/videos-01364228997406", base),
            site_base_url: format!("{}/", base),
            search_api_url: format!("{}/search/sport/select", base),
            login_url: format!("{}/siteminderagent/forms/login.fcc", base),
            login_target: "https://home.bt.com/secure/".to_string(),
            federation_url: format!("{}/sportgetfedwebhls", base),
            avs_url: format!("{}/AVS/besc", base),
            epg_url: format!("{}/JSON/all", base),
        }
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Upstream endpoint locations
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

/// A completed request: final status, body and every cookie set along the way
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: StatusCode,
    pub body: String,
    cookies: HashMap<String, String>,
}

impl Exchange {
    /// Value of a cookie set by any response in the redirect chain
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Decodes the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP client wrapper for the BT Sport endpoints
///
/// Handles all HTTP communication, including:
/// - Manual redirect following with cookie collection
/// - Explicit per-request cookies (no shared jar)
/// - Proper headers (User-Agent, Accept-Language)
pub struct BtSportClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl BtSportClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));
                headers
            })
            .build()
            .map_err(BtSportError::HttpError)?;

        Ok(Self {
            client,
            endpoints: config.endpoints,
        })
    }

    /// Upstream endpoint locations this client was configured with
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Issue a GET request
    ///
    /// # Arguments
    /// * `url` - Absolute URL
    /// * `query` - Query parameters (repeated keys allowed)
    /// * `cookies` - Cookies sent with the first request
    ///
    /// # Errors
    /// - `HttpError` - Network errors or a 5xx status
    /// - `InvalidUrl` - A redirect pointed somewhere unparseable, or the
    ///   chain went past [`MAX_REDIRECTS`] hops
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        cookies: &[(&str, &str)],
    ) -> Result<Exchange> {
        self.execute(Method::GET, url, query, cookies, None).await
    }

    /// Issue a form-encoded POST request
    pub async fn post_form(
        &self,
        url: &str,
        query: &[(&str, String)],
        form: &[(&str, &str)],
    ) -> Result<Exchange> {
        self.execute(Method::POST, url, query, &[], Some(form)).await
    }

    /// Fetch a page body with a plain GET
    pub async fn fetch(&self, url: &str) -> Result<String> {
        Ok(self.get(url, &[], &[]).await?.body)
    }

    /// Perform a request, following up to [`MAX_REDIRECTS`] redirects by hand
    ///
    /// Cookies received on every hop are collected into the returned
    /// [`Exchange`] and forwarded on the following hops. 301/302/303
    /// switch to GET and drop the body, 307/308 replay it.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        cookies: &[(&str, &str)],
        form: Option<&[(&str, &str)]>,
    ) -> Result<Exchange> {
        let mut current_url = url.to_string();
        let mut method = method;
        let mut form = form;
        let mut collected: HashMap<String, String> = cookies
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let mut received: HashMap<String, String> = HashMap::new();

        for hop in 0..=MAX_REDIRECTS {
            debug!(%method, url = %current_url, hop, "sending request");

            let mut request = self.client.request(method.clone(), &current_url);
            if hop == 0 && !query.is_empty() {
                request = request.query(query);
            }
            if !collected.is_empty() {
                request = request.header(COOKIE, cookie_header(&collected));
            }
            if let Some(form) = form {
                request = request.form(form);
            }

            let response = request.send().await.map_err(BtSportError::HttpError)?;
            let status = response.status();

            for cookie in response.cookies() {
                collected.insert(cookie.name().to_string(), cookie.value().to_string());
                received.insert(cookie.name().to_string(), cookie.value().to_string());
            }

            let response = if status.is_server_error() {
                response.error_for_status()?
            } else {
                response
            };

            if status.is_redirection()
                && let Some(location) = response.headers().get(LOCATION)
                && let Ok(location) = location.to_str()
            {
                let next = Url::parse(&current_url)
                    .and_then(|base| base.join(location))
                    .map_err(|e| BtSportError::InvalidUrl(format!("{}: {}", location, e)))?;
                current_url = next.into();

                if !matches!(
                    status,
                    StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
                ) {
                    method = Method::GET;
                    form = None;
                }
                continue;
            }

            let body = response.text().await.map_err(BtSportError::HttpError)?;
            debug!(%status, bytes = body.len(), "received response");
            return Ok(Exchange {
                status,
                body,
                cookies: received,
            });
        }

        Err(BtSportError::InvalidUrl(format!(
            "{}: more than {} redirects",
            url, MAX_REDIRECTS
        )))
    }
}

/// Renders cookies as a `Cookie` header value, sorted by name
fn cookie_header(cookies: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = cookies.iter().collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}
