//! Main API for the BT Sport resolver
//!
//! Combines the HTTP client with the parsers: category discovery, video
//! search, the live stream handshake and the programme guide.

use chrono_tz::Tz;
use tracing::debug;

use crate::channels::Channel;
use crate::client::{BtSportClient, ClientConfig};
use crate::error::{BtSportError, Result};
use crate::live::{AuthState, AuthStep};
use crate::parser::epg::DEFAULT_TIMEZONE;
use crate::parser::{
    Categories, VideoResults, parse_categories, parse_cdn_response, parse_epg, parse_query_fragment,
    parse_saml_response, parse_search_response, parse_timezone,
};
use crate::types::Epg;
use crate::url::{
    build_avs_login_params, build_cdn_params, build_search_params, build_text_query,
    resolve_page_url,
};

const SESSION_COOKIE: &str = "SMSESSION";
const AVS_COOKIE: &str = "avs_cookie";

/// Main API for BT Sport video and live content
///
/// Every method is a single, stateless request (or short fixed sequence
/// of requests). Nothing is cached and no credential is kept.
pub struct BtSportScraper {
    client: BtSportClient,
}

impl BtSportScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        let client = BtSportClient::new()?;
        Ok(Self { client })
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = BtSportClient::with_config(config)?;
        Ok(Self { client })
    }

    /// List the video categories, default listing first
    ///
    /// # Errors
    /// - `HttpError` if the video hub page cannot be fetched
    /// - `ParseError` if the page no longer carries the category data
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> btsport_core::Result<()> {
    /// use btsport_core::BtSportScraper;
    /// let scraper = BtSportScraper::new()?;
    /// for category in scraper.list_categories().await? {
    ///     println!("{:?} -> {}", category.title, category.path);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_categories(&self) -> Result<Categories> {
        let html = self.client.fetch(&self.client.endpoints().categories_url).await?;
        parse_categories(&html)
    }

    /// Search filter for a category page
    ///
    /// # Arguments
    /// * `path` - Category path as returned by [`Self::list_categories`]
    ///
    /// # Returns
    /// The filter to hand to [`Self::video_results`], or `None` for the
    /// unfiltered listing
    ///
    /// # Errors
    /// - `InvalidUrl` if `path` cannot be resolved against the site
    /// - `HttpError` if the page cannot be fetched
    /// - `ParseError` if the page no longer carries its properties
    pub async fn query_fragment(&self, path: &str) -> Result<Option<String>> {
        let url = resolve_page_url(&self.client.endpoints().site_base_url, path)?;
        let html = self.client.fetch(&url).await?;
        parse_query_fragment(&html)
    }

    /// One page of videos matching a search filter
    ///
    /// # Arguments
    /// * `query` - Filter from [`Self::query_fragment`]; `None` lists everything
    /// * `page` - 1-based page number
    /// * `page_size` - Videos per page
    ///
    /// # Returns
    /// The page's videos and the total number of pages
    ///
    /// # Errors
    /// - `InvalidArgument` if `page` or `page_size` is zero
    /// - `HttpError` if the search API cannot be reached
    /// - `Json` if the response is not the expected shape
    pub async fn video_results(
        &self,
        query: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<(VideoResults, u64)> {
        if page == 0 {
            return Err(BtSportError::InvalidArgument(
                "page must be at least 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(BtSportError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }

        let params = build_search_params(query, page, page_size);
        let exchange = self
            .client
            .get(&self.client.endpoints().search_api_url, &params, &[])
            .await?;
        let (videos, num_pages) = parse_search_response(&exchange.body, page_size)?;
        debug!(page, num_pages, count = videos.len(), "fetched video results");
        Ok((videos, num_pages))
    }

    /// One page of videos matching a free-text term
    ///
    /// The term is quoted but not escaped.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> btsport_core::Result<()> {
    /// use btsport_core::BtSportScraper;
    /// let scraper = BtSportScraper::new()?;
    /// let (videos, pages) = scraper.search_results("champions league", 1, 10).await?;
    /// println!("{} pages", pages);
    /// for video in videos {
    ///     println!("{}: {:?}", video.title, video.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_results(
        &self,
        term: &str,
        page: u32,
        page_size: u32,
    ) -> Result<(VideoResults, u64)> {
        let query = build_text_query(term);
        self.video_results(Some(&query), page, page_size).await
    }

    /// Sign in to the site
    ///
    /// # Returns
    /// The `SMSESSION` session token, or `None` if the credentials were refused
    ///
    /// # Errors
    /// - `HttpError` if the sign-in endpoint cannot be reached
    pub async fn login(&self, user: &str, password: &str) -> Result<Option<String>> {
        let endpoints = self.client.endpoints();
        let form = [
            ("TARGET", endpoints.login_target.as_str()),
            ("USER", user),
            ("PASSWORD", password),
        ];
        let exchange = self.client.post_form(&endpoints.login_url, &[], &form).await?;
        let session = exchange.cookie(SESSION_COOKIE).map(str::to_string);
        debug!(authenticated = session.is_some(), "site login finished");
        Ok(session)
    }

    /// Exchange a site session for an AVS cookie
    ///
    /// Fetches the SAML assertion from the federation endpoint and posts
    /// it to the AVS login.
    ///
    /// # Errors
    /// - `ElementNotFound` if the federation page has no SAML assertion
    /// - `CookieNotFound` if the AVS login sets no `avs_cookie`
    /// - `HttpError` for network errors
    pub async fn sport_login(&self, session: &str) -> Result<String> {
        let endpoints = self.client.endpoints();
        let federation = self
            .client
            .get(&endpoints.federation_url, &[], &[(SESSION_COOKIE, session)])
            .await?;
        let saml_response = parse_saml_response(&federation.body)?;

        let exchange = self
            .client
            .post_form(
                &endpoints.avs_url,
                &build_avs_login_params(),
                &[("SAMLResponse", saml_response.as_str())],
            )
            .await?;

        let avs_cookie = exchange
            .cookie(AVS_COOKIE)
            .map(str::to_string)
            .ok_or_else(|| BtSportError::CookieNotFound(AVS_COOKIE.to_string()))?;
        debug!("AVS login finished");
        Ok(avs_cookie)
    }

    /// Resolve the HLS stream URL of a live channel
    ///
    /// # Arguments
    /// * `avs_cookie` - Cookie from [`Self::sport_login`]; `None` short-circuits
    /// * `channel_id` - [`Channel::id`] of the channel to play
    ///
    /// # Returns
    /// The stream URL, or `None` without any request when there is no cookie
    ///
    /// # Errors
    /// - `StreamUnavailable` if the CDN refuses, with the upstream reason
    /// - `Json` / `ParseError` if the response is malformed
    /// - `HttpError` for network errors
    pub async fn hls_url(
        &self,
        avs_cookie: Option<&str>,
        channel_id: u32,
    ) -> Result<Option<String>> {
        let Some(avs_cookie) = avs_cookie.filter(|cookie| !cookie.is_empty()) else {
            return Ok(None);
        };

        let exchange = self
            .client
            .get(
                &self.client.endpoints().avs_url,
                &build_cdn_params(channel_id),
                &[(AVS_COOKIE, avs_cookie)],
            )
            .await?;
        let url = parse_cdn_response(&exchange.body)?;
        debug!(channel_id, "resolved live stream");
        Ok(Some(url))
    }

    /// Run one step of the live handshake
    ///
    /// A refused login leaves the state `Unauthenticated` rather than
    /// failing. Running a step whose input credential is missing is an
    /// `InvalidArgument` error.
    pub async fn advance(&self, state: AuthState, step: AuthStep<'_>) -> Result<AuthState> {
        let from = state.name();
        let next = match step {
            AuthStep::Login { user, password } => {
                AuthState::after_login(self.login(user, password).await?)
            }
            AuthStep::SportLogin => {
                let session = state.session().ok_or_else(|| {
                    BtSportError::InvalidArgument("sport login requires a site session".to_string())
                })?;
                let avs_cookie = self.sport_login(session).await?;
                state.after_sport_login(avs_cookie)?
            }
            AuthStep::ResolveStream { channel_id } => {
                match self.hls_url(state.avs_cookie(), channel_id).await? {
                    Some(url) => state.after_stream(channel_id, url)?,
                    None => {
                        return Err(BtSportError::InvalidArgument(
                            "stream resolution requires an AVS cookie".to_string(),
                        ));
                    }
                }
            }
        };
        debug!(from, to = next.name(), "live handshake step");
        Ok(next)
    }

    /// Run the whole live handshake for one channel
    ///
    /// # Returns
    /// The stream URL, or `None` if the site login was refused
    ///
    /// # Errors
    /// Any error from [`Self::sport_login`] or [`Self::hls_url`]
    pub async fn resolve_live_stream(
        &self,
        user: &str,
        password: &str,
        channel_id: u32,
    ) -> Result<Option<String>> {
        let state = self
            .advance(AuthState::Unauthenticated, AuthStep::Login { user, password })
            .await?;
        if state.session().is_none() {
            return Ok(None);
        }
        let state = self.advance(state, AuthStep::SportLogin).await?;
        let state = self
            .advance(state, AuthStep::ResolveStream { channel_id })
            .await?;
        Ok(state.stream_url().map(str::to_string))
    }

    /// Now/next programmes for a channel, with start times in UK time
    ///
    /// # Arguments
    /// * `epg_index` - [`Channel::epg_index`] of the channel
    ///
    /// # Errors
    /// - `ParseError` if the index is outside the feed
    /// - `HttpError` / `Json` for transport or format errors
    pub async fn epg(&self, epg_index: usize) -> Result<Epg> {
        self.fetch_epg(epg_index, DEFAULT_TIMEZONE).await
    }

    /// Now/next programmes for a channel in the given IANA timezone
    ///
    /// # Errors
    /// - `InvalidArgument` for an unknown timezone (checked before fetching)
    /// - same as [`Self::epg`] otherwise
    pub async fn epg_in(&self, epg_index: usize, timezone: &str) -> Result<Epg> {
        let timezone = parse_timezone(timezone)?;
        self.fetch_epg(epg_index, timezone).await
    }

    /// Now/next programmes for a registry channel, in UK time
    pub async fn channel_epg(&self, channel: &Channel) -> Result<Epg> {
        self.epg(channel.epg_index).await
    }

    async fn fetch_epg(&self, epg_index: usize, timezone: Tz) -> Result<Epg> {
        let body = self.client.fetch(&self.client.endpoints().epg_url).await?;
        parse_epg(&body, epg_index, timezone)
    }
}
