//! State machine for the live stream handshake
//!
//! Resolving a live stream takes three steps, each consuming the
//! credential produced by the one before:
//!
//! ```text
//! Unauthenticated --login--> SessionEstablished --sport_login--> AvsAuthenticated --hls_url--> StreamResolved
//! ```
//!
//! [`AuthState`] records how far a caller got. Transitions here are pure;
//! the requests behind them live in [`crate::BtSportScraper`]. Credentials
//! stay with the caller: nothing in this crate stores a state.

use serde::{Deserialize, Serialize};

use crate::error::{BtSportError, Result};

/// Progress of one live playback attempt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    /// No credential yet, or the site login was refused
    #[default]
    Unauthenticated,
    /// Site login succeeded
    SessionEstablished { session: String },
    /// Federated AVS login succeeded
    AvsAuthenticated { session: String, avs_cookie: String },
    /// A channel's stream URL was resolved
    StreamResolved {
        session: String,
        avs_cookie: String,
        channel_id: u32,
        url: String,
    },
}

/// One step of the handshake, with the input it needs
#[derive(Debug, Clone, Copy)]
pub enum AuthStep<'a> {
    /// Sign in to the site
    Login { user: &'a str, password: &'a str },
    /// Exchange the site session for an AVS cookie
    SportLogin,
    /// Resolve a channel's stream URL
    ResolveStream { channel_id: u32 },
}

impl AuthState {
    /// State after a site login attempt; `None` means refused credentials
    pub fn after_login(session: Option<String>) -> Self {
        match session {
            Some(session) if !session.is_empty() => Self::SessionEstablished { session },
            _ => Self::Unauthenticated,
        }
    }

    /// State after the AVS cookie was obtained
    ///
    /// # Errors
    /// Returns `InvalidArgument` if there is no site session to build on
    pub fn after_sport_login(self, avs_cookie: String) -> Result<Self> {
        let session = self
            .session()
            .ok_or_else(|| {
                BtSportError::InvalidArgument("sport login requires a site session".to_string())
            })?
            .to_string();
        Ok(Self::AvsAuthenticated {
            session,
            avs_cookie,
        })
    }

    /// State after a channel's stream URL was resolved
    ///
    /// # Errors
    /// Returns `InvalidArgument` if there is no AVS cookie to build on
    pub fn after_stream(self, channel_id: u32, url: String) -> Result<Self> {
        match self {
            Self::AvsAuthenticated {
                session,
                avs_cookie,
            }
            | Self::StreamResolved {
                session,
                avs_cookie,
                ..
            } => Ok(Self::StreamResolved {
                session,
                avs_cookie,
                channel_id,
                url,
            }),
            _ => Err(BtSportError::InvalidArgument(
                "stream resolution requires an AVS cookie".to_string(),
            )),
        }
    }

    /// Drops the AVS cookie but keeps the site session
    ///
    /// Lets a caller whose AVS cookie expired re-run only the SSO step.
    pub fn reauthenticate_avs(self) -> Self {
        match self.session() {
            Some(session) => Self::SessionEstablished {
                session: session.to_string(),
            },
            None => Self::Unauthenticated,
        }
    }

    /// Site session token, if the login step succeeded
    pub fn session(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated => None,
            Self::SessionEstablished { session }
            | Self::AvsAuthenticated { session, .. }
            | Self::StreamResolved { session, .. } => Some(session),
        }
    }

    /// AVS cookie, if the federated login succeeded
    pub fn avs_cookie(&self) -> Option<&str> {
        match self {
            Self::AvsAuthenticated { avs_cookie, .. } | Self::StreamResolved { avs_cookie, .. } => {
                Some(avs_cookie)
            }
            _ => None,
        }
    }

    /// Resolved stream URL
    pub fn stream_url(&self) -> Option<&str> {
        match self {
            Self::StreamResolved { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Short name of the state, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::SessionEstablished { .. } => "session_established",
            Self::AvsAuthenticated { .. } => "avs_authenticated",
            Self::StreamResolved { .. } => "stream_resolved",
        }
    }
}
