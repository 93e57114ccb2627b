//! Authorization tokens for package-manager access.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::constraints;
use crate::model;
use crate::validation::{FieldChecks, Validate, ValidationErrors};

model! {
    /// Requests a temporary token for a domain.
    pub struct GetAuthorizationTokenRequest {
        /// Domain the token grants access to.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Token lifetime in seconds; `0` ties it to the caller's session.
        duration_seconds: i64,
    }
}

model! {
    /// Result of [`GetAuthorizationTokenRequest`].
    pub struct GetAuthorizationTokenResult {
        /// The token. Never rendered by `Debug`.
        authorization_token: String,
        /// When the token stops being accepted.
        #[serde(with = "crate::time::epoch_seconds")]
        expiration: DateTime<Utc>,
    }
}

impl GetAuthorizationTokenRequest {
    /// Sets the lifetime from a [`Duration`], truncating to whole seconds.
    #[must_use]
    pub fn with_duration(self, duration: Duration) -> Self {
        let seconds = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        self.with_duration_seconds(seconds)
    }
}

impl GetAuthorizationTokenResult {
    /// Returns true if the token has expired at `now`.
    ///
    /// A result without an expiration is treated as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        !matches!(self.expiration, Some(expiration) if expiration > now)
    }

    /// Returns the remaining lifetime at `now`, or `None` once expired.
    #[must_use]
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expiration
            .and_then(|expiration| (expiration - now).to_std().ok())
            .filter(|remaining| !remaining.is_zero())
    }
}

impl Validate for GetAuthorizationTokenRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        let (min, max) = constraints::TOKEN_DURATION_SECONDS;
        checks.in_range("durationSeconds", self.duration_seconds, min, max);
        checks.finish()
    }
}
