//! Access-token value and expiry, replaced as a unit on every refresh.

// self
use crate::{_prelude::*, auth::Secret};

/// Bearer token issued by the channel token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	/// Token value; callers must avoid logging it.
	pub value: Secret,
	/// Instant at which the token stops being usable.
	pub expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token that expires at the provided instant.
	pub fn new(value: impl Into<String>, expires_at: OffsetDateTime) -> Self {
		Self { value: Secret::new(value), expires_at }
	}

	/// Creates a token issued at `issued_at` that lives for `lifetime`, saturating at the
	/// representable range.
	pub fn issued(value: impl Into<String>, issued_at: OffsetDateTime, lifetime: Duration) -> Self {
		Self::new(value, issued_at.saturating_add(lifetime))
	}

	/// Returns `true` if the token can still be used at `instant` (strictly before expiry).
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}

	/// Checks validity against the current UTC clock.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Remaining lifetime at `instant`, clamped to zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}

	/// Renders the `Authorization` header value.
	pub(crate) fn bearer_header(&self) -> String {
		format!("Bearer {}", self.value.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("value", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
