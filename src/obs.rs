//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `line_liff.op` with the `op` (operation) and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `line_liff_operation_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`, and the `line_liff_token_cache_total`
//!   counter labeled by `event` (hit/refresh).

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Client-credentials exchange against the token endpoint.
	IssueToken,
	/// `GET liff/v1/apps`.
	ListApps,
	/// List-derived lookup of a single app.
	GetApp,
	/// `POST liff/v1/apps`.
	CreateApp,
	/// `PUT liff/v1/apps/{id}`.
	UpdateApp,
	/// `DELETE liff/v1/apps/{id}`.
	DeleteApp,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::IssueToken => "issue_token",
			Operation::ListApps => "list_apps",
			Operation::GetApp => "get_app",
			Operation::CreateApp => "create_app",
			Operation::UpdateApp => "update_app",
			Operation::DeleteApp => "delete_app",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Token cache events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenCacheEvent {
	/// A stored, unexpired token was returned.
	Hit,
	/// The token endpoint was called.
	Refresh,
}
impl TokenCacheEvent {
	/// Returns a stable label suitable for metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenCacheEvent::Hit => "hit",
			TokenCacheEvent::Refresh => "refresh",
		}
	}
}

/// Runs `fut` inside a `line_liff.op` span and records attempt/success/failure outcomes.
pub(crate) async fn observe<T, Fut>(op: Operation, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	record_operation_outcome(op, OperationOutcome::Attempt);

	let result = instrument_operation(op, stage, fut).await;
	let outcome =
		if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure };

	record_operation_outcome(op, outcome);

	result
}
