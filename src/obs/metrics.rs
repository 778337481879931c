// self
use crate::obs::{Operation, OperationOutcome, TokenCacheEvent};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(op: Operation, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"line_liff_operation_total",
			"op" => op.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (op, outcome);
	}
}

/// Records a token cache hit or refresh (when enabled).
pub fn record_token_cache_event(event: TokenCacheEvent) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("line_liff_token_cache_total", "event" => event.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = event;
	}
}
