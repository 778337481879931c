// self
use crate::{_prelude::*, obs::Operation};

/// Future returned by [`instrument_operation`]; a plain passthrough without the `tracing`
/// feature.
#[cfg(feature = "tracing")]
pub type Traced<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`instrument_operation`]; a plain passthrough without the `tracing`
/// feature.
#[cfg(not(feature = "tracing"))]
pub type Traced<F> = F;

/// Attaches a `line_liff.op` span carrying `op` and `stage` to `fut`.
///
/// The span is entered on every poll, so no guard is held across `.await` points.
pub fn instrument_operation<Fut>(op: Operation, stage: &'static str, fut: Fut) -> Traced<Fut>
where
	Fut: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		fut.instrument(tracing::info_span!("line_liff.op", op = op.as_str(), stage))
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, stage);

		fut
	}
}
