//! Telemetry metric name constants.
//!
//! Centralised metric names for andhrimnir operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `andhrimnir_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `stage` — pipeline stage ("detection", "resolution", "fetch",
//!   "extraction", "calculation")
//! - `status` — outcome: "ok" or "error"

/// Total pipeline runs.
///
/// Labels: `status` ("ok" | "error").
pub const RUNS_TOTAL: &str = "andhrimnir_runs_total";

/// Full pipeline run duration in seconds.
///
/// Labels: `status`.
pub const RUN_DURATION_SECONDS: &str = "andhrimnir_run_duration_seconds";

/// Total stage failures.
///
/// Labels: `stage`.
pub const STAGE_FAILURES_TOTAL: &str = "andhrimnir_stage_failures_total";
