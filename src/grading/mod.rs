//! Explainable trace grading
//!
//! Converts freehand ink into a pass/fail verdict with a fixed geometric
//! rule over rasterized coverage: no trained model, so a teacher can
//! always reconstruct why a trace passed or failed. The formula is
//! forgiving by design for early-grade students with intellectual
//! disabilities: a flat baseline, over-weighted coverage, and a small
//! out-of-bounds penalty.

use tracing::debug;

pub mod mask;
pub mod strokes;
pub mod surface;

pub use mask::render_mask;
pub use surface::{Surface, SURFACE_SIDE};

use surface::{is_ink, is_target};

/// Minimum score that counts as a passing trace. Fixed, not
/// teacher-configurable.
pub const PASS_SCORE: u32 = 60;

const COVERAGE_WEIGHT: f64 = 130.0;
const BASELINE: f64 = 12.0;
const OUTSIDE_PENALTY: f64 = 18.0;

/// Outcome of grading one trace attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceVerdict {
    /// 0..=100, clamped as the final step.
    pub score: u32,
    /// `score >= PASS_SCORE`
    pub passed: bool,
}

impl TraceVerdict {
    /// Verdict for a degenerate rasterization; grading never aborts.
    fn degenerate() -> Self {
        TraceVerdict { score: 0, passed: false }
    }

    fn from_score(score: u32) -> Self {
        TraceVerdict { score, passed: score >= PASS_SCORE }
    }
}

/// Grade `trace` against the reference mask for `symbol`.
///
/// Pure and deterministic for identical rasterizations. An unknown
/// symbol or a trace at the wrong dimension degrades to score 0 rather
/// than erroring, so grading can never abort a session.
pub fn grade(symbol: &str, trace: &Surface) -> TraceVerdict {
    let mask = match render_mask(symbol) {
        Some(m) => m,
        None => return TraceVerdict::degenerate(),
    };
    if trace.side() != mask.side() {
        return TraceVerdict::degenerate();
    }

    let mut target_area = 0u64;
    let mut ink_total = 0u64;
    let mut hit = 0u64;
    let mut out = 0u64;

    for (mask_px, trace_px) in mask.pixels().iter().zip(trace.pixels()) {
        let target = is_target(*mask_px);
        if target {
            target_area += 1;
        }
        if !is_ink(*trace_px) {
            continue;
        }
        ink_total += 1;
        if target {
            hit += 1;
        } else {
            out += 1;
        }
    }

    let coverage = if target_area > 0 { hit as f64 / target_area as f64 } else { 0.0 };
    let outside = if ink_total > 0 { out as f64 / ink_total as f64 } else { 0.0 };

    let raw = coverage * COVERAGE_WEIGHT + BASELINE - outside * OUTSIDE_PENALTY;
    let score = raw.round().clamp(0.0, 100.0) as u32;

    debug!(symbol, coverage, outside, score, "graded trace");
    TraceVerdict::from_score(score)
}
