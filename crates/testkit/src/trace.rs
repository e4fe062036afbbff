//! Draw traces: run a generator through a fixed plan and record every value.

use anyhow::{Context, Result};
use mcrand_core::{DrawStep, DrawValue, RandomSource};
use serde::{Deserialize, Serialize};

/// A step together with what it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Step that was executed.
    pub step: DrawStep,
    /// Value it returned.
    pub value: DrawValue,
}

/// Run every step in order, recording the results.
///
/// Fails on the first step the source rejects, naming its position in the plan.
pub fn trace_draws<R: RandomSource + ?Sized>(
    source: &mut R,
    steps: &[DrawStep],
) -> Result<Vec<DrawRecord>> {
    steps
        .iter()
        .enumerate()
        .map(|(index, &step)| -> Result<DrawRecord> {
            let value = step
                .apply(&mut *source)
                .with_context(|| format!("draw #{index} ({step:?}) failed"))?;
            Ok(DrawRecord { step, value })
        })
        .collect()
}

/// A fixed plan touching every draw kind, with a trailing partial byte group.
pub fn mixed_plan() -> Vec<DrawStep> {
    vec![
        DrawStep::Int,
        DrawStep::Bounded(100),
        DrawStep::Bounded(16),
        DrawStep::Bounded(1 << 30),
        DrawStep::Long,
        DrawStep::Float,
        DrawStep::Double,
        DrawStep::Boolean,
        DrawStep::Bytes(7),
        DrawStep::Int,
    ]
}
