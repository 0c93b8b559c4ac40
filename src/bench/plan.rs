use crate::errors::BenchError;

/// Geometrically spaced repetition counts: strictly increasing, starting at 1,
/// never above the configured maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan(Vec<u64>);

impl ExecutionPlan {
    pub fn counts(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of invocations the plan will make.
    pub fn total_invocations(&self) -> u64 {
        self.0.iter().sum()
    }
}

impl AsRef<[u64]> for ExecutionPlan {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

/// Build the plan: start at 1, keep multiplying by `jump_factor`, and stop before the
/// first value that exceeds `maximum` (the overshoot is dropped, not clamped).
///
/// Fractional factors are truncated to whole counts; repeats are skipped.
///
/// # Errors
/// Returns `BenchError::InvalidConfig` if `maximum` is zero or `jump_factor` is not a
/// finite number greater than one.
pub fn compute_execution_plan(maximum: u64, jump_factor: f64) -> Result<ExecutionPlan, BenchError> {
    if maximum == 0 {
        return Err(BenchError::InvalidConfig("maximum_executions must be at least 1".into()));
    }
    if !jump_factor.is_finite() || jump_factor <= 1.0 {
        return Err(BenchError::InvalidConfig(format!(
            "jump_factor must be a finite number greater than 1, got {jump_factor}"
        )));
    }
    let limit = maximum as f64;
    let mut counts: Vec<u64> = Vec::new();
    let mut current = 1.0_f64;
    while current <= limit {
        let n = current as u64;
        // `limit` may round up when `maximum` is not representable as f64
        if n > maximum {
            break;
        }
        if counts.last().is_none_or(|&last| n > last) {
            counts.push(n);
        }
        current *= jump_factor;
    }
    Ok(ExecutionPlan(counts))
}
