use std::time::Duration;

/// Grid children animate in one after another, `step` apart.
pub const GRID_STAGGER_STEP: Duration = Duration::from_millis(100);

/// Transition delay for each of `count` siblings.
pub fn stagger_delays(count: usize, step: Duration) -> Vec<Duration> {
    (0..count)
        .map(|i| step.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX)))
        .collect()
}
