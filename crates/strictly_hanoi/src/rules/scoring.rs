//! Scoring: the minimal-moves baseline and efficiency.

use tracing::instrument;

/// Minimal number of moves for `n` disks on three towers: 2^n − 1.
#[instrument]
pub fn min_moves(n: usize) -> u64 {
    match u32::try_from(n) {
        Ok(n) if n < u64::BITS => (1u64 << n) - 1,
        _ => u64::MAX,
    }
}

/// Efficiency as a percentage, clamped to 0-100.
///
/// Zero moves scores 0 rather than dividing by zero.
#[instrument]
pub fn efficiency(min_moves: u64, move_count: u64) -> f64 {
    if move_count == 0 {
        return 0.0;
    }
    (min_moves as f64 / move_count as f64 * 100.0).clamp(0.0, 100.0)
}
