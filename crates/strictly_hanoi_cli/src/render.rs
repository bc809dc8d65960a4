//! Text rendering of the board and clock.

use strictly_hanoi::{Snapshot, TowerId};

/// Formats seconds as `mm:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Draws the three towers side by side, smallest disk narrowest.
///
/// Disk numbers are 1-based (size rank + 1) so the drawing matches the
/// numbers players type for `drag`.
pub fn render_board(snapshot: &Snapshot) -> String {
    let disks = (*snapshot.disk_count()).max(1);
    let width = 2 * disks + 3;
    let height = disks + 1;
    let mut out = String::new();

    for level in (0..height).rev() {
        for tower in TowerId::ALL {
            let cell = match snapshot.tower(tower).get(level) {
                Some(size) => disk_cell(*size),
                None => "|".to_string(),
            };
            out.push_str(&format!("{:^width$}", cell, width = width));
        }
        out.push('\n');
    }

    for _ in TowerId::ALL {
        out.push_str(&"-".repeat(width));
    }
    out.push('\n');
    for tower in TowerId::ALL {
        out.push_str(&format!("{:^width$}", tower.letter(), width = width));
    }
    out.push('\n');
    out
}

fn disk_cell(size: usize) -> String {
    let number = (size + 1).to_string();
    let arms = "=".repeat(size + 1);
    format!("{}{}{}", arms, number, arms)
}

/// One-line status: phase, moves against the minimum, and the clock.
pub fn render_status(snapshot: &Snapshot, remaining_secs: Option<u64>) -> String {
    let mut line = format!(
        "{} | moves: {} (minimum {})",
        snapshot.phase(),
        snapshot.move_count(),
        snapshot.min_moves_required()
    );
    if let Some(remaining) = remaining_secs {
        line.push_str(&format!(" | time left: {}", format_clock(remaining)));
    }
    line
}
