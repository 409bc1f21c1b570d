//! Text rendering for log-based presentation.

use game_core::{Character, Team, TurnChange};

/// Formats a countdown in seconds as `mm:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// A fixed-width bar such as `[######----]`.
pub fn health_bar(health: u32, max_health: u32, width: usize) -> String {
    let filled = if max_health == 0 {
        0
    } else {
        let ratio = u64::from(health.min(max_health)) * width as u64;
        ratio.div_ceil(u64::from(max_health)) as usize
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn character_line(character: &Character) -> String {
    let status = if character.is_defeated() { " (defeated)" } else { "" };
    format!(
        "{:<8} {} {:>3}/{}{}",
        character.name(),
        health_bar(character.health(), character.max_health(), 10),
        character.health(),
        character.max_health(),
        status
    )
}

pub fn team_summary(team: &Team) -> String {
    team.members()
        .iter()
        .map(character_line)
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn turn_banner(change: &TurnChange) -> String {
    format!("=== Turn {}: {}'s turn ===", change.number, change.current)
}
