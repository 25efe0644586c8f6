use std::path::Path;

use colored::Colorize;
use wk_mechanics::{RoundController, RoundSignal, Transition, deliver};

use super::{Context, load_roster, store};
use crate::output::{TerminalCard, print_roster};

/// The signal described by the command-line flags.
pub fn signal(from: u32, to: Option<u32>, end: bool) -> RoundSignal {
    match to {
        Some(to) if !end => RoundSignal::changed(from, to),
        _ => RoundSignal::SessionEnded,
    }
}

pub async fn run(
    ctx: &Context,
    roster_path: &Path,
    signal: RoundSignal,
    observer: bool,
    save: bool,
) -> Result<(), String> {
    let mut roster = load_roster(roster_path, &ctx.config)?;
    let mut persistence = store(roster_path, save, &roster);
    let mut controller = if observer {
        RoundController::observer()
    } else {
        RoundController::director()
    };

    let report = controller
        .handle(signal, &mut roster)
        .map_err(|e| e.to_string())?;

    let summary = match report.transition {
        Transition::Ignored => "not a forward round change, nothing to do".dimmed(),
        Transition::FullReset => "full reset: cooldowns cleared, actions refilled".green(),
        Transition::Advance { round } => {
            format!("round {round}: cooldowns ticked, actions refilled").green()
        }
    };
    println!("  {} {summary}", controller.state().to_string().bold());
    if !report.applied && report.transition != Transition::Ignored {
        println!("  {}", "observer: no changes applied".yellow());
    }
    print_roster(&roster);

    let mut renderer = TerminalCard { json: false };
    let delivered = deliver(
        &mut renderer,
        persistence.as_mut(),
        None,
        None,
        &report.intents,
    )
    .await;
    if !delivered.is_clean() {
        return Err(format!("{} delivery failure(s)", delivered.failures.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_flag_wins() {
        assert_eq!(signal(0, Some(2), true), RoundSignal::SessionEnded);
        assert_eq!(signal(0, None, true), RoundSignal::SessionEnded);
        assert_eq!(signal(2, Some(3), false), RoundSignal::changed(2, 3));
    }
}
