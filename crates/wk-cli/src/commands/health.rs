use std::path::Path;

use colored::Colorize;
use wk_mechanics::deliver;
use wk_mechanics::usage::adjust_health;

use super::{Context, actor_id, load_roster, store};
use crate::output::TerminalCard;

pub async fn run(
    ctx: &Context,
    roster_path: &Path,
    actor: &str,
    amount: i32,
    save: bool,
) -> Result<(), String> {
    let mut roster = load_roster(roster_path, &ctx.config)?;
    let mut persistence = store(roster_path, save, &roster);
    let id = actor_id(&roster, actor)?;
    let actor = roster.get_mut(id).map_err(|e| e.to_string())?;
    let intent = adjust_health(actor, amount).map_err(|e| e.to_string())?;

    let change = if amount < 0 {
        format!("takes {}", amount.unsigned_abs()).red()
    } else {
        format!("heals {amount}").green()
    };
    println!(
        "  {} {change} ({}/{})",
        actor.name.bold(),
        actor.health.value,
        actor.health.max
    );

    let mut renderer = TerminalCard { json: false };
    let report = deliver(&mut renderer, persistence.as_mut(), None, None, &[intent]).await;
    if !report.is_clean() {
        return Err(format!("{} delivery failure(s)", report.failures.len()));
    }
    Ok(())
}
