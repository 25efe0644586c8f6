use std::path::Path;

use wk_core::{Ability, Aptitude};
use wk_mechanics::{CheckTarget, compose_check, deliver, resolve};

use super::{Context, actor_id, load_roster};
use crate::output::{PendingStore, TerminalCard};

fn parse_target(key: &str) -> Result<CheckTarget, String> {
    if let Ok(ability) = key.parse::<Ability>() {
        return Ok(CheckTarget::Ability(ability));
    }
    key.parse::<Aptitude>()
        .map(CheckTarget::Aptitude)
        .map_err(|_| format!("'{key}' is neither an ability nor an aptitude"))
}

pub async fn run(
    ctx: &Context,
    roster_path: &Path,
    actor: &str,
    target: &str,
    bonus: i32,
    json: bool,
) -> Result<(), String> {
    let roster = load_roster(roster_path, &ctx.config)?;
    let actor = roster
        .get(actor_id(&roster, actor)?)
        .map_err(|e| e.to_string())?;
    let target = parse_target(target)?;

    let request = compose_check(actor, target, bonus, &ctx.config);
    let outcome = resolve(&request, &mut ctx.rng()).map_err(|e| e.to_string())?;
    let card = outcome.card(&request, actor);

    let report = deliver(
        &mut TerminalCard { json },
        &mut PendingStore,
        Some(&card),
        outcome.roll.as_ref(),
        &[],
    )
    .await;
    if !report.is_clean() {
        return Err(format!("{} delivery failure(s)", report.failures.len()));
    }
    Ok(())
}
