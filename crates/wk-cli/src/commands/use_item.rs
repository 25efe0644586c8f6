use std::path::Path;

use colored::Colorize;
use wk_mechanics::usage::spend_movement;
use wk_mechanics::{UseOptions, deliver, prepare_use, resolve};

use super::{Context, actor_id, load_roster, store};
use crate::output::TerminalCard;

/// Flags of the `use` command.
pub struct UseArgs {
    pub actor: String,
    pub item: String,
    pub bonus: i32,
    pub value_bonus: i32,
    pub consume: bool,
    pub actions: bool,
    pub round: Option<u32>,
    pub json: bool,
    pub save: bool,
}

pub async fn run(ctx: &Context, roster_path: &Path, args: UseArgs) -> Result<(), String> {
    let mut roster = load_roster(roster_path, &ctx.config)?;
    let mut persistence = store(roster_path, args.save, &roster);
    let id = actor_id(&roster, &args.actor)?;
    let actor = roster.get_mut(id).map_err(|e| e.to_string())?;
    let item = actor
        .find_item(&args.item)
        .map(|i| i.id)
        .ok_or_else(|| format!("{} has no item named '{}'", actor.name, args.item))?;

    let options = UseOptions {
        bonus_malus: args.bonus,
        value_bonus: args.value_bonus,
        consume_item: args.consume,
        use_actions: args.actions,
    };
    let session_active = args.round.is_some();
    let prepared = prepare_use(actor, item, &options, session_active, &ctx.config)
        .map_err(|e| e.to_string())?;

    let outcome = resolve(prepared.request(), &mut ctx.rng()).map_err(|e| e.to_string())?;
    let intents = prepared.commit(actor).map_err(|e| e.to_string())?;
    let card = outcome.card(prepared.request(), actor);

    let report = deliver(
        &mut TerminalCard { json: args.json },
        persistence.as_mut(),
        Some(&card),
        outcome.roll.as_ref(),
        &intents,
    )
    .await;
    if !report.is_clean() {
        return Err(format!("{} delivery failure(s)", report.failures.len()));
    }
    Ok(())
}

pub async fn movement(
    ctx: &Context,
    roster_path: &Path,
    actor: &str,
    round: Option<u32>,
    save: bool,
) -> Result<(), String> {
    let mut roster = load_roster(roster_path, &ctx.config)?;
    let mut persistence = store(roster_path, save, &roster);
    let id = actor_id(&roster, actor)?;
    let actor = roster.get_mut(id).map_err(|e| e.to_string())?;
    let intent = spend_movement(actor, round.is_some()).map_err(|e| e.to_string())?;
    println!("  {} spends an action moving", actor.name.bold());

    let mut renderer = TerminalCard { json: false };
    let report = deliver(&mut renderer, persistence.as_mut(), None, None, &[intent]).await;
    if !report.is_clean() {
        return Err(format!("{} delivery failure(s)", report.failures.len()));
    }
    Ok(())
}
