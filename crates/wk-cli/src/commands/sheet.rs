use std::fs;
use std::path::Path;

use super::{Context, load_roster};
use crate::output::print_roster;

pub fn run(ctx: &Context, roster_path: &Path, save: bool) -> Result<(), String> {
    let roster = load_roster(roster_path, &ctx.config)?;
    if roster.is_empty() {
        println!("  No actors in roster.");
        return Ok(());
    }
    print_roster(&roster);

    if save {
        let json = roster.to_json().map_err(|e| e.to_string())?;
        fs::write(roster_path, json)
            .map_err(|e| format!("cannot write {}: {e}", roster_path.display()))?;
        println!();
        println!("  Saved {} actor(s) to {}", roster.len(), roster_path.display());
    }
    Ok(())
}
