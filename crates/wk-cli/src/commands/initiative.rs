use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use wk_mechanics::combat::initiative_order;

use super::{Context, load_roster};

pub fn run(ctx: &Context, roster_path: &Path) -> Result<(), String> {
    let roster = load_roster(roster_path, &ctx.config)?;
    if roster.is_empty() {
        println!("  No actors in roster.");
        return Ok(());
    }

    let order =
        initiative_order(&roster, &ctx.config, &mut ctx.rng()).map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Initiative"]);
    for (rank, entry) in order.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            entry.name.clone(),
            entry.score.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
