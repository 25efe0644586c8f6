use colored::Colorize;
use wk_mechanics::{CriticalRange, Formula, OutcomeClass, classify};

use super::Context;

pub fn run(ctx: &Context, formula: &str, crit: &str) -> Result<(), String> {
    let formula = Formula::parse(formula).map_err(|e| e.to_string())?;
    let result = formula.evaluate(&mut ctx.rng());

    let class = result
        .kept()
        .map(|kept| classify(kept, &CriticalRange::parse(crit)).class())
        .unwrap_or_default();
    let tag = match class {
        OutcomeClass::Critical => format!(" {}", "CRITICAL".green().bold()),
        OutcomeClass::Fumble => format!(" {}", "FUMBLE".red().bold()),
        OutcomeClass::Normal => String::new(),
    };

    println!("  {} {result}{tag}", formula.to_string().dimmed());
    Ok(())
}
