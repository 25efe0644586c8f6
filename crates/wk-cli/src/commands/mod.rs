pub mod check;
pub mod health;
pub mod initiative;
pub mod roll;
pub mod rounds;
pub mod sheet;
pub mod use_item;

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wk_core::{ActorId, Roster};
use wk_mechanics::{EngineConfig, Persistence, prepare_derived};

use crate::output::{JsonStore, PendingStore};

/// Settings shared by every command.
pub struct Context {
    pub config: EngineConfig,
    seed: Option<u64>,
}

impl Context {
    /// Load the engine config from a file, or from the environment.
    pub fn new(config: Option<&Path>, seed: Option<u64>) -> Result<Self, String> {
        let config = match config {
            Some(path) => {
                let source = fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                EngineConfig::from_json(&source).map_err(|e| e.to_string())?
            }
            None => EngineConfig::from_env().map_err(|e| e.to_string())?,
        };
        Ok(Self { config, seed })
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Read a roster file and recompute every actor's derived data.
fn load_roster(path: &Path, config: &EngineConfig) -> Result<Roster, String> {
    let source =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let mut roster = Roster::from_json(&source).map_err(|e| e.to_string())?;
    for actor in roster.actors_mut() {
        prepare_derived(actor, config);
    }
    Ok(roster)
}

fn actor_id(roster: &Roster, name: &str) -> Result<ActorId, String> {
    roster
        .find_by_name(name)
        .map(|a| a.id)
        .ok_or_else(|| format!("no actor named '{name}'"))
}

/// Where update intents go: the roster file with `--save`, the terminal otherwise.
///
/// Call before mutating `roster` so the file store starts from the loaded state.
fn store(path: &Path, save: bool, roster: &Roster) -> Box<dyn Persistence> {
    if save {
        Box::new(JsonStore::new(path, roster.clone()))
    } else {
        Box::new(PendingStore)
    }
}
