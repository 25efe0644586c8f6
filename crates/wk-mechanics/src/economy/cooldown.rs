//! Talent cooldowns counted in rounds.

use wk_core::{Actor, CooldownState, FieldPath, Item, UpdateIntent};

use crate::error::{MechError, MechResult};

/// Start the cooldown after a use. Returns false if the talent has none.
pub fn activate(state: &mut CooldownState) -> bool {
    if state.threshold_rounds == 0 {
        return false;
    }
    state.remaining = state.threshold_rounds;
    true
}

/// Count one round down. Returns true if `remaining` changed.
pub fn decrement(state: &mut CooldownState) -> bool {
    if state.threshold_rounds > 0 && state.remaining > 0 {
        state.remaining -= 1;
        true
    } else {
        false
    }
}

/// Make the talent ready again.
pub fn reset(state: &mut CooldownState) {
    state.remaining = 0;
}

/// Fail with [`MechError::OnCooldown`] if the talent is still cooling down.
pub fn ensure_ready(state: &CooldownState) -> MechResult<()> {
    if state.remaining > 0 {
        return Err(MechError::OnCooldown {
            remaining: state.remaining,
        });
    }
    Ok(())
}

fn remaining_intent(actor: &Actor, item: &Item, remaining: u32) -> MechResult<UpdateIntent> {
    Ok(UpdateIntent::item(
        actor.id,
        item.id,
        FieldPath::CooldownRemaining,
        i64::from(remaining),
    )?)
}

/// Decrement every talent cooldown the actor owns.
///
/// Only talents whose cooldown changed produce an intent.
pub fn decrement_all(actor: &mut Actor) -> MechResult<Vec<UpdateIntent>> {
    let mut changed = Vec::new();
    for item in actor.items.iter_mut().filter(|i| i.is_talent()) {
        if let Some(state) = item.cooldown.as_mut() {
            if decrement(state) {
                changed.push((item.id, state.remaining));
            }
        }
    }
    changed
        .into_iter()
        .map(|(id, remaining)| {
            let item = actor.item(id)?;
            remaining_intent(actor, item, remaining)
        })
        .collect()
}

/// Reset every talent cooldown the actor owns. Emits one intent per talent.
pub fn reset_all(actor: &mut Actor) -> MechResult<Vec<UpdateIntent>> {
    for item in actor.items.iter_mut().filter(|i| i.is_talent()) {
        if let Some(state) = item.cooldown.as_mut() {
            reset(state);
        }
    }
    actor
        .talents()
        .filter(|t| t.cooldown.is_some())
        .map(|t| remaining_intent(actor, t, 0))
        .collect()
}
