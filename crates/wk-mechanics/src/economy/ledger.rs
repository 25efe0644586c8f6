//! The action ledger: an actor's per-round action points.

use wk_core::{ActionPool, Actor, FieldPath, UpdateIntent};

use crate::error::{MechError, MechResult};

fn actions_intent(actor: &Actor, value: i32) -> MechResult<UpdateIntent> {
    Ok(UpdateIntent::actor(
        actor.id,
        FieldPath::ActionsValue,
        i64::from(value),
    )?)
}

fn available(pool: Option<&ActionPool>) -> u32 {
    pool.map_or(0, |p| u32::try_from(p.value).unwrap_or(0))
}

/// Refill the actor's pool. `None` if the actor has no pool.
pub fn reset_to_max(actor: &mut Actor) -> MechResult<Option<UpdateIntent>> {
    let Some(pool) = actor.actions.as_mut() else {
        return Ok(None);
    };
    pool.value = pool.max;
    let value = pool.value;
    actions_intent(actor, value).map(Some)
}

/// Check that `amount` action points are available, without spending them.
pub fn check(actor: &Actor, amount: u32) -> MechResult<()> {
    let have = available(actor.actions.as_ref());
    if amount > have {
        return Err(MechError::InsufficientResource {
            required: amount,
            available: have,
        });
    }
    Ok(())
}

/// Spend `amount` action points.
///
/// Fails without touching the pool if it would drop below zero. Spending
/// nothing from an actor without a pool is a no-op.
pub fn consume(actor: &mut Actor, amount: u32) -> MechResult<Option<UpdateIntent>> {
    check(actor, amount)?;
    let Some(pool) = actor.actions.as_mut() else {
        return Ok(None);
    };
    // `check` bounds amount by the pool value, so it fits in i32.
    let spent = i32::try_from(amount).unwrap_or(pool.value);
    pool.value -= spent;
    let value = pool.value;
    tracing::debug!(actor = %actor.name, spent = amount, left = value, "consumed actions");
    actions_intent(actor, value).map(Some)
}

/// Force the pool back into `0..=max`.
pub fn clamp(pool: &mut ActionPool) {
    pool.max = pool.max.max(0);
    pool.value = pool.value.clamp(0, pool.max);
}
