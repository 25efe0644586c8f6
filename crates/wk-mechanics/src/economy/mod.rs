//! Per-round action points and talent cooldowns.
//!
//! Every operation that changes persisted state returns the
//! [`UpdateIntent`](wk_core::UpdateIntent)s describing the change, so the
//! caller can hand them to a persistence collaborator.

pub mod cooldown;
pub mod ledger;
