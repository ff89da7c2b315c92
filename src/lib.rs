//! # statecraft
//!
//! The rules engine of a two-player, turn-based statecraft card duel.
//!
//! ## Design Principles
//!
//! 1. **Pure State Transformer**: Every public operation mutates the match
//!    aggregate in place and runs to completion before returning. No I/O,
//!    no rendering, no timers.
//!
//! 2. **Deterministic**: All randomness flows through an injected
//!    [`RandomSource`]; a seeded source replays a match exactly.
//!
//! 3. **Data-Driven Effects**: A played card maps, via a closed table, to
//!    an ordered list of primitive [`EffectEvent`]s drained through a
//!    single FIFO queue with front/back injection.
//!
//! ## Architecture
//!
//! - **Single Writer**: The aggregate ([`MatchState`]) is owned exclusively
//!   by the caller and passed by `&mut` for the duration of one operation.
//!
//! - **Reset-Then-Rebuild Auras**: Per-player flags are recomputed from
//!   scratch after every placement, never incrementally maintained.
//!
//! - **Reject, Never Panic**: Illegal operations return [`RulesError`] and
//!   leave the aggregate unchanged; exhausted resources degrade to no-ops.
//!
//! ## Modules
//!
//! - `core`: Player IDs, per-player storage, RNG capability, configuration, log
//! - `cards`: Card definitions, instances, the closed catalog
//! - `state`: The match aggregate and per-player containers
//! - `auras`: Ephemeral per-player flags derived from board contents
//! - `economy`: Action-point costs, discounts, refunds
//! - `effects`: Effect events, the FIFO queue, the drain engine, targeting,
//!   and the card-to-events dispatcher
//! - `rules`: The turn/round state machine and match setup

pub mod auras;
pub mod cards;
pub mod core;
pub mod economy;
pub mod effects;
pub mod error;
pub mod rules;
pub mod state;

// Re-export commonly used types
pub use crate::core::{
    pick_one, shuffle, GameConfig, GameRng, MatchLog, PlayerId, PlayerPair, RandomSource,
};

pub use crate::cards::{Card, CardDefinition, CardId, CardKind, Catalog, Lane, SpecialKind, Uid};

pub use crate::auras::EffectFlags;

pub use crate::economy::{CostQuote, NetQuote};

pub use crate::effects::{EffectEvent, EffectQueue};

pub use crate::error::RulesError;

pub use crate::rules::{LogSink, MatchBuilder};

pub use crate::state::{MatchPhase, MatchState, PlayerSide};
