// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Tankwar: rules engine and decision core for a 9x9 two-side tank battle.
//!
//! This crate provides:
//! - A deterministic field engine with simultaneous move/fire resolution
//! - Exact rollback of any applied turn
//! - A per-turn decision engine (distances, threat map, prediction, policy)
//! - The judge protocol, local self-play and replays
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Agent (judge)  /  Arena (local)   │
//! ├─────────────────────────────────────┤
//! │         Decision Engine             │
//! ├─────────────────────────────────────┤
//! │         Field State Engine          │
//! └─────────────────────────────────────┘
//! ```

pub mod agent;
pub mod arena;
pub mod decision;
pub mod error;
pub mod field;
pub mod protocol;
pub mod replay;

pub use error::{ArenaError, FieldError, ProtocolError, ReplayError};

// Re-export key field types at crate root for convenience
pub use field::{Action, Coord, Direction, FieldState, JointAction, Outcome, Side, UnitKey};

pub use agent::Agent;
pub use decision::{decide, DecisionContext};
