//! The debate protocol: bounded rounds of argument exchange between a
//! pool of players, a moderator that judges convergence after every
//! round, and a fallback judge that forces a decision when the round
//! budget runs out.

#[path = "debate/config.rs"]
mod config;

#[path = "debate/session.rs"]
mod session;

#[path = "debate/pool.rs"]
mod pool;

#[path = "debate/controller.rs"]
mod controller;

pub use config::DebateConfig;
pub use controller::{Debate, DebateState};
pub use pool::PlayerPool;
pub use session::{DebateOutcome, Session};
