//! Count, confirm, then fetch both reports
//!
//! `QueryState::update` is a pure reducer over `QueryMsg`; `QueryOrchestrator`
//! runs the effects it returns on tokio tasks and feeds every settled result
//! back through one channel, so state is only mutated from a single place.

pub mod msg;
pub mod orchestrator;
pub mod state;

pub use msg::{Effect, Generation, QueryEvent, QueryMsg, ReportKind};
pub use orchestrator::QueryOrchestrator;
pub use state::{QueryOutcome, QueryState, ReportSlot};
