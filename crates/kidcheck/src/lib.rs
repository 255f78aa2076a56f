//! Account directory and check-in request ledger backing the KidCheck pickup coordination
//! service.

pub mod accounts;
pub mod clock;
pub mod config;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod requests;
pub mod telemetry;
