//! Domain models and operation parameters.
//!
//! Repositories convert SeaORM entity models into these types at the data layer
//! boundary so services and commands never handle raw store rows.

pub mod command_stats;
pub mod gate_config;
