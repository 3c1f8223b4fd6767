//! Services orchestrating repositories and outbound side effects.

pub mod audit;
pub mod command_stats;
pub mod error_sink;
pub mod gate_config;
