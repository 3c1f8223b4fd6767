pub mod prelude;

pub mod command_stats;
pub mod gate_config;
