pub use super::command_stats::Entity as CommandStats;
pub use super::gate_config::Entity as GateConfig;
