mod command_stats;
mod gate_config;
