use crate::{
    data::command_stats::CommandStatsRepository,
    error::AppError,
    model::command_stats::{CommandUsage, UsageCounter},
};
use chrono::Utc;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory::command_stats::CommandStatsFactory};

mod find;
mod save;
