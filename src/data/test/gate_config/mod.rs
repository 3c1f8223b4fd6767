use crate::{
    data::gate_config::GateConfigRepository,
    error::AppError,
    model::gate_config::{GateSide, SetGateChannelParam},
};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory::gate_config::GateConfigFactory};

mod find_by_guild_id;
mod save;
mod set_channel;
