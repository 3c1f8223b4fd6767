//! Per-guild join/leave greeting configuration.

use crate::{
    error::AppError,
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// Which membership event a greeting setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSide {
    Join,
    Leave,
}

/// Greeting configuration for a single guild.
///
/// Each guild has at most one record. The join and leave sides are independent: each
/// has its own channel and enabled flag, and a side with no channel never sends.
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub guild_id: u64,
    pub join_channel_id: Option<u64>,
    pub leave_channel_id: Option<u64>,
    pub join_enabled: bool,
    pub leave_enabled: bool,
}

impl GateConfig {
    /// Converts an entity model to a gate config domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GateConfig)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored ID was not a valid u64
    pub fn from_entity(entity: entity::gate_config::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            join_channel_id: parse_optional_u64(entity.join_channel_id)?,
            leave_channel_id: parse_optional_u64(entity.leave_channel_id)?,
            join_enabled: entity.join_enabled,
            leave_enabled: entity.leave_enabled,
        })
    }

    pub fn channel(&self, side: GateSide) -> Option<u64> {
        match side {
            GateSide::Join => self.join_channel_id,
            GateSide::Leave => self.leave_channel_id,
        }
    }

    pub fn enabled(&self, side: GateSide) -> bool {
        match side {
            GateSide::Join => self.join_enabled,
            GateSide::Leave => self.leave_enabled,
        }
    }

    pub fn set_enabled(&mut self, side: GateSide, enabled: bool) {
        match side {
            GateSide::Join => self.join_enabled = enabled,
            GateSide::Leave => self.leave_enabled = enabled,
        }
    }

    /// Channel to greet in, if this side is both configured and switched on.
    pub fn active_channel(&self, side: GateSide) -> Option<u64> {
        if self.enabled(side) {
            self.channel(side)
        } else {
            None
        }
    }
}

/// Parameters for pointing one side of a guild's greetings at a channel.
///
/// Setting a channel also switches that side on.
#[derive(Debug, Clone)]
pub struct SetGateChannelParam {
    pub guild_id: u64,
    pub side: GateSide,
    pub channel_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GateConfig {
        GateConfig {
            guild_id: 1,
            join_channel_id: Some(10),
            leave_channel_id: None,
            join_enabled: true,
            leave_enabled: true,
        }
    }

    #[test]
    fn active_channel_requires_channel_and_flag() {
        let mut config = config();

        assert_eq!(config.active_channel(GateSide::Join), Some(10));
        assert_eq!(config.active_channel(GateSide::Leave), None);

        config.set_enabled(GateSide::Join, false);
        assert_eq!(config.active_channel(GateSide::Join), None);
    }

    #[test]
    fn from_entity_parses_ids() {
        let model = entity::gate_config::Model {
            id: 1,
            guild_id: "42".to_string(),
            join_channel_id: Some("7".to_string()),
            leave_channel_id: None,
            join_enabled: true,
            leave_enabled: false,
        };

        let config = GateConfig::from_entity(model).unwrap();

        assert_eq!(config.guild_id, 42);
        assert_eq!(config.join_channel_id, Some(7));
        assert!(!config.leave_enabled);
    }
}
