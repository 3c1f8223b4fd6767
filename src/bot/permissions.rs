//! Guild permission and role hierarchy math.
//!
//! Interactions carry resolved permissions, prefix messages do not, so the message
//! handler computes them from the cached guild. Moderation uses the same role
//! positions to decide whether the bot may act on a member.

use serenity::all::{Guild, PartialGuild, Permissions, Role, RoleId};
use std::collections::HashMap;

/// Owner and roles of one guild.
pub struct GuildHierarchy<'a> {
    guild_id: u64,
    owner_id: u64,
    roles: &'a HashMap<RoleId, Role>,
}

impl<'a> GuildHierarchy<'a> {
    pub fn from_guild(guild: &'a Guild) -> Self {
        Self {
            guild_id: guild.id.get(),
            owner_id: guild.owner_id.get(),
            roles: &guild.roles,
        }
    }

    pub fn from_partial(guild: &'a PartialGuild) -> Self {
        Self {
            guild_id: guild.id.get(),
            owner_id: guild.owner_id.get(),
            roles: &guild.roles,
        }
    }

    /// Guild-level permissions of a member: `@everyone` plus every held role.
    ///
    /// The owner and administrators hold every permission.
    pub fn permissions(&self, member_id: u64, role_ids: &[u64]) -> Permissions {
        if member_id == self.owner_id {
            return Permissions::all();
        }

        let everyone = self
            .roles
            .get(&RoleId::new(self.guild_id))
            .map(|role| role.permissions)
            .unwrap_or_else(Permissions::empty);

        let permissions = role_ids
            .iter()
            .filter_map(|id| self.roles.get(&RoleId::new(*id)))
            .fold(everyone, |acc, role| acc | role.permissions);

        if permissions.contains(Permissions::ADMINISTRATOR) {
            Permissions::all()
        } else {
            permissions
        }
    }

    /// Whether `actor` sits strictly above `target` in the role hierarchy.
    ///
    /// Nobody outranks the owner; the owner outranks everyone else.
    pub fn outranks(
        &self,
        actor_id: u64,
        actor_roles: &[u64],
        target_id: u64,
        target_roles: &[u64],
    ) -> bool {
        if target_id == self.owner_id {
            return false;
        }
        if actor_id == self.owner_id {
            return true;
        }

        self.highest_position(actor_roles) > self.highest_position(target_roles)
    }

    fn highest_position(&self, role_ids: &[u64]) -> Option<u16> {
        role_ids
            .iter()
            .filter_map(|id| self.roles.get(&RoleId::new(*id)))
            .map(|role| role.position)
            .max()
    }
}
