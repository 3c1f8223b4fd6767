//! Test factory for creating Serenity Role objects.
//!
//! Roles are built by deserializing the JSON Discord sends in guild payloads, so the
//! result goes through the same parsing as live data.

use serenity::all::{Permissions, Role};

/// Creates a test Serenity Role at `position` granting `permissions`.
///
/// Colour, icon and display flags are fixed defaults; the bot only reads a role's
/// position and permissions. The payload carries both the legacy `color` field and
/// the `colors` object newer Discord payloads include.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake); use the guild ID for `@everyone`
/// - `name` - Role name
/// - `position` - Role position in the hierarchy (higher = more important)
/// - `permissions` - Permissions granted by the role
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use serenity::all::Permissions;
/// use test_utils::serenity::role::create_test_role;
///
/// let moderator = create_test_role(123456789, "Moderator", 5, Permissions::KICK_MEMBERS);
/// assert_eq!(moderator.position, 5);
/// assert!(moderator.permissions.kick_members());
/// ```
pub fn create_test_role(
    role_id: u64,
    name: &str,
    position: u16,
    permissions: Permissions,
) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "colors": {
            "primary_color": 0,
            "secondary_color": null,
            "tertiary_color": null,
        },
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": permissions.bits().to_string(),
        "managed": false,
        "mentionable": false,
        "flags": 0,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
