//! Permission names as they appear in replies and handler sources.

use serenity::all::Permissions;

/// PascalCase names for the permission flags handlers can require.
pub const PERMISSION_NAMES: &[(Permissions, &str)] = &[
    (Permissions::CREATE_INSTANT_INVITE, "CreateInstantInvite"),
    (Permissions::KICK_MEMBERS, "KickMembers"),
    (Permissions::BAN_MEMBERS, "BanMembers"),
    (Permissions::ADMINISTRATOR, "Administrator"),
    (Permissions::MANAGE_CHANNELS, "ManageChannels"),
    (Permissions::MANAGE_GUILD, "ManageGuild"),
    (Permissions::ADD_REACTIONS, "AddReactions"),
    (Permissions::VIEW_AUDIT_LOG, "ViewAuditLog"),
    (Permissions::PRIORITY_SPEAKER, "PrioritySpeaker"),
    (Permissions::STREAM, "Stream"),
    (Permissions::VIEW_CHANNEL, "ViewChannel"),
    (Permissions::SEND_MESSAGES, "SendMessages"),
    (Permissions::SEND_TTS_MESSAGES, "SendTTSMessages"),
    (Permissions::MANAGE_MESSAGES, "ManageMessages"),
    (Permissions::EMBED_LINKS, "EmbedLinks"),
    (Permissions::ATTACH_FILES, "AttachFiles"),
    (Permissions::READ_MESSAGE_HISTORY, "ReadMessageHistory"),
    (Permissions::MENTION_EVERYONE, "MentionEveryone"),
    (Permissions::USE_EXTERNAL_EMOJIS, "UseExternalEmojis"),
    (Permissions::CONNECT, "Connect"),
    (Permissions::SPEAK, "Speak"),
    (Permissions::MUTE_MEMBERS, "MuteMembers"),
    (Permissions::DEAFEN_MEMBERS, "DeafenMembers"),
    (Permissions::MOVE_MEMBERS, "MoveMembers"),
    (Permissions::CHANGE_NICKNAME, "ChangeNickname"),
    (Permissions::MANAGE_NICKNAMES, "ManageNicknames"),
    (Permissions::MANAGE_ROLES, "ManageRoles"),
    (Permissions::MANAGE_WEBHOOKS, "ManageWebhooks"),
    (Permissions::USE_APPLICATION_COMMANDS, "UseApplicationCommands"),
    (Permissions::MANAGE_EVENTS, "ManageEvents"),
    (Permissions::MANAGE_THREADS, "ManageThreads"),
    (Permissions::CREATE_PUBLIC_THREADS, "CreatePublicThreads"),
    (Permissions::CREATE_PRIVATE_THREADS, "CreatePrivateThreads"),
    (Permissions::SEND_MESSAGES_IN_THREADS, "SendMessagesInThreads"),
    (Permissions::MODERATE_MEMBERS, "ModerateMembers"),
];

/// Names of every listed flag set in `permissions`, in table order.
pub fn permission_names(permissions: Permissions) -> Vec<&'static str> {
    PERMISSION_NAMES
        .iter()
        .filter(|(flag, _)| permissions.contains(*flag))
        .map(|(_, name)| *name)
        .collect()
}

/// Looks a permission up by its PascalCase name.
pub fn parse_permission(name: &str) -> Option<Permissions> {
    PERMISSION_NAMES
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
        .map(|(flag, _)| *flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_table_order() {
        let names = permission_names(Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS);

        assert_eq!(names, vec!["KickMembers", "BanMembers"]);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse_permission("KickMembers"), Some(Permissions::KICK_MEMBERS));
        assert_eq!(parse_permission("kickmembers"), Some(Permissions::KICK_MEMBERS));
        assert_eq!(parse_permission("Kick"), None);
    }
}
