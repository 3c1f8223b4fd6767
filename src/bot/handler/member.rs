use serenity::all::{Context, GuildId, Member, User};

use crate::dispatch::{
    dispatcher::Dispatcher,
    event::{Actor, EventPayload, InboundEvent, Origin, ReplyTarget},
};

/// Handle a member joining a guild
pub async fn handle_guild_member_addition(dispatcher: &Dispatcher, ctx: Context, new_member: Member) {
    let role_ids = new_member.roles.iter().map(|role| role.get()).collect();
    let event = membership_event(
        &ctx,
        new_member.guild_id,
        &new_member.user,
        role_ids,
        EventPayload::MemberJoin,
    );

    tracing::debug!(
        "Member {} joined guild {}",
        new_member.user.tag(),
        new_member.guild_id
    );

    dispatcher.dispatch(event).await;
}

/// Handle a member leaving a guild
pub async fn handle_guild_member_removal(
    dispatcher: &Dispatcher,
    ctx: Context,
    guild_id: GuildId,
    user: User,
    member_data_if_available: Option<Member>,
) {
    let role_ids = member_data_if_available
        .map(|member| member.roles.iter().map(|role| role.get()).collect())
        .unwrap_or_default();
    let event = membership_event(&ctx, guild_id, &user, role_ids, EventPayload::MemberLeave);

    tracing::debug!("Member {} left guild {}", user.tag(), guild_id);

    dispatcher.dispatch(event).await;
}

fn membership_event(
    ctx: &Context,
    guild_id: GuildId,
    user: &User,
    role_ids: Vec<u64>,
    payload: EventPayload,
) -> InboundEvent {
    InboundEvent {
        actor: Actor {
            id: user.id.get(),
            tag: user.tag(),
            role_ids,
            permissions: None,
        },
        origin: Origin::Guild {
            guild_id: guild_id.get(),
            guild_name: guild_id.name(&ctx.cache).unwrap_or_default(),
            channel_id: None,
        },
        bot_permissions: None,
        reply_target: ReplyTarget::None,
        payload,
    }
}
