use super::*;
use crate::{
    commands::greeting,
    dispatch::{descriptor::Namespace, event::EventTrigger},
};
use test_utils::factory::gate_config::GateConfigFactory;

fn button(name: &str, custom_id: &str, counter: Arc<Counting>) -> HandlerDescriptor {
    HandlerDescriptor::listener(name, EventTrigger::InteractionCreate, counter).custom_ids([custom_id])
}

/// Tests a custom ID filtered listener against slash commands.
///
/// Expected: the listener never runs for a slash command, even one with the same name
#[tokio::test]
async fn filtered_listener_ignores_slash_commands() {
    let harness = Harness::new().await;
    let counter = Arc::new(Counting::default());
    harness.register(button("verify", "verify", counter.clone())).await;

    let outcomes = harness.dispatch(slash("verify", CommandArgs::new())).await;

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], Outcome::Unknown { .. }));
    assert_eq!(counter.count(), 0);
}

/// Tests component type learning on a filtered listener.
///
/// Expected: the first button fixes the type, a select menu with the same custom ID
/// is ignored afterwards and buttons keep working
#[tokio::test]
async fn component_type_is_learned_from_first_match() {
    let harness = Harness::new().await;
    let counter = Arc::new(Counting::default());
    harness.register(button("verify", "verify", counter.clone())).await;

    harness
        .dispatch(component("verify", ComponentType::Button))
        .await;
    let select = harness
        .dispatch(component("verify", ComponentType::StringSelect))
        .await;
    harness
        .dispatch(by(component("verify", ComponentType::Button), actor(USER_ID + 1)))
        .await;

    assert!(select.is_empty());
    assert_eq!(counter.count(), 2);
}

/// Tests that re-registering a listener forgets its learned component type.
///
/// Expected: after reload the select menu is accepted as the new first match
#[tokio::test]
async fn reload_clears_learned_component_type() {
    let harness = Harness::new().await;
    let counter = Arc::new(Counting::default());
    harness.register(button("verify", "verify", counter.clone())).await;

    harness
        .dispatch(component("verify", ComponentType::Button))
        .await;

    let previous = (Namespace::Event, "verify".to_string());
    harness
        .registry
        .reload(Some(&previous), button("verify", "verify", counter.clone()))
        .await;

    let select = harness
        .dispatch(by(
            component("verify", ComponentType::StringSelect),
            actor(USER_ID + 1),
        ))
        .await;

    assert_eq!(select.len(), 1);
    assert_eq!(counter.count(), 2);
}

/// Tests component events whose custom ID is not listed.
///
/// Expected: filtered listener skipped, unfiltered listener still runs
#[tokio::test]
async fn unlisted_custom_id_only_reaches_unfiltered_listeners() {
    let harness = Harness::new().await;
    let filtered = Arc::new(Counting::default());
    let unfiltered = Arc::new(Counting::default());
    harness.register(button("verify", "verify", filtered.clone())).await;
    harness
        .register(HandlerDescriptor::listener(
            "audit-clicks",
            EventTrigger::InteractionCreate,
            unfiltered.clone(),
        ))
        .await;

    let outcomes = harness
        .dispatch(component("other", ComponentType::Button))
        .await;

    assert_eq!(
        outcomes,
        vec![Outcome::Executed {
            handler: "audit-clicks".to_string()
        }]
    );
    assert_eq!(filtered.count(), 0);
    assert_eq!(unfiltered.count(), 1);
}

/// Tests listener cooldowns, which only apply when declared, keyed by custom ID.
///
/// Expected: second press of the same button is throttled with the custom message,
/// a different button on the same listener is not
#[tokio::test]
async fn listener_cooldown_is_keyed_by_custom_id() {
    let harness = Harness::new().await;
    let counter = Arc::new(Counting::default());
    harness
        .register(
            HandlerDescriptor::listener("tickets", EventTrigger::InteractionCreate, counter.clone())
                .custom_ids(["open", "close"])
                .cooldown(Some(Duration::from_secs(60)))
                .cooldown_message("Slow down, try again in {time}."),
        )
        .await;

    harness
        .dispatch(component("open", ComponentType::Button))
        .await;
    let repeat = harness
        .dispatch(component("open", ComponentType::Button))
        .await;
    harness
        .dispatch(component("close", ComponentType::Button))
        .await;

    assert!(matches!(denial(&repeat[0]), Some(Denial::Cooldown(_))));
    assert_eq!(counter.count(), 2);
    assert_eq!(
        harness.responder.replies()[0].content,
        "Slow down, try again in 1m 0s."
    );
}

/// Tests that listeners have no cooldown unless declared.
///
/// Expected: repeated clicks all run
#[tokio::test]
async fn listener_without_cooldown_runs_every_time() {
    let harness = Harness::new().await;
    let counter = Arc::new(Counting::default());
    harness.register(button("verify", "verify", counter.clone())).await;

    for _ in 0..3 {
        harness
            .dispatch(component("verify", ComponentType::Button))
            .await;
    }

    assert_eq!(counter.count(), 3);
}

/// Tests a listener permission gate.
///
/// Expected: listener style "Missing Permissions" reply
#[tokio::test]
async fn listener_permission_reply_uses_listener_wording() {
    let harness = Harness::new().await;
    let counter = Arc::new(Counting::default());
    harness
        .register(
            button("purge", "purge", counter.clone()).user_permissions(Permissions::MANAGE_MESSAGES),
        )
        .await;

    harness
        .dispatch(component("purge", ComponentType::Button))
        .await;

    assert_eq!(
        harness.responder.replies()[0].content,
        "❌ **Missing Permissions**\nYou need: ManageMessages"
    );
}

/// Tests the welcome listener with a configured and enabled join channel.
///
/// Expected: greeting posted to the join channel
#[tokio::test]
async fn member_join_greets_in_join_channel() {
    let harness = Harness::new().await;
    harness
        .register(greeting::join_template("greet-join", Namespace::Event))
        .await;
    harness
        .register(greeting::leave_template("greet-leave", Namespace::Event))
        .await;

    let db = harness.test.db.as_ref().unwrap();
    GateConfigFactory::new(db)
        .guild_id(GUILD_ID.to_string())
        .join_channel("300")
        .join_enabled(true)
        .build()
        .await
        .unwrap();

    let outcomes = harness.dispatch(member_join(55)).await;

    assert_eq!(
        outcomes,
        vec![Outcome::Executed {
            handler: "greet-join".to_string()
        }]
    );
    assert_eq!(
        harness.responder.sent(),
        vec![(300, Reply::new("Hello <@55>, welcome to **Test Guild**!"))]
    );
}

/// Tests the goodbye listener when the leave side is switched off.
///
/// Expected: listener runs but posts nothing
#[tokio::test]
async fn member_leave_with_disabled_side_posts_nothing() {
    let harness = Harness::new().await;
    harness
        .register(greeting::leave_template("greet-leave", Namespace::Event))
        .await;

    let db = harness.test.db.as_ref().unwrap();
    GateConfigFactory::new(db)
        .guild_id(GUILD_ID.to_string())
        .leave_channel("301")
        .leave_enabled(false)
        .build()
        .await
        .unwrap();

    let outcomes = harness.dispatch(member_leave(55)).await;

    assert!(is_executed(&outcomes[0]));
    assert!(harness.responder.sent().is_empty());
}
