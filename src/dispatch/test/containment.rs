use super::*;
use crate::dispatch::dispatcher::GENERIC_FAILURE;

/// Tests a handler that fails without replying.
///
/// Expected: one error record written, one generic ephemeral reply, and the next
/// event is dispatched normally
#[tokio::test]
async fn fault_is_recorded_and_answered_once() {
    let harness = Harness::new().await;
    harness
        .register(HandlerDescriptor::slash("explode", action(Failing { reply_first: false })))
        .await;
    harness
        .register(HandlerDescriptor::slash("ping", action(Answering("Pong!"))))
        .await;

    let outcomes = harness.dispatch(slash("explode", CommandArgs::new())).await;

    assert_eq!(
        outcomes,
        vec![Outcome::Failed {
            handler: "explode".to_string()
        }]
    );
    assert_eq!(harness.error_files().len(), 1);
    assert_eq!(
        harness.responder.replies(),
        vec![Reply::ephemeral(GENERIC_FAILURE)]
    );

    let next = harness.dispatch(slash("ping", CommandArgs::new())).await;

    assert!(is_executed(&next[0]));
    assert_eq!(harness.responder.replies()[1].content, "Pong!");
}

/// Tests a handler that replies and then fails.
///
/// Expected: error record written but no generic reply on top of the handler's own
#[tokio::test]
async fn fault_after_reply_sends_no_generic_reply() {
    let harness = Harness::new().await;
    harness
        .register(HandlerDescriptor::slash("explode", action(Failing { reply_first: true })))
        .await;

    harness.dispatch(slash("explode", CommandArgs::new())).await;

    assert_eq!(harness.error_files().len(), 1);
    assert_eq!(
        harness.responder.replies(),
        vec![Reply::new("working on it")]
    );
}

/// Tests a handler that panics.
///
/// Expected: the panic is contained as a fault with its message in the error record
#[tokio::test]
async fn panic_is_contained() {
    let harness = Harness::new().await;
    harness
        .register(HandlerDescriptor::slash("explode", action(Panicking)))
        .await;

    let outcomes = harness.dispatch(slash("explode", CommandArgs::new())).await;

    assert!(matches!(outcomes[0], Outcome::Failed { .. }));

    let files = harness.error_files();
    assert_eq!(files.len(), 1);
    let body = std::fs::read_to_string(&files[0]).unwrap();
    assert!(body.contains("handler exploded"));
    assert_eq!(
        harness.responder.replies(),
        vec![Reply::ephemeral(GENERIC_FAILURE)]
    );
}

/// Tests that a failed command is not counted in usage statistics.
///
/// Expected: no usage document after the failure
#[tokio::test]
async fn failed_command_is_not_recorded() {
    let harness = Harness::new().await;
    harness
        .register(HandlerDescriptor::slash("explode", action(Failing { reply_first: false })))
        .await;

    harness.dispatch(slash("explode", CommandArgs::new())).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let db = harness.test.db.as_ref().unwrap();
    let usage = CommandStatsService::new(db)
        .get("explode", "slash")
        .await
        .unwrap();
    assert!(usage.is_none());
}

/// Tests that denials never reach the error sink.
///
/// Expected: no error record for a cooldown denial
#[tokio::test]
async fn denials_are_not_faults() {
    let harness = Harness::new().await;
    harness
        .register(HandlerDescriptor::slash("ping", action(Answering("Pong!"))))
        .await;

    harness.dispatch(slash("ping", CommandArgs::new())).await;
    harness.dispatch(slash("ping", CommandArgs::new())).await;

    assert!(harness.error_files().is_empty());
}

/// Tests two handlers failing for the same component event.
///
/// Expected: only one generic reply is sent for the event
#[tokio::test]
async fn one_generic_reply_per_event() {
    use crate::dispatch::event::EventTrigger;

    let harness = Harness::new().await;
    for name in ["first", "second"] {
        harness
            .register(HandlerDescriptor::listener(
                name,
                EventTrigger::InteractionCreate,
                action(Failing { reply_first: false }),
            ))
            .await;
    }

    let outcomes = harness
        .dispatch(component("anything", ComponentType::Button))
        .await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(harness.error_files().len(), 2);
    assert_eq!(
        harness.responder.replies(),
        vec![Reply::ephemeral(GENERIC_FAILURE)]
    );
}

/// Tests dispatching a failing handler from a spawned task, as the gateway and the
/// handler watcher do.
///
/// Expected: the fault is contained and recorded from inside the task
#[tokio::test]
async fn fault_contained_on_spawned_task() {
    let harness = Arc::new(Harness::new().await);
    harness
        .register(HandlerDescriptor::slash("explode", action(Failing { reply_first: false })))
        .await;

    let task_harness = harness.clone();
    let outcomes = tokio::spawn(async move {
        task_harness
            .dispatch(slash("explode", CommandArgs::new()))
            .await
    })
    .await
    .unwrap();

    assert_eq!(
        outcomes,
        vec![Outcome::Failed {
            handler: "explode".to_string()
        }]
    );
    assert_eq!(harness.error_files().len(), 1);
}
