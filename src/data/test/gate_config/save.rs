use super::*;

/// Tests saving a modified configuration back to the store.
///
/// Expected: flags persisted and visible on the next lookup
#[tokio::test]
async fn persists_modified_flags() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GateConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GateConfigFactory::new(db)
        .guild_id("1000")
        .leave_channel("3000")
        .leave_enabled(true)
        .build()
        .await?;

    let repo = GateConfigRepository::new(db);
    let mut config = repo.find_by_guild_id(1000).await?.unwrap();
    config.set_enabled(GateSide::Leave, false);
    repo.save(&config).await?;

    let reloaded = repo.find_by_guild_id(1000).await?.unwrap();
    assert!(!reloaded.leave_enabled);
    assert_eq!(reloaded.leave_channel_id, Some(3000));

    Ok(())
}
