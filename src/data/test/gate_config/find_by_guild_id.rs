use super::*;

/// Tests finding an existing guild configuration.
///
/// Expected: Ok(Some) with stored IDs parsed into u64
#[tokio::test]
async fn finds_existing_config() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GateConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GateConfigFactory::new(db)
        .guild_id("1000")
        .join_channel("2000")
        .join_enabled(true)
        .build()
        .await?;

    let repo = GateConfigRepository::new(db);
    let config = repo.find_by_guild_id(1000).await?;

    assert!(config.is_some());
    let config = config.unwrap();
    assert_eq!(config.guild_id, 1000);
    assert_eq!(config.join_channel_id, Some(2000));
    assert!(config.join_enabled);
    assert_eq!(config.leave_channel_id, None);

    Ok(())
}

/// Tests looking up a guild that was never configured.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GateConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GateConfigFactory::new(db).guild_id("1000").build().await?;

    let repo = GateConfigRepository::new(db);
    let config = repo.find_by_guild_id(9999).await?;

    assert!(config.is_none());

    Ok(())
}

/// Tests that a corrupted stored channel ID surfaces as an error instead of a panic.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_on_malformed_stored_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GateConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GateConfigFactory::new(db)
        .guild_id("1000")
        .join_channel("general")
        .build()
        .await?;

    let repo = GateConfigRepository::new(db);
    let result = repo.find_by_guild_id(1000).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
