use super::*;

/// Tests setting the join channel for a guild with no record.
///
/// Expected: record created with join side set and enabled, leave side empty
#[tokio::test]
async fn creates_record_for_new_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GateConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GateConfigRepository::new(db);
    let config = repo
        .set_channel(SetGateChannelParam {
            guild_id: 1000,
            side: GateSide::Join,
            channel_id: 2000,
        })
        .await?;

    assert_eq!(config.join_channel_id, Some(2000));
    assert!(config.join_enabled);
    assert_eq!(config.leave_channel_id, None);
    assert!(!config.leave_enabled);

    Ok(())
}

/// Tests setting the leave channel on a guild that already has a join channel.
///
/// Verifies the upsert only touches the leave side, so there is still exactly one
/// record per guild and the join settings survive.
///
/// Expected: join side unchanged, leave side set and enabled
#[tokio::test]
async fn updates_one_side_and_preserves_other() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GateConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GateConfigFactory::new(db)
        .guild_id("1000")
        .join_channel("2000")
        .join_enabled(false)
        .build()
        .await?;

    let repo = GateConfigRepository::new(db);
    let config = repo
        .set_channel(SetGateChannelParam {
            guild_id: 1000,
            side: GateSide::Leave,
            channel_id: 3000,
        })
        .await?;

    assert_eq!(config.join_channel_id, Some(2000));
    assert!(!config.join_enabled);
    assert_eq!(config.leave_channel_id, Some(3000));
    assert!(config.leave_enabled);

    let count = entity::prelude::GateConfig::find().all(db).await?.len();
    assert_eq!(count, 1);

    Ok(())
}

/// Tests re-pointing a disabled side at a new channel.
///
/// Expected: channel replaced and side switched back on
#[tokio::test]
async fn replaces_channel_and_reenables() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GateConfig)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    GateConfigFactory::new(db)
        .guild_id("1000")
        .join_channel("2000")
        .join_enabled(false)
        .build()
        .await?;

    let repo = GateConfigRepository::new(db);
    let config = repo
        .set_channel(SetGateChannelParam {
            guild_id: 1000,
            side: GateSide::Join,
            channel_id: 2001,
        })
        .await?;

    assert_eq!(config.join_channel_id, Some(2001));
    assert!(config.join_enabled);

    Ok(())
}
