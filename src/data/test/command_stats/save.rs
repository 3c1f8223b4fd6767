use super::*;

/// Tests saving a usage document that does not exist yet.
///
/// Expected: document inserted and returned
#[tokio::test]
async fn inserts_new_document() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_command_stats_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut usage = CommandUsage::new("kick".to_string(), "prefix".to_string(), Utc::now());
    usage.total_uses = 1;
    usage.users.push(UsageCounter {
        id: "5".to_string(),
        name: "someone".to_string(),
        uses: 1,
    });

    let repo = CommandStatsRepository::new(db);
    let saved = repo.save(&usage).await?;

    assert_eq!(saved.command_name, "kick");
    assert_eq!(saved.command_kind, "prefix");
    assert_eq!(saved.total_uses, 1);
    assert_eq!(saved.users.len(), 1);

    Ok(())
}

/// Tests saving over an existing document.
///
/// Verifies the existing row is updated in place rather than a second document
/// being created for the same key.
///
/// Expected: single row with updated totals
#[tokio::test]
async fn updates_existing_document() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_command_stats_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CommandStatsFactory::new(db, "kick", "slash")
        .total_uses(2)
        .build()
        .await?;

    let repo = CommandStatsRepository::new(db);
    let mut usage = repo.find("kick", "slash").await?.unwrap();
    usage.total_uses = 3;
    repo.save(&usage).await?;

    let rows = {
        use sea_orm::EntityTrait;
        entity::prelude::CommandStats::find().all(db).await?
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_uses, 3);

    Ok(())
}

/// Tests two first uses of a command racing to save.
///
/// Both callers read no existing document and save a fresh one; the second save
/// must land on the same row through the unique (name, kind) key.
///
/// Expected: both saves succeed and a single row holds the last write
#[tokio::test]
async fn concurrent_first_saves_share_one_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_command_stats_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = CommandStatsRepository::new(db);

    let mut first = CommandUsage::new("ban".to_string(), "slash".to_string(), Utc::now());
    first.total_uses = 1;
    let mut second = CommandUsage::new("ban".to_string(), "slash".to_string(), Utc::now());
    second.total_uses = 1;
    second.users.push(UsageCounter {
        id: "7".to_string(),
        name: "other".to_string(),
        uses: 1,
    });

    let (first_saved, second_saved) = tokio::join!(repo.save(&first), repo.save(&second));
    first_saved?;
    second_saved?;

    let rows = {
        use sea_orm::EntityTrait;
        entity::prelude::CommandStats::find().all(db).await?
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_uses, 1);

    Ok(())
}
