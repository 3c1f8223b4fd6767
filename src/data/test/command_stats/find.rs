use super::*;

/// Tests finding a usage document by name and kind.
///
/// Expected: Ok(Some) with counter lists decoded
#[tokio::test]
async fn finds_document_by_name_and_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_command_stats_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CommandStatsFactory::new(db, "ban", "slash")
        .total_uses(4)
        .users(json!([{"id": "1", "name": "mod#0001", "uses": 4}]))
        .build()
        .await?;

    let repo = CommandStatsRepository::new(db);
    let usage = repo.find("ban", "slash").await?;

    assert!(usage.is_some());
    let usage = usage.unwrap();
    assert_eq!(usage.total_uses, 4);
    assert_eq!(
        usage.users,
        vec![UsageCounter {
            id: "1".to_string(),
            name: "mod#0001".to_string(),
            uses: 4,
        }]
    );
    assert!(usage.servers.is_empty());

    Ok(())
}

/// Tests that slash and prefix usage of the same name are separate documents.
///
/// Expected: Ok(None) for the kind that was never used
#[tokio::test]
async fn kinds_are_separate_keys() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_command_stats_table()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    CommandStatsFactory::new(db, "ping", "slash")
        .total_uses(1)
        .build()
        .await?;

    let repo = CommandStatsRepository::new(db);

    assert!(repo.find("ping", "slash").await?.is_some());
    assert!(repo.find("ping", "prefix").await?.is_none());

    Ok(())
}
