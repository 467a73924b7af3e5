//! Database functionality tests
//!
//! Tests for migrations, entity operations, the seed catalog and the
//! service layer against a real SQLite database.

use anyhow::Result;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tempfile::NamedTempFile;

use sprayguide::database::entities::*;
use sprayguide::database::{seed_data, setup_database};
use sprayguide::errors::AdvisoryError;
use sprayguide::services::{CatalogService, HistoryService, NewApplication, RotationService};

/// Create a test database connection with migrations applied.
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Verify all tables exist by querying them
    assert_eq!(users::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(pests::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(irac_groups::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(active_ingredients::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(trade_products::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(ingredient_efficacy::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(usage_history::Entity::find().all(&db).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_pest_crud_operations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let pest = pests::ActiveModel {
        name: Set("Green peach aphid".to_string()),
        pest_type: Set("sucking".to_string()),
        description: Set(Some("Virus vector".to_string())),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert_eq!(pest.name, "Green peach aphid");

    let found = pests::Entity::find_by_id(pest.id)
        .one(&db)
        .await?
        .expect("Pest should exist");
    assert_eq!(found.pest_type, "sucking");

    let mut update: pests::ActiveModel = found.into();
    update.name = Set("Myzus persicae".to_string());
    let updated = update.update(&db).await?;
    assert_eq!(updated.name, "Myzus persicae");

    pests::Entity::delete_by_id(updated.id).exec(&db).await?;
    assert!(pests::Entity::find_by_id(updated.id).one(&db).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_seed_demo_catalog_is_idempotent() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    seed_data::seed_demo_catalog(&db).await?;

    let group_count = irac_groups::Entity::find().count(&db).await?;
    let ingredient_count = active_ingredients::Entity::find().count(&db).await?;
    let pest_count = pests::Entity::find().count(&db).await?;
    assert!(group_count > 0);
    assert!(ingredient_count > 0);
    assert!(pest_count > 0);

    // A second run must not duplicate anything
    seed_data::seed_demo_catalog(&db).await?;
    assert_eq!(irac_groups::Entity::find().count(&db).await?, group_count);
    assert_eq!(
        active_ingredients::Entity::find().count(&db).await?,
        ingredient_count
    );
    assert_eq!(pests::Entity::find().count(&db).await?, pest_count);

    Ok(())
}

#[tokio::test]
async fn test_rotation_service_windows_by_applied_at() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    seed_data::seed_demo_catalog(&db).await?;

    let user = users::Entity::find()
        .filter(users::Column::Username.eq("demo"))
        .one(&db)
        .await?
        .expect("demo user seeded");
    let pest = pests::Entity::find()
        .filter(pests::Column::Name.eq("Diamondback moth"))
        .one(&db)
        .await?
        .expect("pest seeded");
    let ingredient = active_ingredients::Entity::find()
        .filter(active_ingredients::Column::Name.eq("chlorantraniliprole"))
        .one(&db)
        .await?
        .expect("ingredient seeded");
    let product = trade_products::Entity::find()
        .filter(trade_products::Column::IngredientId.eq(ingredient.id))
        .one(&db)
        .await?
        .expect("product seeded");

    // Rows inserted out of chronological order; the window must follow
    // applied_at, not insertion order.
    for age_days in [3i64, 1, 2] {
        usage_history::ActiveModel {
            user_id: Set(user.id),
            plot_name: Set("Back field".to_string()),
            pest_id: Set(pest.id),
            group_id: Set(ingredient.group_id.clone()),
            ingredient_id: Set(ingredient.id),
            product_id: Set(product.id),
            applied_at: Set(Utc::now() - Duration::days(age_days)),
            ..Default::default()
        }
        .insert(&db)
        .await?;
    }

    let advice = RotationService::new(db.clone())
        .recommend(user.id, "Back field", pest.id)
        .await?;

    assert_eq!(advice.recent_history, vec!["28", "28", "28"]);

    Ok(())
}

#[tokio::test]
async fn test_rotation_service_rejects_blank_plot() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let err = RotationService::new(db.clone())
        .recommend(1, "  ", 1)
        .await
        .expect_err("blank plot must be rejected");
    assert!(matches!(err, AdvisoryError::InvalidArgument(_)));

    Ok(())
}

#[tokio::test]
async fn test_catalog_service_guards_ingredient_delete() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    seed_data::seed_demo_catalog(&db).await?;

    let ingredient = active_ingredients::Entity::find()
        .filter(active_ingredients::Column::Name.eq("imidacloprid"))
        .one(&db)
        .await?
        .expect("ingredient seeded");

    let catalog = CatalogService::new(db.clone());
    let err = catalog
        .delete_ingredient(ingredient.id)
        .await
        .expect_err("referenced ingredient must not be deletable");
    assert!(matches!(err, AdvisoryError::ReferentialConflict { .. }));

    // Products and efficacy rows survive the rejected delete
    let product_count = trade_products::Entity::find()
        .filter(trade_products::Column::IngredientId.eq(ingredient.id))
        .count(&db)
        .await?;
    assert!(product_count > 0);

    let missing = catalog.delete_ingredient(999_999).await.expect_err("unknown id");
    assert!(matches!(missing, AdvisoryError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn test_history_service_records_and_lists() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    seed_data::seed_demo_catalog(&db).await?;

    let user = users::Entity::find()
        .filter(users::Column::Username.eq("demo"))
        .one(&db)
        .await?
        .expect("demo user seeded");
    let pest = pests::Entity::find()
        .filter(pests::Column::Name.eq("Western flower thrips"))
        .one(&db)
        .await?
        .expect("pest seeded");
    let ingredient = active_ingredients::Entity::find()
        .filter(active_ingredients::Column::Name.eq("abamectin"))
        .one(&db)
        .await?
        .expect("ingredient seeded");
    let product = trade_products::Entity::find()
        .filter(trade_products::Column::IngredientId.eq(ingredient.id))
        .one(&db)
        .await?
        .expect("product seeded");

    let history = HistoryService::new(db.clone());
    let id = history
        .record_application(NewApplication {
            user_id: user.id,
            plot_name: "Glasshouse 2".to_string(),
            pest_id: pest.id,
            // Padded input resolves to the catalog group "6"
            g_id: " 6 ".to_string(),
            c_id: ingredient.id,
            p_id: product.id,
        })
        .await?;
    assert!(id > 0);

    let records = history.history_for_user(user.id).await?;
    let recorded = records
        .iter()
        .find(|record| record.id == id)
        .expect("new entry listed");
    assert_eq!(recorded.g_id, "6");
    assert_eq!(recorded.c_name, "abamectin");
    assert_eq!(recorded.pest_name, "Western flower thrips");

    // Newest first across the whole ledger
    let newest_first = records
        .windows(2)
        .all(|pair| pair[0].applied_at >= pair[1].applied_at);
    assert!(newest_first);

    let err = history
        .record_application(NewApplication {
            user_id: user.id,
            plot_name: "Glasshouse 2".to_string(),
            pest_id: pest.id,
            g_id: "99Z".to_string(),
            c_id: ingredient.id,
            p_id: product.id,
        })
        .await
        .expect_err("unknown group must be rejected");
    assert!(matches!(err, AdvisoryError::NotFound { .. }));

    Ok(())
}
