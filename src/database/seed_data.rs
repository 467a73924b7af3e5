use anyhow::Result;
use chrono::Utc;
use sea_orm::*;
use tracing::info;

use crate::database::entities::{
    active_ingredients, ingredient_efficacy, irac_groups, pests, trade_products, usage_history,
    users,
};

/// Seed a demo catalog: two users, the common IRAC groups, a handful of
/// ingredients and branded products, four pests and their efficacy matrix.
/// Safe to call repeatedly; skips if the demo grower already exists.
pub async fn seed_demo_catalog(db: &DatabaseConnection) -> Result<()> {
    let existing_user = users::Entity::find()
        .filter(users::Column::Username.eq("demo"))
        .one(db)
        .await?;

    if existing_user.is_some() {
        info!("Demo catalog already present, skipping seed data creation");
        return Ok(());
    }

    info!("Seeding demo catalog");

    let demo_user_id = create_users(db).await?;
    create_irac_groups(db).await?;
    let ingredient_ids = create_active_ingredients(db).await?;
    let product_ids = create_trade_products(db, &ingredient_ids).await?;
    let pest_ids = create_pests(db).await?;
    create_efficacy_matrix(db, &ingredient_ids, &pest_ids).await?;
    create_sample_history(db, demo_user_id, &ingredient_ids, &product_ids, &pest_ids).await?;

    info!("Demo catalog seeded");
    Ok(())
}

async fn create_users(db: &DatabaseConnection) -> Result<i32> {
    let demo = users::ActiveModel {
        username: Set("demo".to_string()),
        password: Set("demo1234".to_string()),
        role: Set("grower".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    users::ActiveModel {
        username: Set("admin".to_string()),
        password: Set("admin1234".to_string()),
        role: Set("admin".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created {} users", 2);
    Ok(demo.id)
}

async fn create_irac_groups(db: &DatabaseConnection) -> Result<()> {
    let groups_data = vec![
        (
            "1A",
            "Carbamates",
            "Acetylcholinesterase inhibitors; nerve action",
        ),
        (
            "1B",
            "Organophosphates",
            "Acetylcholinesterase inhibitors; nerve action",
        ),
        (
            "3A",
            "Pyrethroids",
            "Sodium channel modulators; nerve action",
        ),
        (
            "4A",
            "Neonicotinoids",
            "Nicotinic acetylcholine receptor competitive modulators",
        ),
        (
            "6",
            "Avermectins",
            "Glutamate-gated chloride channel allosteric modulators",
        ),
        (
            "28",
            "Diamides",
            "Ryanodine receptor modulators; muscle action",
        ),
    ];

    let mut group_models = Vec::new();
    let groups_count = groups_data.len();
    for (id, name, moa_summary) in groups_data {
        group_models.push(irac_groups::ActiveModel {
            id: Set(id.to_string()),
            name: Set(name.to_string()),
            moa_summary: Set(moa_summary.to_string()),
        });
    }

    irac_groups::Entity::insert_many(group_models).exec(db).await?;
    info!("Created {} IRAC groups", groups_count);
    Ok(())
}

async fn create_active_ingredients(db: &DatabaseConnection) -> Result<Vec<i32>> {
    let ingredients_data = vec![
        ("carbaryl", "1A", "contact"),
        ("chlorpyrifos", "1B", "contact"),
        ("lambda-cyhalothrin", "3A", "contact"),
        ("imidacloprid", "4A", "systemic"),
        ("thiamethoxam", "4A", "systemic"),
        ("abamectin", "6", "translaminar"),
        ("chlorantraniliprole", "28", "systemic"),
    ];

    let mut ids = Vec::new();
    for (name, group_id, action_type) in ingredients_data {
        let ingredient = active_ingredients::ActiveModel {
            name: Set(name.to_string()),
            group_id: Set(group_id.to_string()),
            action_type: Set(action_type.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        ids.push(ingredient.id);
    }

    info!("Created {} active ingredients", ids.len());
    Ok(ids)
}

async fn create_trade_products(db: &DatabaseConnection, ingredient_ids: &[i32]) -> Result<Vec<i32>> {
    // Indexes follow the ingredient seeding order above.
    let products_data = vec![
        ("Sevin 85 WP", 0, Some("WP"), Some("85% w/w")),
        ("Lorsban 40 EC", 1, Some("EC"), Some("40% w/v")),
        ("Karate Zeon 2.5 CS", 2, Some("CS"), Some("2.5% w/v")),
        ("Confidor 100 SL", 3, Some("SL"), Some("10% w/v")),
        ("Provado 70 WG", 3, Some("WG"), Some("70% w/w")),
        ("Actara 25 WG", 4, Some("WG"), Some("25% w/w")),
        ("Vertimec 1.8 EC", 5, Some("EC"), Some("1.8% w/v")),
        ("Prevathon 5 SC", 6, Some("SC"), Some("5% w/v")),
    ];

    let mut ids = Vec::new();
    for (name, ingredient_index, formulation, concentration) in products_data {
        let product = trade_products::ActiveModel {
            name: Set(name.to_string()),
            ingredient_id: Set(ingredient_ids[ingredient_index]),
            formulation: Set(formulation.map(|s: &str| s.to_string())),
            concentration: Set(concentration.map(|s: &str| s.to_string())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        ids.push(product.id);
    }

    info!("Created {} trade products", ids.len());
    Ok(ids)
}

async fn create_pests(db: &DatabaseConnection) -> Result<Vec<i32>> {
    let pests_data = vec![
        (
            "Green peach aphid",
            "sucking",
            Some("Colonies on shoot tips and leaf undersides; vectors many viruses"),
        ),
        (
            "Western flower thrips",
            "rasping",
            Some("Silvering and scarring on leaves and petals"),
        ),
        (
            "Diamondback moth",
            "chewing",
            Some("Larvae window-feed on brassica leaves; notorious for resistance"),
        ),
        ("Silverleaf whitefly", "sucking", None),
    ];

    let mut ids = Vec::new();
    for (name, pest_type, description) in pests_data {
        let pest = pests::ActiveModel {
            name: Set(name.to_string()),
            pest_type: Set(pest_type.to_string()),
            description: Set(description.map(|s: &str| s.to_string())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        ids.push(pest.id);
    }

    info!("Created {} pests", ids.len());
    Ok(ids)
}

async fn create_efficacy_matrix(
    db: &DatabaseConnection,
    ingredient_ids: &[i32],
    pest_ids: &[i32],
) -> Result<()> {
    // (ingredient index, pest index, level); indexes follow seeding order.
    let matrix = vec![
        // Green peach aphid
        (3, 0, "high"),
        (4, 0, "high"),
        (2, 0, "medium"),
        (1, 0, "medium"),
        (0, 0, "low"),
        // Western flower thrips
        (5, 1, "high"),
        (2, 1, "medium"),
        (4, 1, "medium"),
        // Diamondback moth
        (6, 2, "high"),
        (5, 2, "medium"),
        (2, 2, "low"),
        (0, 2, "unknown"),
        // Silverleaf whitefly
        (3, 3, "high"),
        (4, 3, "high"),
        (2, 3, "low"),
    ];

    let mut efficacy_models = Vec::new();
    let matrix_count = matrix.len();
    for (ingredient_index, pest_index, level) in matrix {
        efficacy_models.push(ingredient_efficacy::ActiveModel {
            ingredient_id: Set(ingredient_ids[ingredient_index]),
            pest_id: Set(pest_ids[pest_index]),
            efficacy_level: Set(level.to_string()),
        });
    }

    ingredient_efficacy::Entity::insert_many(efficacy_models)
        .exec(db)
        .await?;
    info!("Created {} efficacy entries", matrix_count);
    Ok(())
}

async fn create_sample_history(
    db: &DatabaseConnection,
    user_id: i32,
    ingredient_ids: &[i32],
    product_ids: &[i32],
    pest_ids: &[i32],
) -> Result<()> {
    // Two sprays on the demo plot so a fresh install already shows one
    // blocked group for the aphid.
    let history_data = vec![
        (pest_ids[0], "4A", 3, 3, chrono::Duration::days(14)),
        (pest_ids[0], "3A", 2, 2, chrono::Duration::days(7)),
    ];

    let mut history_models = Vec::new();
    let history_count = history_data.len();
    for (pest_id, group_id, ingredient_index, product_index, age) in history_data {
        history_models.push(usage_history::ActiveModel {
            user_id: Set(user_id),
            plot_name: Set("Home plot".to_string()),
            pest_id: Set(pest_id),
            group_id: Set(group_id.to_string()),
            ingredient_id: Set(ingredient_ids[ingredient_index]),
            product_id: Set(product_ids[product_index]),
            applied_at: Set(Utc::now() - age),
            ..Default::default()
        });
    }

    usage_history::Entity::insert_many(history_models)
        .exec(db)
        .await?;
    info!("Created {} history entries", history_count);
    Ok(())
}
