use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create pests table
        manager
            .create_table(
                Table::create()
                    .table(Pests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pests::Name).string().not_null())
                    .col(ColumnDef::new(Pests::PestType).string().not_null())
                    .col(ColumnDef::new(Pests::Description).string())
                    .to_owned(),
            )
            .await?;

        // Create irac_groups table
        manager
            .create_table(
                Table::create()
                    .table(IracGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IracGroups::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IracGroups::Name).string().not_null())
                    .col(ColumnDef::new(IracGroups::MoaSummary).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create active_ingredients table
        manager
            .create_table(
                Table::create()
                    .table(ActiveIngredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActiveIngredients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActiveIngredients::Name).string().not_null())
                    .col(
                        ColumnDef::new(ActiveIngredients::GroupId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActiveIngredients::ActionType)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-active_ingredients-group_id")
                            .from(ActiveIngredients::Table, ActiveIngredients::GroupId)
                            .to(IracGroups::Table, IracGroups::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create trade_products table
        manager
            .create_table(
                Table::create()
                    .table(TradeProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TradeProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TradeProducts::Name).string().not_null())
                    .col(
                        ColumnDef::new(TradeProducts::IngredientId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TradeProducts::Formulation).string())
                    .col(ColumnDef::new(TradeProducts::Concentration).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trade_products-ingredient_id")
                            .from(TradeProducts::Table, TradeProducts::IngredientId)
                            .to(ActiveIngredients::Table, ActiveIngredients::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create ingredient_efficacy table (composite primary key)
        manager
            .create_table(
                Table::create()
                    .table(IngredientEfficacy::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IngredientEfficacy::IngredientId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IngredientEfficacy::PestId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IngredientEfficacy::EfficacyLevel)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(IngredientEfficacy::IngredientId)
                            .col(IngredientEfficacy::PestId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ingredient_efficacy-ingredient_id")
                            .from(
                                IngredientEfficacy::Table,
                                IngredientEfficacy::IngredientId,
                            )
                            .to(ActiveIngredients::Table, ActiveIngredients::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ingredient_efficacy-pest_id")
                            .from(IngredientEfficacy::Table, IngredientEfficacy::PestId)
                            .to(Pests::Table, Pests::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create usage_history table
        manager
            .create_table(
                Table::create()
                    .table(UsageHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UsageHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UsageHistory::UserId).integer().not_null())
                    .col(ColumnDef::new(UsageHistory::PlotName).string().not_null())
                    .col(ColumnDef::new(UsageHistory::PestId).integer().not_null())
                    .col(ColumnDef::new(UsageHistory::GroupId).string().not_null())
                    .col(
                        ColumnDef::new(UsageHistory::IngredientId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UsageHistory::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UsageHistory::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-usage_history-user_id")
                            .from(UsageHistory::Table, UsageHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-usage_history-pest_id")
                            .from(UsageHistory::Table, UsageHistory::PestId)
                            .to(Pests::Table, Pests::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-usage_history-group_id")
                            .from(UsageHistory::Table, UsageHistory::GroupId)
                            .to(IracGroups::Table, IracGroups::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-usage_history-ingredient_id")
                            .from(UsageHistory::Table, UsageHistory::IngredientId)
                            .to(ActiveIngredients::Table, ActiveIngredients::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-usage_history-product_id")
                            .from(UsageHistory::Table, UsageHistory::ProductId)
                            .to(TradeProducts::Table, TradeProducts::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes for the rotation window query and catalog lookups
        manager
            .create_index(
                Index::create()
                    .name("idx-usage_history-window")
                    .table(UsageHistory::Table)
                    .col(UsageHistory::UserId)
                    .col(UsageHistory::PlotName)
                    .col(UsageHistory::PestId)
                    .col(UsageHistory::AppliedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ingredient_efficacy-pest_id")
                    .table(IngredientEfficacy::Table)
                    .col(IngredientEfficacy::PestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-active_ingredients-group_id")
                    .table(ActiveIngredients::Table)
                    .col(ActiveIngredients::GroupId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes
        manager
            .drop_index(
                Index::drop()
                    .name("idx-active_ingredients-group_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-ingredient_efficacy-pest_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx-usage_history-window").to_owned())
            .await?;

        // Drop tables in dependency order
        manager
            .drop_table(Table::drop().table(UsageHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IngredientEfficacy::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TradeProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActiveIngredients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IracGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    Role,
}

#[derive(Iden)]
enum Pests {
    Table,
    Id,
    Name,
    PestType,
    Description,
}

#[derive(Iden)]
enum IracGroups {
    Table,
    Id,
    Name,
    MoaSummary,
}

#[derive(Iden)]
enum ActiveIngredients {
    Table,
    Id,
    Name,
    GroupId,
    ActionType,
}

#[derive(Iden)]
enum TradeProducts {
    Table,
    Id,
    Name,
    IngredientId,
    Formulation,
    Concentration,
}

#[derive(Iden)]
enum IngredientEfficacy {
    Table,
    IngredientId,
    PestId,
    EfficacyLevel,
}

#[derive(Iden)]
enum UsageHistory {
    Table,
    Id,
    UserId,
    PlotName,
    PestId,
    GroupId,
    IngredientId,
    ProductId,
    AppliedAt,
}
