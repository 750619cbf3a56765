use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub(crate) enum DrinkCategories {
    Table,
    Id,
    Name,
    Slug,
    ImageUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Drinks {
    Table,
    Id,
    CategoryId,
    Name,
    Price,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DrinkCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrinkCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DrinkCategories::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(DrinkCategories::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DrinkCategories::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(DrinkCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Drinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drinks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Drinks::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Drinks::Name).string_len(255).not_null())
                    // 价格为整数货币单位 (VND)，不允许负数
                    .col(
                        ColumnDef::new(Drinks::Price)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Drinks::Price).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Drinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drinks_category")
                            .from(Drinks::Table, Drinks::CategoryId)
                            .to(DrinkCategories::Table, DrinkCategories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_drinks_category")
                    .table(Drinks::Table)
                    .col(Drinks::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Drinks::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(DrinkCategories::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
