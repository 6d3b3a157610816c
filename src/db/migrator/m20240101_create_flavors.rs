use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flavors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Flavors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Flavors::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Flavors::IsFavorite)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Flavors::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Flavors::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Listing is always newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_flavors_created_at")
                    .table(Flavors::Table)
                    .col(Flavors::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flavors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Flavors {
    Table,
    Id,
    Name,
    IsFavorite,
    CreatedAt,
    UpdatedAt,
}
