//! Create `product` table.
//!
//! `picture` holds the saved path of an uploaded image and may be NULL.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string_len(Product::Name, 50).not_null())
                    .col(double(Product::Price).not_null())
                    // Explicitly nullable; both columns are optional on the wire
                    .col(ColumnDef::new(Product::Picture).string_len(200).null())
                    .col(ColumnDef::new(Product::Description).string_len(500).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Id, Name, Price, Picture, Description }
