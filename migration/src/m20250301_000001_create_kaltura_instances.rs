//! 创建 kaltura_instances 表

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KalturaInstances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(KalturaInstances::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(KalturaInstances::PartnerId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(KalturaInstances::AdminSecret)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(KalturaInstances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KalturaInstances::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum KalturaInstances {
    Table,
    Id,
    PartnerId,
    AdminSecret,
    CreatedAt,
}
