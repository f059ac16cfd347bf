use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movies::FirstName).string().not_null())
                    .col(ColumnDef::new(Movies::LastName).string().not_null())
                    .col(ColumnDef::new(Movies::MovieName).string().not_null())
                    .col(ColumnDef::new(Movies::ActorName).string().not_null())
                    .col(ColumnDef::new(Movies::Comment).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Store::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Store::Title).string().not_null())
                    .col(ColumnDef::new(Store::Price).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TempCarts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TempCarts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TempCarts::UserName).string().not_null())
                    .col(ColumnDef::new(TempCarts::CartData).text().not_null())
                    .col(
                        ColumnDef::new(TempCarts::ExpirationTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups always filter by owner and live rows.
        manager
            .create_index(
                Index::create()
                    .name("idx_temp_carts_user_name_expiration_time")
                    .table(TempCarts::Table)
                    .col(TempCarts::UserName)
                    .col(TempCarts::ExpirationTime)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TowerSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TowerSessions::Id)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TowerSessions::Data).blob().not_null())
                    .col(
                        ColumnDef::new(TowerSessions::ExpiryDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TowerSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TempCarts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Store::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    FirstName,
    LastName,
    MovieName,
    ActorName,
    Comment,
}

#[derive(DeriveIden)]
enum Store {
    Table,
    Id,
    Title,
    Price,
}

#[derive(DeriveIden)]
enum TempCarts {
    Table,
    Id,
    UserName,
    CartData,
    ExpirationTime,
}

#[derive(DeriveIden)]
enum TowerSessions {
    Table,
    Id,
    Data,
    ExpiryDate,
}
