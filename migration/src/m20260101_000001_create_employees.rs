use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees { Table, Id, FirstName, LastName, Email, Department, Salary }

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Employees::Table)
                .if_not_exists()
                .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Employees::FirstName).string_len(50).not_null())
                .col(ColumnDef::new(Employees::LastName).string_len(50).not_null())
                .col(ColumnDef::new(Employees::Email).string_len(320).not_null())
                .col(ColumnDef::new(Employees::Department).string_len(128).not_null())
                .col(ColumnDef::new(Employees::Salary).double().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create().name("idx_employees_email").table(Employees::Table).col(Employees::Email).to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employees::Table).to_owned()).await?;
        Ok(())
    }
}
