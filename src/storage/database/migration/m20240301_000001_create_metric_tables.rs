use super::METRICS_SCHEMA;
use sea_orm::{ConnectionTrait, DatabaseBackend};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        if backend == DatabaseBackend::Postgres {
            conn.execute_unprepared(&format!("CREATE SCHEMA IF NOT EXISTS {}", METRICS_SCHEMA))
                .await?;
            conn.execute_unprepared(&format!("SET LOCAL search_path TO {}", METRICS_SCHEMA))
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Counters::Table)
                    .if_not_exists()
                    .col(id_column(backend, Counters::Id))
                    .col(ColumnDef::new(Counters::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Counters::Delta).big_integer().not_null())
                    .col(timestamp_column(Counters::CreatedAt))
                    .col(timestamp_column(Counters::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("metric_idx")
                    .table(Counters::Table)
                    .col(Counters::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Gauges::Table)
                    .if_not_exists()
                    .col(id_column(backend, Gauges::Id))
                    .col(ColumnDef::new(Gauges::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Gauges::Value).double().not_null())
                    .col(timestamp_column(Gauges::CreatedAt))
                    .col(timestamp_column(Gauges::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("gauge_idx")
                    .table(Gauges::Table)
                    .col(Gauges::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        match backend {
            DatabaseBackend::Postgres => create_postgres_triggers(manager).await,
            DatabaseBackend::Sqlite => create_sqlite_triggers(manager).await,
            other => Err(DbErr::Migration(format!(
                "{:?} is not a supported metrics backend",
                other
            ))),
        }
    }
}

/// BIGSERIAL on PostgreSQL; SQLite only auto-increments `INTEGER PRIMARY KEY`
fn id_column<T: IntoIden>(backend: DatabaseBackend, name: T) -> ColumnDef {
    let mut column = ColumnDef::new(name);
    match backend {
        DatabaseBackend::Sqlite => column.integer(),
        _ => column.big_integer(),
    };
    column.not_null().auto_increment().primary_key();
    column
}

fn timestamp_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .default(Expr::current_timestamp())
        .to_owned()
}

async fn create_postgres_triggers(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let conn = manager.get_connection();

    conn.execute_unprepared(&format!(
        r#"
        CREATE OR REPLACE FUNCTION {schema}.updated_at()
        RETURNS TRIGGER AS $$
        BEGIN
            NEW.updated_at = now();
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql
        "#,
        schema = METRICS_SCHEMA
    ))
    .await?;

    // CREATE TRIGGER has no IF NOT EXISTS; an existing trigger is not an error.
    for table in ["counters", "gauges"] {
        conn.execute_unprepared(&format!(
            r#"
            DO $$BEGIN
                CREATE TRIGGER {table}_updated_at
                    BEFORE UPDATE ON {schema}.{table}
                    FOR EACH ROW
                    EXECUTE PROCEDURE {schema}.updated_at();
            EXCEPTION
                WHEN duplicate_object THEN NULL;
            END;$$
            "#,
            table = table,
            schema = METRICS_SCHEMA
        ))
        .await?;
    }

    Ok(())
}

async fn create_sqlite_triggers(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let conn = manager.get_connection();

    for (table, column) in [("counters", "delta"), ("gauges", "value")] {
        conn.execute_unprepared(&format!(
            r#"
            CREATE TRIGGER IF NOT EXISTS {table}_updated_at
                AFTER UPDATE OF {column} ON {table}
                FOR EACH ROW
            BEGIN
                UPDATE {table} SET updated_at = CURRENT_TIMESTAMP WHERE id = NEW.id;
            END
            "#,
            table = table,
            column = column
        ))
        .await?;
    }

    Ok(())
}

#[derive(DeriveIden)]
enum Counters {
    Table,
    Id,
    Name,
    Delta,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Gauges {
    Table,
    Id,
    Name,
    Value,
    CreatedAt,
    UpdatedAt,
}
