use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::entity::{AuditLogs, Categories, Skus, Spus, Stocks};

/// Create a SeaORM connection.
pub async fn create_orm_conn(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);
    // Every pooled connection to an in-memory SQLite database is a fresh database.
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Creates any missing tables from the entity definitions, parents before children.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = vec![
        schema.create_table_from_entity(Categories),
        schema.create_table_from_entity(Spus),
        schema.create_table_from_entity(Skus),
        schema.create_table_from_entity(Stocks),
        schema.create_table_from_entity(AuditLogs),
    ];

    for table in tables.iter_mut() {
        conn.execute(backend.build(table.if_not_exists())).await?;
    }

    Ok(())
}
