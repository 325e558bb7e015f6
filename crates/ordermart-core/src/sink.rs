use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;
use tracing::{error, info};

use crate::db::{self, DbPool};
use crate::error::Result;
use crate::tables::{SqlValue, TableRow, TableSet};

/// Schema the warehouse tables live in unless the caller overrides it.
pub const DEFAULT_SCHEMA: &str = "etl_orders";

/// Explicit handle on the target warehouse. Callers construct it and close
/// it; no connection state lives at module scope.
pub struct PgSink {
    pool: DbPool,
    schema: String,
}

impl PgSink {
    pub async fn connect(database_url: &str, schema: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pool: db::connect(database_url).await?,
            schema: schema.into(),
        })
    }

    /// Cheap connectivity check.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert one table's rows inside a single transaction: either every row
    /// lands or none of them do. Returns the number of rows written.
    pub async fn insert<R: TableRow>(&self, rows: &[R]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let statement = insert_statement(&self.schema, R::table(), R::columns());
        let mut tx = self.pool.begin().await?;
        for row in rows {
            let mut query = sqlx::query(&statement);
            for value in row.values() {
                query = bind_value(query, value);
            }
            query.execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(rows.len() as u64)
    }

    /// Close the pool, waiting for in-flight connections to wind down.
    pub async fn close(self) {
        self.pool.close().await;
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableLoad {
    pub table: &'static str,
    pub rows: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadSummary {
    pub tables: Vec<TableLoad>,
}

impl LoadSummary {
    pub fn loaded_rows(&self) -> u64 {
        self.tables.iter().map(|table| table.rows).sum()
    }

    pub fn failures(&self) -> usize {
        self.tables
            .iter()
            .filter(|table| table.error.is_some())
            .count()
    }
}

/// Load every table, foreign-key targets before the tables that reference
/// them. A failed insert is logged and recorded in the summary and the
/// remaining tables are still attempted; rows already committed by earlier
/// calls stay put.
pub async fn load_tables(sink: &PgSink, tables: &TableSet) -> LoadSummary {
    let mut summary = LoadSummary::default();
    load_one(sink, &tables.nation, &mut summary).await;
    load_one(sink, &tables.customer_address, &mut summary).await;
    load_one(sink, &tables.customer, &mut summary).await;
    load_one(sink, &tables.product, &mut summary).await;
    load_one(sink, &tables.supplier, &mut summary).await;
    load_one(sink, &tables.time, &mut summary).await;
    load_one(sink, &tables.orders, &mut summary).await;
    load_one(sink, &tables.order_detail, &mut summary).await;
    summary
}

async fn load_one<R: TableRow>(sink: &PgSink, rows: &[R], summary: &mut LoadSummary) {
    match sink.insert(rows).await {
        Ok(count) => {
            info!(table = R::table(), rows = count, "table loaded");
            summary.tables.push(TableLoad {
                table: R::table(),
                rows: count,
                error: None,
            });
        }
        Err(err) => {
            error!(table = R::table(), error = %err, "table load failed");
            summary.tables.push(TableLoad {
                table: R::table(),
                rows: 0,
                error: Some(err.to_string()),
            });
        }
    }
}

fn insert_statement(schema: &str, table: &str, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|position| format!("${position}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {schema}.{table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders
    )
}

fn bind_value(
    query: Query<'_, Postgres, PgArguments>,
    value: SqlValue,
) -> Query<'_, Postgres, PgArguments> {
    match value {
        SqlValue::BigInt(v) => query.bind(v),
        SqlValue::NullableBigInt(v) => query.bind(v),
        SqlValue::Double(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Bool(v) => query.bind(v),
        SqlValue::Date(v) => query.bind(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_statements_qualify_the_table_and_number_every_placeholder() {
        let statement = insert_statement("etl_orders", "nation", &["id", "name"]);
        assert_eq!(
            statement,
            "INSERT INTO etl_orders.nation (id, name) VALUES ($1, $2)"
        );
    }
}
