use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const CONNECT_ATTEMPTS: u32 = 5;

/// Opens the pool and applies `schema.sql`.
///
/// In-memory databases live per connection, so callers using
/// `sqlite::memory:` must pass `max_connections = 1`.
pub async fn init_db(db_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    info!("🔌 Connecting to SQLite at {}...", db_url);

    let pool = connect_with_retry(db_url, max_connections).await?;
    apply_schema(&pool, include_str!("../schema.sql")).await?;

    info!("✅ Database connected and schema applied.");
    Ok(pool)
}

async fn connect_with_retry(db_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
    let delay = Duration::from_secs(1);

    let mut attempt = 1;
    loop {
        match SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    "⚠️  DB Connection attempt {}/{} failed: {}. Retrying...",
                    attempt, CONNECT_ATTEMPTS, e
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn apply_schema(pool: &SqlitePool, schema: &str) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for (i, sql) in split_sql(schema).iter().enumerate() {
        if let Err(e) = sqlx::query(sql).execute(&mut *tx).await {
            tracing::error!("🚨 Schema Error in statement #{}:\n{}", i + 1, sql);
            return Err(e);
        }
    }

    tx.commit().await?;
    Ok(())
}

/// Splits a schema file into statements on line-final semicolons.
/// `--` comments are kept in the statement text but never end one.
fn split_sql(raw: &str) -> Vec<String> {
    let mut cmds = Vec::new();
    let mut current = String::new();

    for line in raw.lines() {
        let code = line.find("--").map_or(line, |idx| &line[..idx]).trim();

        current.push_str(line);
        current.push('\n');

        if code.ends_with(';') {
            cmds.push(current.trim().to_string());
            current.clear();
        }
    }

    if !current.trim().is_empty() && current.lines().any(|l| !l.trim().starts_with("--")) {
        cmds.push(current.trim().to_string());
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_statement_ends_only() {
        let sql = "-- header; not a split\nCREATE TABLE a (x INTEGER);\n\nCREATE INDEX i\n  ON a (x); -- trailing\n-- footer only\n";
        let parts = split_sql(sql);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].starts_with("-- header"));
        assert!(parts[0].ends_with("(x INTEGER);"));
        assert!(parts[1].contains("ON a (x);"));
    }

    #[test]
    fn bundled_schema_has_every_table() {
        let parts = split_sql(include_str!("../schema.sql"));
        assert!(parts.iter().any(|p| p.contains("CREATE TABLE IF NOT EXISTS rankings")));
        assert!(parts.iter().any(|p| p.contains("CREATE TABLE IF NOT EXISTS score_log")));
    }

    #[tokio::test]
    async fn schema_applies_twice() {
        let pool = init_db("sqlite::memory:", 1).await.unwrap();
        apply_schema(&pool, include_str!("../schema.sql")).await.unwrap();
    }
}
