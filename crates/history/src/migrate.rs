use sqlx::SqlitePool;
use tracing::info;

const MIGRATIONS: &[(&str, &str)] = &[(
    "001_continue_watching",
    include_str!("../migrations/001_continue_watching.sql"),
)];

/// Forward-only migrations, tracked by name in a `_migrations` table.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_ts INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    for (name, sql) in MIGRATIONS {
        if is_applied(pool, name).await? {
            continue;
        }
        apply(pool, name, sql).await?;
        info!(migration = name, "migration applied");
    }

    Ok(())
}

async fn is_applied(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

async fn apply(pool: &SqlitePool, name: &str, sql: &str) -> Result<(), sqlx::Error> {
    // Migration files may hold several semicolon-separated statements.
    for statement in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }

    sqlx::query("INSERT INTO _migrations (name, applied_ts) VALUES (?, ?)")
        .bind(name)
        .bind(chrono::Utc::now().timestamp())
        .execute(pool)
        .await?;
    Ok(())
}
