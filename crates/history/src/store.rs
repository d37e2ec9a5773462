//! Continue-watching list: a keyed list of partially watched titles, capped
//! at [`MAX_ENTRIES`], most-recent-first, unique per (tmdb_id, kind).

use reeldeck_core::MediaKind;
use sqlx::SqlitePool;

/// Most entries the list keeps; older ones are pruned on insert.
pub const MAX_ENTRIES: i64 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub tmdb_id: i64,
    pub kind: MediaKind,
    pub title: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub season: Option<i64>,
    pub episode: Option<i64>,
    /// Unix timestamp of the last playback start; the list sort key.
    pub updated_ts: i64,
}

/// Insert or refresh an entry, then prune everything past the newest
/// [`MAX_ENTRIES`] rows.
pub async fn upsert(pool: &SqlitePool, entry: &HistoryEntry) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO continue_watching \
         (tmdb_id, kind, title, poster_url, backdrop_url, season, episode, updated_ts) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT(tmdb_id, kind) DO UPDATE SET \
         title = excluded.title, poster_url = excluded.poster_url, \
         backdrop_url = excluded.backdrop_url, season = excluded.season, \
         episode = excluded.episode, updated_ts = excluded.updated_ts",
    )
    .bind(entry.tmdb_id)
    .bind(entry.kind.as_str())
    .bind(&entry.title)
    .bind(&entry.poster_url)
    .bind(&entry.backdrop_url)
    .bind(entry.season)
    .bind(entry.episode)
    .bind(entry.updated_ts)
    .execute(pool)
    .await?;

    sqlx::query(
        "DELETE FROM continue_watching WHERE (tmdb_id, kind) NOT IN \
         (SELECT tmdb_id, kind FROM continue_watching \
          ORDER BY updated_ts DESC LIMIT ?)",
    )
    .bind(MAX_ENTRIES)
    .execute(pool)
    .await?;

    Ok(())
}

/// Entries most-recent-first, at most [`MAX_ENTRIES`].
pub async fn list(pool: &SqlitePool) -> Result<Vec<HistoryEntry>, sqlx::Error> {
    let rows: Vec<(
        i64,
        String,
        String,
        Option<String>,
        Option<String>,
        Option<i64>,
        Option<i64>,
        i64,
    )> = sqlx::query_as(
        "SELECT tmdb_id, kind, title, poster_url, backdrop_url, season, episode, updated_ts \
         FROM continue_watching ORDER BY updated_ts DESC LIMIT ?",
    )
    .bind(MAX_ENTRIES)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|r| {
            Some(HistoryEntry {
                tmdb_id: r.0,
                kind: MediaKind::parse(&r.1)?,
                title: r.2,
                poster_url: r.3,
                backdrop_url: r.4,
                season: r.5,
                episode: r.6,
                updated_ts: r.7,
            })
        })
        .collect())
}

/// Delete one entry. Returns whether a row existed.
pub async fn remove(
    pool: &SqlitePool,
    tmdb_id: i64,
    kind: MediaKind,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM continue_watching WHERE tmdb_id = ? AND kind = ?")
        .bind(tmdb_id)
        .bind(kind.as_str())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = crate::connect(":memory:").await.unwrap();
        crate::migrate::run(&pool).await.unwrap();
        pool
    }

    fn entry(id: i64, kind: MediaKind, ts: i64) -> HistoryEntry {
        HistoryEntry {
            tmdb_id: id,
            kind,
            title: format!("Title {id}"),
            poster_url: Some(format!("https://image.tmdb.org/t/p/w500/{id}.jpg")),
            backdrop_url: None,
            season: kind.is_episodic().then_some(1),
            episode: kind.is_episodic().then_some(1),
            updated_ts: ts,
        }
    }

    #[tokio::test]
    async fn upsert_and_list_round_trip() {
        let pool = test_pool().await;
        upsert(&pool, &entry(603, MediaKind::Movie, 100)).await.unwrap();

        let entries = list(&pool).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tmdb_id, 603);
        assert_eq!(entries[0].kind, MediaKind::Movie);
        assert_eq!(entries[0].title, "Title 603");
        assert_eq!(entries[0].season, None);
    }

    #[tokio::test]
    async fn list_is_most_recent_first() {
        let pool = test_pool().await;
        upsert(&pool, &entry(1, MediaKind::Movie, 100)).await.unwrap();
        upsert(&pool, &entry(2, MediaKind::Movie, 300)).await.unwrap();
        upsert(&pool, &entry(3, MediaKind::Movie, 200)).await.unwrap();

        let ids: Vec<i64> = list(&pool).await.unwrap().iter().map(|e| e.tmdb_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn same_id_and_kind_replaces_instead_of_duplicating() {
        let pool = test_pool().await;
        upsert(&pool, &entry(42, MediaKind::Tv, 100)).await.unwrap();

        let mut resumed = entry(42, MediaKind::Tv, 500);
        resumed.season = Some(2);
        resumed.episode = Some(7);
        upsert(&pool, &resumed).await.unwrap();

        let entries = list(&pool).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].season, Some(2));
        assert_eq!(entries[0].episode, Some(7));
        assert_eq!(entries[0].updated_ts, 500);
    }

    #[tokio::test]
    async fn same_id_different_kind_coexist() {
        let pool = test_pool().await;
        upsert(&pool, &entry(42, MediaKind::Movie, 100)).await.unwrap();
        upsert(&pool, &entry(42, MediaKind::Anime, 200)).await.unwrap();

        let entries = list(&pool).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn list_is_capped_at_max_entries() {
        let pool = test_pool().await;
        for i in 0..20 {
            upsert(&pool, &entry(i, MediaKind::Movie, 1000 + i)).await.unwrap();
        }

        let entries = list(&pool).await.unwrap();
        assert_eq!(entries.len() as i64, MAX_ENTRIES);
        // The newest survive, oldest were pruned.
        assert_eq!(entries[0].tmdb_id, 19);
        assert_eq!(entries.last().unwrap().tmdb_id, 8);
    }

    #[tokio::test]
    async fn remove_reports_whether_a_row_existed() {
        let pool = test_pool().await;
        upsert(&pool, &entry(7, MediaKind::Movie, 100)).await.unwrap();

        assert!(remove(&pool, 7, MediaKind::Movie).await.unwrap());
        assert!(!remove(&pool, 7, MediaKind::Movie).await.unwrap());
        assert!(list(&pool).await.unwrap().is_empty());
    }
}
