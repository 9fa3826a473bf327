//! Letter persistence — CRUD over cover letter records and their bounded
//! generation history. Every query is scoped to the owning user; a row owned
//! by someone else reads as not-found.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::strip_emphasis_markers;
use crate::models::block::ContentBlock;
use crate::models::letter::{CoverLetterRow, GenerationRow};
use crate::models::target::TargetInfo;

/// A letter keeps at most this many generation snapshots; older ones are
/// pruned on save.
pub const GENERATION_HISTORY_CAP: usize = 10;

/// Fields shared by create and update.
pub struct SaveLetterParams<'a> {
    pub title: &'a str,
    pub target_info: &'a TargetInfo,
    pub blocks: &'a [ContentBlock],
    /// When present, a generation snapshot is appended alongside the save.
    pub markdown: Option<&'a str>,
    /// Stripped from `markdown` when absent.
    pub raw_text: Option<&'a str>,
    pub latex: Option<&'a str>,
}

pub async fn create_letter(
    pool: &PgPool,
    user_id: Uuid,
    params: SaveLetterParams<'_>,
) -> Result<CoverLetterRow, AppError> {
    let target_info = serde_json::to_value(params.target_info)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize target info: {e}")))?;
    let blocks = serde_json::to_value(params.blocks)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize blocks: {e}")))?;

    let letter = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters (id, user_id, title, target_info, blocks, latex)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(params.title)
    .bind(&target_info)
    .bind(&blocks)
    .bind(params.latex)
    .fetch_one(pool)
    .await?;

    if let Some(markdown) = params.markdown {
        append_generation(pool, letter.id, markdown, params.raw_text, params.target_info).await?;
    }

    info!("Created letter {} for user {user_id}", letter.id);
    Ok(letter)
}

pub async fn update_letter(
    pool: &PgPool,
    user_id: Uuid,
    letter_id: Uuid,
    params: SaveLetterParams<'_>,
) -> Result<CoverLetterRow, AppError> {
    let target_info = serde_json::to_value(params.target_info)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize target info: {e}")))?;
    let blocks = serde_json::to_value(params.blocks)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize blocks: {e}")))?;

    let letter = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        UPDATE cover_letters
        SET title = $1, target_info = $2, blocks = $3, latex = $4, updated_at = now()
        WHERE id = $5 AND user_id = $6
        RETURNING *
        "#,
    )
    .bind(params.title)
    .bind(&target_info)
    .bind(&blocks)
    .bind(params.latex)
    .bind(letter_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Letter {letter_id} not found")))?;

    if let Some(markdown) = params.markdown {
        append_generation(pool, letter.id, markdown, params.raw_text, params.target_info).await?;
        let pruned = prune_generations(pool, letter.id).await?;
        if pruned > 0 {
            info!("Pruned {pruned} old generations from letter {letter_id}");
        }
    }

    Ok(letter)
}

/// Inserts one generation snapshot, denormalizing the target company/role at
/// save time.
async fn append_generation(
    pool: &PgPool,
    letter_id: Uuid,
    markdown: &str,
    raw_text: Option<&str>,
    target: &TargetInfo,
) -> Result<GenerationRow, AppError> {
    let raw_text = match raw_text {
        Some(text) => text.to_string(),
        None => strip_emphasis_markers(markdown),
    };

    Ok(sqlx::query_as::<_, GenerationRow>(
        r#"
        INSERT INTO letter_generations
            (id, letter_id, markdown, raw_text, target_company, target_role)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(letter_id)
    .bind(markdown)
    .bind(&raw_text)
    .bind(&target.company_name)
    .bind(&target.role_title)
    .fetch_one(pool)
    .await?)
}

/// Deletes every snapshot beyond the history cap. Victim selection is pure
/// (`prune_victims`) so the cap rule is testable without a database.
async fn prune_generations(pool: &PgPool, letter_id: Uuid) -> Result<u64, AppError> {
    let entries: Vec<(Uuid, DateTime<Utc>)> = sqlx::query_as(
        "SELECT id, created_at FROM letter_generations WHERE letter_id = $1",
    )
    .bind(letter_id)
    .fetch_all(pool)
    .await?;

    let victims = prune_victims(entries, GENERATION_HISTORY_CAP);
    if victims.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query("DELETE FROM letter_generations WHERE id = ANY($1)")
        .bind(&victims)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Returns the ids that fall outside the `cap` most recent snapshots.
///
/// Recency is `(created_at, id)` descending — id is the deterministic
/// tiebreak for snapshots created in the same instant.
pub fn prune_victims(mut entries: Vec<(Uuid, DateTime<Utc>)>, cap: usize) -> Vec<Uuid> {
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    entries.into_iter().skip(cap).map(|(id, _)| id).collect()
}

/// Fetches one letter plus its generation history, newest first.
pub async fn get_letter(
    pool: &PgPool,
    user_id: Uuid,
    letter_id: Uuid,
) -> Result<(CoverLetterRow, Vec<GenerationRow>), AppError> {
    let letter = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE id = $1 AND user_id = $2",
    )
    .bind(letter_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Letter {letter_id} not found")))?;

    let generations = sqlx::query_as::<_, GenerationRow>(
        r#"
        SELECT * FROM letter_generations
        WHERE letter_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(letter_id)
    .fetch_all(pool)
    .await?;

    Ok((letter, generations))
}

/// Lists the caller's letters, most recently updated first.
pub async fn list_letters(pool: &PgPool, user_id: Uuid) -> Result<Vec<CoverLetterRow>, AppError> {
    Ok(sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Deletes a letter; generations cascade at the schema level.
pub async fn delete_letter(
    pool: &PgPool,
    user_id: Uuid,
    letter_id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(letter_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Letter {letter_id} not found")));
    }

    info!("Deleted letter {letter_id} for user {user_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    #[test]
    fn test_no_victims_at_or_below_the_cap() {
        let entries: Vec<_> = (0..10).map(|i| (Uuid::new_v4(), at(i))).collect();
        assert!(prune_victims(entries, GENERATION_HISTORY_CAP).is_empty());
    }

    #[test]
    fn test_oldest_entries_beyond_the_cap_are_victims() {
        let oldest = (Uuid::new_v4(), at(0));
        let second_oldest = (Uuid::new_v4(), at(1));
        let mut entries = vec![oldest, second_oldest];
        entries.extend((2..12).map(|i| (Uuid::new_v4(), at(i))));

        let victims = prune_victims(entries, GENERATION_HISTORY_CAP);
        assert_eq!(victims.len(), 2);
        assert!(victims.contains(&oldest.0));
        assert!(victims.contains(&second_oldest.0));
    }

    #[test]
    fn test_exactly_the_cap_newest_survive() {
        let entries: Vec<_> = (0..25).map(|i| (Uuid::new_v4(), at(i))).collect();
        let survivors: Vec<Uuid> = entries.iter().rev().take(10).map(|(id, _)| *id).collect();

        let victims = prune_victims(entries, GENERATION_HISTORY_CAP);
        assert_eq!(victims.len(), 15);
        for id in survivors {
            assert!(!victims.contains(&id));
        }
    }

    #[test]
    fn test_equal_timestamps_break_ties_by_id() {
        // Eleven snapshots in the same instant: exactly one victim, and it
        // must be the smallest id, deterministically.
        let mut entries: Vec<_> = (0..11).map(|_| (Uuid::new_v4(), at(100))).collect();
        let smallest = entries.iter().map(|(id, _)| *id).min().unwrap();

        let victims_a = prune_victims(entries.clone(), GENERATION_HISTORY_CAP);
        entries.reverse();
        let victims_b = prune_victims(entries, GENERATION_HISTORY_CAP);

        assert_eq!(victims_a, vec![smallest]);
        assert_eq!(victims_a, victims_b);
    }
}
