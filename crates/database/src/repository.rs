use crate::DbError;
use core_types::{Candidate, CandidateUpdate, NewCandidate};
use sqlx::postgres::PgPool;

/// The set of columns every candidate query selects, in `Candidate` field order.
const CANDIDATE_COLUMNS: &str = "id, name, age, gender, email, phone_number";

/// The `CandidateRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct CandidateRepository {
    pool: PgPool,
}

impl CandidateRepository {
    /// Creates a new `CandidateRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches a page of candidates in primary-key (insertion) order.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Candidate>, DbError> {
        let sql = format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY id LIMIT $1 OFFSET $2"
        );
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    /// Fetches a single candidate by id.
    pub async fn get(&self, id: i64) -> Result<Candidate, DbError> {
        let sql = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1");
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        candidate.ok_or(DbError::NotFound)
    }

    /// Inserts a new candidate and returns the stored row, id included.
    pub async fn insert(&self, new: &NewCandidate) -> Result<Candidate, DbError> {
        let sql = format!(
            r#"
            INSERT INTO candidates (name, age, gender, email, phone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Candidate>(&sql)
            .bind(&new.name)
            .bind(new.age)
            .bind(new.gender.as_code())
            .bind(&new.email)
            .bind(&new.phone_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &new.email))
    }

    /// Replaces every mutable field of an existing candidate.
    pub async fn update(&self, id: i64, new: &NewCandidate) -> Result<Candidate, DbError> {
        let sql = format!(
            r#"
            UPDATE candidates
            SET name = $2, age = $3, gender = $4, email = $5, phone_number = $6
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .bind(&new.name)
            .bind(new.age)
            .bind(new.gender.as_code())
            .bind(&new.email)
            .bind(&new.phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &new.email))?;
        candidate.ok_or(DbError::NotFound)
    }

    /// Applies a partial update; columns absent from the payload keep their
    /// stored values via COALESCE.
    pub async fn patch(&self, id: i64, update: &CandidateUpdate) -> Result<Candidate, DbError> {
        let sql = format!(
            r#"
            UPDATE candidates
            SET name         = COALESCE($2, name),
                age          = COALESCE($3, age),
                gender       = COALESCE($4, gender),
                email        = COALESCE($5, email),
                phone_number = COALESCE($6, phone_number)
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.age)
            .bind(update.gender.map(|g| g.as_code()))
            .bind(update.email.as_deref())
            .bind(update.phone_number.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, update.email.as_deref().unwrap_or_default()))?;
        candidate.ok_or(DbError::NotFound)
    }

    /// Deletes a candidate by id. The id sequence never rewinds, so a deleted
    /// id is never handed out again.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    /// Removes every candidate. Used by the test-data generator before seeding.
    pub async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM candidates")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Inserts a batch of candidates inside a single transaction.
    pub async fn bulk_insert(&self, records: &[NewCandidate]) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;
        for new in records {
            sqlx::query(
                r#"
                INSERT INTO candidates (name, age, gender, email, phone_number)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(&new.name)
            .bind(new.age)
            .bind(new.gender.as_code())
            .bind(&new.email)
            .bind(&new.phone_number)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, &new.email))?;
        }
        tx.commit().await?;
        Ok(records.len() as u64)
    }

    /// Fetches every candidate whose name contains at least one of the given
    /// words, case-insensitively, in primary-key (insertion) order. Scoring
    /// and ranking happen in the `relevancy` crate, not in SQL.
    pub async fn search_by_name(&self, words: &[String]) -> Result<Vec<Candidate>, DbError> {
        let patterns: Vec<String> = words.iter().map(|w| like_pattern(w)).collect();
        tracing::debug!(words = words.len(), "Filtering candidates by name substrings.");
        let sql = format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE name ILIKE ANY($1) ORDER BY id"
        );
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .bind(&patterns)
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }
}

/// Builds a `%word%` ILIKE pattern, escaping the characters Postgres treats
/// as wildcards so a query word matches literally.
fn like_pattern(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len() + 2);
    escaped.push('%');
    for ch in word.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Translates a unique-constraint violation on `email` into the dedicated
/// `DuplicateEmail` error; everything else stays a plain query error.
fn map_write_error(err: sqlx::Error, email: &str) -> DbError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DbError::DuplicateEmail(email.to_string())
        }
        _ => DbError::Query(err),
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_wraps_word_in_wildcards() {
        assert_eq!(like_pattern("ajay"), "%ajay%");
    }

    #[test]
    fn like_pattern_escapes_sql_wildcards() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
