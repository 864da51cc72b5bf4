//! Registration repository: the capacity-enforcing registration engine
//!
//! This repository is the only writer of the `registrations` table and of
//! `events.current_participants`; the two are always updated together inside
//! one transaction so the participant counter never drifts from the actual
//! row count.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::registration::Registration;
use crate::utils::errors::EventDeskError;

#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: SqlitePool,
}

impl RegistrationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a user for an event, claiming one seat of its capacity.
    ///
    /// Runs in a single transaction: the registration row is inserted, then
    /// the counter is incremented with a guard re-checking capacity at write
    /// time. Two joins racing past the same capacity read therefore cannot
    /// both commit; the loser's guarded update matches zero rows and its
    /// insert rolls back with the transaction.
    pub async fn join(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> Result<Registration, EventDeskError> {
        let mut tx = self.pool.begin().await?;

        let existing: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = ?1 AND user_id = ?2",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if existing.0 > 0 {
            return Err(EventDeskError::AlreadyRegistered { event_id, user_id });
        }

        let capacity: Option<(i64, i64)> = sqlx::query_as(
            "SELECT current_participants, max_participants FROM events WHERE id = ?1",
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (current, max) = capacity.ok_or(EventDeskError::EventNotFound { event_id })?;
        if current >= max {
            return Err(EventDeskError::EventFull { event_id });
        }

        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (event_id, user_id, registered_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, event_id, user_id, registered_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                EventDeskError::AlreadyRegistered { event_id, user_id }
            }
            _ => EventDeskError::Database(e),
        })?;

        let updated = sqlx::query(
            r#"
            UPDATE events
            SET current_participants = current_participants + 1
            WHERE id = ?1 AND current_participants < max_participants
            "#,
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // A concurrent join took the last seat between our read and this
            // write; dropping the transaction rolls the insert back.
            return Err(EventDeskError::EventFull { event_id });
        }

        tx.commit().await?;
        Ok(registration)
    }

    /// Cancel a user's registration, releasing the seat.
    ///
    /// The decrement is floored at zero as a clamp against counter drift.
    pub async fn cancel(&self, event_id: i64, user_id: i64) -> Result<(), EventDeskError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM registrations WHERE event_id = ?1 AND user_id = ?2")
            .bind(event_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(EventDeskError::RegistrationNotFound { event_id, user_id });
        }

        sqlx::query(
            r#"
            UPDATE events
            SET current_participants = MAX(current_participants - 1, 0)
            WHERE id = ?1
            "#,
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Check if a user is registered for an event
    pub async fn is_registered(&self, user_id: i64, event_id: i64) -> Result<bool, EventDeskError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = ?1 AND user_id = ?2",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Count registration rows for an event
    pub async fn count_for_event(&self, event_id: i64) -> Result<i64, EventDeskError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE event_id = ?1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
