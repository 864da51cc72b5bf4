//! Event repository implementation

use chrono::{Local, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::event::{CreateEventRequest, Event, StatusFilter, TimeFilter, UpdateEventRequest};
use crate::utils::errors::EventDeskError;
use crate::utils::helpers::escape_like_pattern;

const EVENT_COLUMNS: &str = "id, title, description, location, start_time, end_time, organizer, \
                             max_participants, current_participants";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, location, start_time, end_time, organizer, max_participants, current_participants)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)
            RETURNING id, title, description, location, start_time, end_time, organizer, max_participants, current_participants
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.location)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(&request.organizer)
        .bind(request.max_participants)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event fields, leaving unset fields unchanged
    ///
    /// `current_participants` is deliberately not updatable here; only the
    /// registration engine writes it.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                location = COALESCE(?4, location),
                start_time = COALESCE(?5, start_time),
                end_time = COALESCE(?6, end_time),
                max_participants = COALESCE(?7, max_participants)
            WHERE id = ?1
            RETURNING id, title, description, location, start_time, end_time, organizer, max_participants, current_participants
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.location)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.max_participants)
        .fetch_optional(&self.pool)
        .await?;

        event.ok_or(EventDeskError::EventNotFound { event_id: id })
    }

    /// Delete event
    ///
    /// Registration rows cascade via the foreign key, so no orphans remain.
    pub async fn delete(&self, id: i64) -> Result<(), EventDeskError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(EventDeskError::EventNotFound { event_id: id });
        }

        Ok(())
    }

    /// List all events sorted ascending by start time
    pub async fn list_all(&self) -> Result<Vec<Event>, EventDeskError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_time ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Search events by keyword, time window, and status.
    ///
    /// The three filter axes compile to independent predicate fragments that
    /// are ANDed together, so any combination works without per-combination
    /// branches. Results are always sorted ascending by start time.
    pub async fn search(
        &self,
        keyword: &str,
        time: TimeFilter,
        status: StatusFilter,
    ) -> Result<Vec<Event>, EventDeskError> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE 1=1"
        ));

        if !keyword.is_empty() {
            let pattern = format!("%{}%", escape_like_pattern(keyword));
            query.push(" AND (title LIKE ");
            query.push_bind(pattern.clone());
            query.push(" ESCAPE '\\' OR description LIKE ");
            query.push_bind(pattern.clone());
            query.push(" ESCAPE '\\' OR location LIKE ");
            query.push_bind(pattern);
            query.push(" ESCAPE '\\')");
        }

        if let Some((window_start, window_end)) = time.window(Local::now()) {
            query.push(" AND start_time >= ");
            query.push_bind(window_start);
            query.push(" AND start_time < ");
            query.push_bind(window_end);
        }

        let now = Utc::now();
        match status {
            StatusFilter::All => {}
            StatusFilter::NotStarted => {
                query.push(" AND start_time > ");
                query.push_bind(now);
            }
            StatusFilter::Ongoing => {
                query.push(" AND start_time <= ");
                query.push_bind(now);
                query.push(" AND end_time >= ");
                query.push_bind(now);
            }
            StatusFilter::Ended => {
                query.push(" AND end_time < ");
                query.push_bind(now);
            }
            StatusFilter::Full => {
                query.push(" AND current_participants >= max_participants");
            }
        }

        query.push(" ORDER BY start_time ASC, id ASC");

        let events = query
            .build_query_as::<Event>()
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    /// Get events a user is registered for, sorted ascending by start time
    pub async fn get_user_registered_events(
        &self,
        user_id: i64,
    ) -> Result<Vec<Event>, EventDeskError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.id, e.title, e.description, e.location, e.start_time, e.end_time,
                   e.organizer, e.max_participants, e.current_participants
            FROM events e
            INNER JOIN registrations r ON e.id = r.event_id
            WHERE r.user_id = ?1
            ORDER BY e.start_time ASC, e.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, EventDeskError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
