//! Database service layer
//!
//! High-level interface the presentation layer calls. Staff-gated mutations
//! take an explicit [`Session`] rather than reading ambient state, and every
//! operation returns typed results so callers can distinguish failure causes.

use tracing::error;

use crate::database::connection::DatabasePool;
use crate::database::repositories::{EventRepository, RegistrationRepository, UserRepository};
use crate::models::event::{
    CreateEventRequest, Event, StatusFilter, TimeFilter, UpdateEventRequest,
};
use crate::models::registration::Registration;
use crate::services::auth::Session;
use crate::utils::errors::EventDeskError;
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging::{log_event_action, log_operation_rejected};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub events: EventRepository,
    pub registrations: RegistrationRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool),
        }
    }

    /// Create a new event (staff only)
    ///
    /// The caller's username becomes the organizer.
    pub async fn create_event(
        &self,
        session: &Session,
        mut request: CreateEventRequest,
    ) -> Result<Event, EventDeskError> {
        session.require_staff()?;

        if request.title.trim().is_empty() {
            return Err(EventDeskError::InvalidInput(
                "Event title must not be empty".to_string(),
            ));
        }
        if request.end_time <= request.start_time {
            return Err(EventDeskError::InvalidInput(
                "Event end time must be after its start time".to_string(),
            ));
        }
        if request.max_participants <= 0 {
            return Err(EventDeskError::InvalidInput(
                "Max participants must be positive".to_string(),
            ));
        }

        request.organizer = session.username.clone();
        let event = self.events.create(request).await?;
        log_event_action(event.id, "create", Some(session.user_id), None);
        Ok(event)
    }

    /// Update an event (staff only), leaving unset fields unchanged
    pub async fn update_event(
        &self,
        session: &Session,
        event_id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event, EventDeskError> {
        session.require_staff()?;

        let existing = self.get_event(event_id).await?;
        let start = request.start_time.unwrap_or(existing.start_time);
        let end = request.end_time.unwrap_or(existing.end_time);
        if end <= start {
            return Err(EventDeskError::InvalidInput(
                "Event end time must be after its start time".to_string(),
            ));
        }
        if let Some(max) = request.max_participants {
            if max <= 0 {
                return Err(EventDeskError::InvalidInput(
                    "Max participants must be positive".to_string(),
                ));
            }
            if max < existing.current_participants {
                return Err(EventDeskError::InvalidInput(format!(
                    "Max participants {} is below the {} already registered",
                    max, existing.current_participants
                )));
            }
        }

        let event = self.events.update(event_id, request).await?;
        log_event_action(event_id, "update", Some(session.user_id), None);
        Ok(event)
    }

    /// Delete an event and all its registrations (staff only)
    pub async fn delete_event(
        &self,
        session: &Session,
        event_id: i64,
    ) -> Result<(), EventDeskError> {
        session.require_staff()?;

        self.events.delete(event_id).await?;
        log_event_action(event_id, "delete", Some(session.user_id), None);
        Ok(())
    }

    /// Get a single event
    pub async fn get_event(&self, event_id: i64) -> Result<Event, EventDeskError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(EventDeskError::EventNotFound { event_id })
    }

    /// Search events by keyword, time window, and status
    pub async fn search_events(
        &self,
        keyword: &str,
        time: TimeFilter,
        status: StatusFilter,
    ) -> Result<Vec<Event>, EventDeskError> {
        let keyword = normalize_whitespace(keyword);
        self.events.search(&keyword, time, status).await
    }

    /// Register a user for an event
    pub async fn join_event(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> Result<Registration, EventDeskError> {
        match self.registrations.join(event_id, user_id).await {
            Ok(registration) => {
                log_event_action(event_id, "join", Some(user_id), None);
                Ok(registration)
            }
            Err(e) => {
                self.report_failure("join", &e);
                Err(e)
            }
        }
    }

    /// Cancel a user's registration
    pub async fn cancel_registration(
        &self,
        event_id: i64,
        user_id: i64,
    ) -> Result<(), EventDeskError> {
        match self.registrations.cancel(event_id, user_id).await {
            Ok(()) => {
                log_event_action(event_id, "cancel", Some(user_id), None);
                Ok(())
            }
            Err(e) => {
                self.report_failure("cancel", &e);
                Err(e)
            }
        }
    }

    /// Check if a user is registered for an event
    pub async fn is_registered(&self, user_id: i64, event_id: i64) -> Result<bool, EventDeskError> {
        self.registrations.is_registered(user_id, event_id).await
    }

    /// Get all events a user is registered for, sorted ascending by start time
    pub async fn get_user_registered_events(
        &self,
        user_id: i64,
    ) -> Result<Vec<Event>, EventDeskError> {
        self.events.get_user_registered_events(user_id).await
    }

    fn report_failure(&self, operation: &str, e: &EventDeskError) {
        match e {
            EventDeskError::Database(_) | EventDeskError::Io(_) => {
                error!(operation = operation, error = %e, "Storage error");
            }
            _ => log_operation_rejected(operation, &e.to_string()),
        }
    }
}
