//! PostgreSQL implementation of EventRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{EventId, Timestamp};
use crate::domain::ticketing::{Event, TicketingError};
use crate::ports::EventRepository;

/// PostgreSQL implementation of the EventRepository port.
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Creates a new PostgresEventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an event.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    location: String,
    date: DateTime<Utc>,
    price_cents: i64,
    capacity: Option<i32>,
}

impl TryFrom<EventRow> for Event {
    type Error = TicketingError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let capacity = row
            .capacity
            .map(|c| {
                u32::try_from(c).map_err(|_| {
                    TicketingError::infrastructure(format!("Negative capacity: {}", c))
                })
            })
            .transpose()?;

        Ok(Event {
            id: EventId::from_uuid(row.id),
            title: row.title,
            location: row.location,
            date: Timestamp::from_datetime(row.date),
            price_cents: row.price_cents,
            capacity,
        })
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, TicketingError> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
            SELECT id, title, location, date, price_cents, capacity
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TicketingError::infrastructure(format!("Failed to find event: {}", e)))?;

        row.map(Event::try_from).transpose()
    }
}
