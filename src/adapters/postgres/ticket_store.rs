//! PostgreSQL implementation of TicketStore.
//!
//! Owns the two invariants that need the database:
//!
//! - Capacity is enforced inside a transaction that locks the event row
//!   (`SELECT ... FOR UPDATE`) before counting and inserting, so concurrent
//!   purchases of the last seat serialize.
//! - Redemption is a single conditional `UPDATE ... WHERE used_at IS NULL`,
//!   so exactly one of any number of concurrent scans wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{EventId, TicketId, Timestamp, UserId};
use crate::domain::ticketing::{Credential, Ticket, TicketingError};
use crate::ports::{MarkUsedOutcome, TicketStore};

/// PostgreSQL implementation of the TicketStore port.
pub struct PostgresTicketStore {
    pool: PgPool,
}

impl PostgresTicketStore {
    /// Creates a new PostgresTicketStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a ticket.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    event_id: Uuid,
    user_id: String,
    credential: String,
    created_at: DateTime<Utc>,
    used_at: Option<DateTime<Utc>>,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = TicketingError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|e| TicketingError::infrastructure(format!("Invalid user_id: {}", e)))?;

        Ok(Ticket {
            id: TicketId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            user_id,
            credential: Credential::from_stored(row.credential),
            created_at: Timestamp::from_datetime(row.created_at),
            used_at: row.used_at.map(Timestamp::from_datetime),
        })
    }
}

fn db_error(context: &str, e: sqlx::Error) -> TicketingError {
    TicketingError::infrastructure(format!("{}: {}", context, e))
}

#[async_trait]
impl TicketStore for PostgresTicketStore {
    async fn create(&self, ticket: &Ticket, capacity: Option<u32>) -> Result<(), TicketingError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        if let Some(capacity) = capacity {
            // Lock the event row so concurrent purchases count serially.
            sqlx::query("SELECT id FROM events WHERE id = $1 FOR UPDATE")
                .bind(ticket.event_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to lock event", e))?
                .ok_or(TicketingError::EventNotFound(ticket.event_id))?;

            let issued: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE event_id = $1")
                    .bind(ticket.event_id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to count tickets", e))?;

            if issued >= i64::from(capacity) {
                return Err(TicketingError::capacity_exceeded(ticket.event_id, capacity));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO tickets (id, event_id, user_id, credential, created_at, used_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(ticket.id.as_uuid())
        .bind(ticket.event_id.as_uuid())
        .bind(ticket.user_id.as_str())
        .bind(ticket.credential.as_str())
        .bind(ticket.created_at.as_datetime())
        .bind(ticket.used_at.map(|t| *t.as_datetime()))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("tickets_credential_key") {
                    return TicketingError::DuplicateCredential;
                }
            }
            db_error("Failed to insert ticket", e)
        })?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit ticket", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketingError> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, user_id, credential, created_at, used_at
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find ticket", e))?;

        row.map(Ticket::try_from).transpose()
    }

    async fn find_by_credential(
        &self,
        credential: &str,
    ) -> Result<Option<Ticket>, TicketingError> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, user_id, credential, created_at, used_at
            FROM tickets
            WHERE credential = $1
            "#,
        )
        .bind(credential)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find ticket", e))?;

        row.map(Ticket::try_from).transpose()
    }

    async fn count_for_event(&self, event_id: &EventId) -> Result<u64, TicketingError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE event_id = $1")
            .bind(event_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count tickets", e))?;

        Ok(count.max(0) as u64)
    }

    async fn mark_used(
        &self,
        credential: &str,
        at: Timestamp,
    ) -> Result<MarkUsedOutcome, TicketingError> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            UPDATE tickets
            SET used_at = $2
            WHERE credential = $1 AND used_at IS NULL
            RETURNING id, event_id, user_id, credential, created_at, used_at
            "#,
        )
        .bind(credential)
        .bind(at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark ticket used", e))?;

        if let Some(row) = row {
            return Ok(MarkUsedOutcome::Marked(Ticket::try_from(row)?));
        }

        // Nothing updated: either the ticket is gone or it lost the race.
        let used_at: Option<Option<DateTime<Utc>>> =
            sqlx::query_scalar("SELECT used_at FROM tickets WHERE credential = $1")
                .bind(credential)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to re-read ticket", e))?;

        match used_at {
            Some(Some(used_at)) => Ok(MarkUsedOutcome::AlreadyUsed {
                used_at: Timestamp::from_datetime(used_at),
            }),
            // used_at NULL after a failed conditional update should not
            // happen; treat it as a retryable infrastructure fault.
            Some(None) => Err(TicketingError::infrastructure(
                "ticket unused but conditional update matched nothing",
            )),
            None => Err(TicketingError::TicketNotFound),
        }
    }
}
