//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::UserId;
use crate::domain::ticketing::TicketingError;
use crate::ports::{UserDirectory, UserProfile};

/// PostgreSQL implementation of the UserDirectory port.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new PostgresUserDirectory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: Option<String>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = TicketingError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id)
            .map_err(|e| TicketingError::infrastructure(format!("Invalid user id: {}", e)))?;
        Ok(UserProfile {
            id,
            email: row.email,
            name: row.name,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, TicketingError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TicketingError::infrastructure(format!("Failed to find user: {}", e)))?;

        row.map(UserProfile::try_from).transpose()
    }
}
