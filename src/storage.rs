//! Persistence of accepted submissions.

use crate::estimate::CostEstimate;
use crate::models::{ContactSubmission, QuoteSubmission};
use async_trait::async_trait;
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// A validated submission ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Contact(ContactSubmission),
    Quote {
        submission: QuoteSubmission,
        estimate: CostEstimate,
    },
}

impl Submission {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Contact(_) => "contact",
            Submission::Quote { .. } => "quote",
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Submission::Contact(c) => &c.email,
            Submission::Quote { submission, .. } => &submission.email,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub Uuid);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Database(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn save(&self, submission: &Submission) -> Result<SubmissionId, StorageError>;
}

/// Store used when no database is configured: logs and issues a fresh id.
#[derive(Debug, Clone, Default)]
pub struct LogSubmissionStore;

#[async_trait]
impl SubmissionStore for LogSubmissionStore {
    async fn save(&self, submission: &Submission) -> Result<SubmissionId, StorageError> {
        let id = SubmissionId(Uuid::new_v4());
        tracing::info!(
            id = %id,
            kind = submission.kind(),
            email = submission.email(),
            "Submission received (no database configured)"
        );
        Ok(id)
    }
}

/// Postgres-backed store. Schema lives in `migrations/`.
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_contact(&self, contact: &ContactSubmission) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO contact_submissions
                (id, name, email, phone, subject, message, preferred_contact, project_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.subject.as_str())
        .bind(&contact.message)
        .bind(contact.preferred_contact.map(|p| p.as_str()))
        .bind(contact.project_type.map(|p| p.as_str()))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn insert_quote(
        &self,
        quote: &QuoteSubmission,
        estimate: &CostEstimate,
    ) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();
        let dims = quote.room_dimensions;

        sqlx::query(
            r#"
            INSERT INTO quote_submissions
                (id, name, email, phone, address, project_type,
                 room_length, room_width, room_height,
                 cabinet_style, finish, features, budget, timeline,
                 existing_cabinets, renovation_type, additional_notes,
                 preferred_contact, visit_required, estimated_cost, estimated_area)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21)
            "#,
        )
        .bind(id)
        .bind(&quote.name)
        .bind(&quote.email)
        .bind(&quote.phone)
        .bind(&quote.address)
        .bind(quote.project_type.as_str())
        .bind(dims.map(|d| d.length))
        .bind(dims.map(|d| d.width))
        .bind(dims.map(|d| d.height))
        .bind(quote.cabinet_style.as_str())
        .bind(quote.finish.as_str())
        .bind(&quote.features)
        .bind(quote.budget.as_str())
        .bind(quote.timeline.as_str())
        .bind(quote.existing_cabinets)
        .bind(quote.renovation_type.map(|r| r.as_str()))
        .bind(quote.additional_notes.as_deref())
        .bind(quote.preferred_contact.map(|p| p.as_str()))
        .bind(quote.visit_required)
        .bind(estimate.estimated_cost)
        .bind(estimate.area)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn save(&self, submission: &Submission) -> Result<SubmissionId, StorageError> {
        let id = match submission {
            Submission::Contact(contact) => self.insert_contact(contact).await?,
            Submission::Quote {
                submission,
                estimate,
            } => self.insert_quote(submission, estimate).await?,
        };

        tracing::info!("✓ Stored {} submission {}", submission.kind(), id);
        Ok(SubmissionId(id))
    }
}
