use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::Payment,
    error::{AppError, Result},
    repository::PaymentRepository,
};

#[derive(FromRow)]
struct PaymentRow {
    id: String,
    member_id: String,
    plan_id: String,
    amount: i64,
    method: String,
    paid_at: NaiveDateTime,
    coverage_start: NaiveDateTime,
    coverage_end: NaiveDateTime,
    created_at: NaiveDateTime,
}

pub struct SqlitePaymentRepository {
    pool: SqlitePool,
}

impl SqlitePaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: PaymentRow) -> Result<Payment> {
        Ok(Payment {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            member_id: Uuid::parse_str(&row.member_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            plan_id: row.plan_id,
            amount: row.amount,
            method: row.method,
            paid_at: DateTime::from_naive_utc_and_offset(row.paid_at, Utc),
            coverage_start: DateTime::from_naive_utc_and_offset(row.coverage_start, Utc),
            coverage_end: DateTime::from_naive_utc_and_offset(row.coverage_end, Utc),
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepository {
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT id, member_id, plan_id, amount, method,
                   paid_at, coverage_start, coverage_end, created_at
            FROM payments
            WHERE member_id = ?
            ORDER BY paid_at DESC
            "#,
        )
        .bind(member_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_payment).collect()
    }
}
