use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Member, MembershipRenewal, MembershipStatus, Payment},
    error::{AppError, Result},
    repository::MemberRepository,
};

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct MemberRow {
    id: String,
    first_name: String,
    last_name: String,
    phone: String,
    email: Option<String>,
    registered_at: NaiveDateTime,
    plan_id: Option<String>,
    membership_start: Option<NaiveDateTime>,
    membership_end: Option<NaiveDateTime>,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

const MEMBER_COLUMNS: &str = "id, first_name, last_name, phone, email, registered_at, \
     plan_id, membership_start, membership_end, status, created_at, updated_at";

pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_member(row: MemberRow) -> Result<Member> {
        Ok(Member {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            email: row.email,
            registered_at: DateTime::from_naive_utc_and_offset(row.registered_at, Utc),
            plan_id: row.plan_id,
            membership_start: row
                .membership_start
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            membership_end: row
                .membership_end
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            status: MembershipStatus::from_label(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid membership status: {}", row.status)))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    async fn insert_member(conn: &mut SqliteConnection, member: &Member) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members (
                id, first_name, last_name, phone, email, registered_at,
                plan_id, membership_start, membership_end, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(member.registered_at.naive_utc())
        .bind(&member.plan_id)
        .bind(member.membership_start.map(|dt| dt.naive_utc()))
        .bind(member.membership_end.map(|dt| dt.naive_utc()))
        .bind(member.status.as_str())
        .bind(member.created_at.naive_utc())
        .bind(member.updated_at.naive_utc())
        .execute(conn)
        .await?;

        Ok(())
    }

    async fn insert_payment(conn: &mut SqliteConnection, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, member_id, plan_id, amount, method,
                paid_at, coverage_start, coverage_end, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.id.to_string())
        .bind(payment.member_id.to_string())
        .bind(&payment.plan_id)
        .bind(payment.amount)
        .bind(&payment.method)
        .bind(payment.paid_at.naive_utc())
        .bind(payment.coverage_start.naive_utc())
        .bind(payment.coverage_end.naive_utc())
        .bind(payment.created_at.naive_utc())
        .execute(conn)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_member(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY registered_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_member).collect()
    }

    async fn register(&self, member: &Member, initial_payment: &Payment) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        Self::insert_member(&mut *tx, member).await?;
        Self::insert_payment(&mut *tx, initial_payment).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn renew(
        &self,
        member_id: Uuid,
        renewal: &MembershipRenewal,
        payment: &Payment,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE members
            SET plan_id = ?,
                membership_start = ?,
                membership_end = ?,
                status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&renewal.plan_id)
        .bind(renewal.membership_start.naive_utc())
        .bind(renewal.membership_end.naive_utc())
        .bind(MembershipStatus::Active.as_str())
        .bind(Utc::now().naive_utc())
        .bind(member_id.to_string())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        Self::insert_payment(&mut *tx, payment).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_batch(&self, members: &[Member]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for member in members {
            Self::insert_member(&mut *tx, member).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete_with_payments(&self, id: Uuid) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let payments = sqlx::query("DELETE FROM payments WHERE member_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        let members = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        if members.rows_affected() == 0 {
            return Err(AppError::NotFound("Member not found".to_string()));
        }

        tx.commit().await?;
        Ok(payments.rows_affected())
    }
}
