use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::Plan,
    error::Result,
    repository::PlanRepository,
};

#[derive(FromRow)]
struct PlanRow {
    id: String,
    name: String,
    price: i64,
    duration_days: i64,
    is_active: i64,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Plan {
            id: row.id,
            name: row.name,
            price: row.price,
            duration_days: row.duration_days,
            is_active: row.is_active != 0,
        }
    }
}

pub struct SqlitePlanRepository {
    pool: SqlitePool,
}

impl SqlitePlanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for SqlitePlanRepository {
    async fn list_all(&self) -> Result<Vec<Plan>> {
        let rows = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, price, duration_days, is_active
            FROM plans
            ORDER BY duration_days ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Plan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, price, duration_days, is_active
            FROM plans
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn upsert(&self, plan: &Plan) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO plans (id, name, price, duration_days, is_active)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                duration_days = excluded.duration_days,
                is_active = excluded.is_active
            "#,
        )
        .bind(&plan.id)
        .bind(&plan.name)
        .bind(plan.price)
        .bind(plan.duration_days)
        .bind(if plan.is_active { 1i64 } else { 0i64 })
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
