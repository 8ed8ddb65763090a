use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use ironclub::{
    domain::{MembershipStatus, Plan, RegisterMemberRequest, RenewMembershipRequest},
    error::AppError,
    repository::{
        MemberRepository, PaymentRepository, PlanRepository, SqliteMemberRepository,
        SqlitePaymentRepository, SqlitePlanRepository,
    },
    service::member_service::MemberService,
};

async fn test_pool() -> anyhow::Result<SqlitePool> {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

async fn seed_plan(pool: &SqlitePool, id: &str, duration_days: i64) -> anyhow::Result<()> {
    let repo = SqlitePlanRepository::new(pool.clone());
    repo.upsert(&Plan {
        id: id.to_string(),
        name: format!("Plan {}", id),
        price: 60_000,
        duration_days,
        is_active: true,
    })
    .await?;
    Ok(())
}

fn service(pool: &SqlitePool) -> MemberService {
    MemberService::new(
        Arc::new(SqliteMemberRepository::new(pool.clone())),
        Arc::new(SqlitePlanRepository::new(pool.clone())),
    )
}

fn registration(plan_id: &str, paid_on: Option<NaiveDate>) -> RegisterMemberRequest {
    RegisterMemberRequest {
        first_name: "Ana".to_string(),
        last_name: "Ruiz".to_string(),
        phone: "3001112222".to_string(),
        email: Some("ana@ejemplo.com".to_string()),
        plan_id: plan_id.to_string(),
        amount: None,
        method: "efectivo".to_string(),
        paid_on,
    }
}

#[tokio::test]
async fn registration_writes_member_and_payment_together() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    seed_plan(&pool, "mensual_basic", 30).await?;
    let svc = service(&pool);

    let paid_on = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let member = svc.register(registration("mensual_basic", Some(paid_on))).await?;

    assert_eq!(member.status, MembershipStatus::Active);
    assert_eq!(member.plan_id.as_deref(), Some("mensual_basic"));
    assert_eq!(
        member.membership_start.map(|dt| dt.date_naive()),
        Some(paid_on)
    );
    assert_eq!(
        member.membership_end.map(|dt| dt.date_naive()),
        NaiveDate::from_ymd_opt(2026, 2, 14)
    );

    // The initial payment mirrors the member's window.
    let payments = SqlitePaymentRepository::new(pool.clone())
        .list_by_member(member.id)
        .await?;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, 60_000); // defaulted from the plan price
    assert_eq!(payments[0].coverage_end, member.membership_end.unwrap());

    Ok(())
}

#[tokio::test]
async fn renewal_extends_the_window_and_reactivates() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    seed_plan(&pool, "mensual_basic", 30).await?;
    seed_plan(&pool, "bimestre_basic", 60).await?;
    let svc = service(&pool);

    // Registered long ago; the stored label is active but the window lapsed.
    let old = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let member = svc.register(registration("mensual_basic", Some(old))).await?;

    let renewal_date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
    let renewed = svc
        .record_renewal(RenewMembershipRequest {
            member_id: member.id,
            plan_id: "bimestre_basic".to_string(),
            amount: Some(110_000),
            method: "transferencia".to_string(),
            paid_on: Some(renewal_date),
        })
        .await?;

    assert_eq!(renewed.status, MembershipStatus::Active);
    assert_eq!(renewed.plan_id.as_deref(), Some("bimestre_basic"));
    assert_eq!(
        renewed.membership_end.map(|dt| dt.date_naive()),
        NaiveDate::from_ymd_opt(2026, 3, 21)
    );

    let payments = SqlitePaymentRepository::new(pool.clone())
        .list_by_member(member.id)
        .await?;
    assert_eq!(payments.len(), 2);
    // Most recent payment's coverage window matches the member row.
    assert_eq!(payments[0].coverage_end, renewed.membership_end.unwrap());
    assert_eq!(payments[0].amount, 110_000);

    Ok(())
}

#[tokio::test]
async fn renewal_against_a_missing_member_writes_nothing() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    seed_plan(&pool, "mensual_basic", 30).await?;
    let svc = service(&pool);

    let ghost = Uuid::new_v4();
    let result = svc
        .record_renewal(RenewMembershipRequest {
            member_id: ghost,
            plan_id: "mensual_basic".to_string(),
            amount: None,
            method: "efectivo".to_string(),
            paid_on: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    // The payment insert rolled back with the failed update.
    let payments = SqlitePaymentRepository::new(pool.clone())
        .list_by_member(ghost)
        .await?;
    assert!(payments.is_empty());

    Ok(())
}

#[tokio::test]
async fn deleting_a_member_removes_their_payments() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    seed_plan(&pool, "mensual_basic", 30).await?;
    let svc = service(&pool);

    let member = svc.register(registration("mensual_basic", None)).await?;
    svc.record_renewal(RenewMembershipRequest {
        member_id: member.id,
        plan_id: "mensual_basic".to_string(),
        amount: None,
        method: "efectivo".to_string(),
        paid_on: None,
    })
    .await?;

    svc.delete(member.id).await?;

    let member_repo = SqliteMemberRepository::new(pool.clone());
    assert!(member_repo.find_by_id(member.id).await?.is_none());
    let payments = SqlitePaymentRepository::new(pool.clone())
        .list_by_member(member.id)
        .await?;
    assert!(payments.is_empty());

    // A second delete reports the member as gone.
    let again = svc.delete(member.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn registration_rejects_unknown_or_retired_plans() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let plan_repo = SqlitePlanRepository::new(pool.clone());
    plan_repo
        .upsert(&Plan {
            id: "semana_promo".to_string(),
            name: "Semana promocional".to_string(),
            price: 20_000,
            duration_days: 7,
            is_active: false,
        })
        .await?;
    let svc = service(&pool);

    let unknown = svc.register(registration("anual", None)).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let retired = svc.register(registration("semana_promo", None)).await;
    assert!(matches!(retired, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn member_search_matches_names_phone_and_email() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    seed_plan(&pool, "mensual_basic", 30).await?;
    let svc = service(&pool);

    svc.register(registration("mensual_basic", None)).await?;
    svc.register(RegisterMemberRequest {
        first_name: "Luis".to_string(),
        last_name: "Gómez".to_string(),
        phone: "3109998888".to_string(),
        email: None,
        plan_id: "mensual_basic".to_string(),
        amount: None,
        method: "efectivo".to_string(),
        paid_on: None,
    })
    .await?;

    assert_eq!(svc.list(None).await?.len(), 2);
    assert_eq!(svc.list(Some("ana")).await?.len(), 1);
    assert_eq!(svc.list(Some("GÓMEZ")).await?.len(), 1);
    assert_eq!(svc.list(Some("310")).await?.len(), 1);
    assert_eq!(svc.list(Some("ejemplo.com")).await?.len(), 1);
    assert_eq!(svc.list(Some("nadie")).await?.len(), 0);

    Ok(())
}
