use chrono::{Duration, Local};
use clap::Parser;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

use ironclub::{
    domain::{Plan, RegisterMemberRequest},
    repository::{PlanRepository, SqliteMemberRepository, SqlitePlanRepository},
    service::member_service::MemberService,
};

/// Seed the plan catalog (plans are maintained out-of-band, not through the
/// API) and optionally some demo members.
#[derive(Parser)]
struct Args {
    /// Also create demo members with payments
    #[arg(long)]
    demo: bool,

    /// Number of demo members
    #[arg(long, default_value_t = 12)]
    members: usize,
}

fn default_plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "mensual_basic".to_string(),
            name: "Mensualidad".to_string(),
            price: 60_000,
            duration_days: 30,
            is_active: true,
        },
        Plan {
            id: "bimestre_basic".to_string(),
            name: "Bimestre".to_string(),
            price: 110_000,
            duration_days: 60,
            is_active: true,
        },
        Plan {
            id: "trimestre_basic".to_string(),
            name: "Trimestre".to_string(),
            price: 150_000,
            duration_days: 90,
            is_active: true,
        },
        // Kept for old payment records; no longer offered.
        Plan {
            id: "semana_promo".to_string(),
            name: "Semana promocional".to_string(),
            price: 20_000,
            duration_days: 7,
            is_active: false,
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:ironclub.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let plan_repo = Arc::new(SqlitePlanRepository::new(db_pool.clone()));
    let member_repo = Arc::new(SqliteMemberRepository::new(db_pool.clone()));

    println!("🏋️ Seeding plans...");
    let plans = default_plans();
    for plan in &plans {
        anyhow::ensure!(
            !plan.is_active || plan.duration_days > 0,
            "active plan {} must have a positive duration",
            plan.id
        );
        plan_repo.upsert(plan).await?;
        println!(
            "  ✅ {} — ${} ({} días){}",
            plan.name,
            plan.price,
            plan.duration_days,
            if plan.is_active { "" } else { " [inactive]" }
        );
    }

    if args.demo {
        println!("👥 Creating {} demo members...", args.members);
        let member_service = MemberService::new(member_repo, plan_repo);
        let active_plans: Vec<&Plan> = plans.iter().filter(|p| p.is_active).collect();
        let today = Local::now().date_naive();

        for i in 0..args.members {
            let plan = active_plans[i % active_plans.len()];
            // Spread payment dates into the past; the older ones end up with
            // lapsed windows and show on the overdue list.
            let paid_on = today - Duration::days((i as i64) * 11);
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email: String = FreeEmail().fake();

            let member = member_service
                .register(RegisterMemberRequest {
                    first_name,
                    last_name,
                    phone: format!("300{:07}", 1_112_200 + i),
                    email: Some(email),
                    plan_id: plan.id.clone(),
                    amount: None,
                    method: "efectivo".to_string(),
                    paid_on: Some(paid_on),
                })
                .await?;
            println!("  ✅ {} ({})", member.full_name(), plan.id);
        }
    }

    println!("\n✨ Database seeding complete!");
    Ok(())
}
