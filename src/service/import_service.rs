use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    dates::{add_days, noon_utc, parse_flexible_date},
    domain::{Member, MembershipStatus, PlanCatalog},
    error::{AppError, Result},
    import::{parse_csv, CsvRow},
    repository::{MemberRepository, PlanRepository},
};

/// Records per storage batch. Each batch commits atomically; batches already
/// committed stay committed if a later one fails.
pub const IMPORT_BATCH_SIZE: usize = 500;

/// Column aliases accepted for the plan reference.
const PLAN_COLUMNS: [&str; 3] = ["plan", "tipomembresia", "membresia"];

#[derive(Debug)]
pub struct ImportOutcome {
    pub imported: usize,
}

pub struct ImportService {
    member_repo: Arc<dyn MemberRepository>,
    plan_repo: Arc<dyn PlanRepository>,
}

impl ImportService {
    pub fn new(member_repo: Arc<dyn MemberRepository>, plan_repo: Arc<dyn PlanRepository>) -> Self {
        Self {
            member_repo,
            plan_repo,
        }
    }

    /// Parse a spreadsheet export and write the reconciled members in
    /// batches. Zero usable rows is a validation error, distinct from a
    /// storage failure.
    pub async fn import_members(&self, text: &str) -> Result<ImportOutcome> {
        let rows = parse_csv(text);
        if rows.is_empty() {
            return Err(AppError::Validation(
                "No valid rows found; each row needs at least a name, surname or phone".to_string(),
            ));
        }

        let catalog = PlanCatalog::new(self.plan_repo.list_all().await?);
        let today = Local::now().date_naive();
        let now = Utc::now();
        let members: Vec<Member> = rows
            .iter()
            .map(|row| reconcile_row(row, &catalog, today, now))
            .collect();

        let mut imported = 0;
        for chunk in members.chunks(IMPORT_BATCH_SIZE) {
            self.member_repo.insert_batch(chunk).await?;
            imported += chunk.len();
            tracing::debug!(imported, total = members.len(), "import batch committed");
        }

        tracing::info!(imported, "member import finished");
        Ok(ImportOutcome { imported })
    }
}

/// Build a storage-ready member from one spreadsheet row.
///
/// The registration date falls back to `today` when the date column is
/// missing or unparseable. The membership window is attached only when the
/// plan column resolves against the catalog; the member is active iff that
/// window's end date is today-or-later. Without a plan the member comes in
/// expired with no window.
pub fn reconcile_row(
    row: &CsvRow,
    catalog: &PlanCatalog,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Member {
    let field = |key: &str| {
        row.get(key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let registered_on = row
        .get("fecharegistro")
        .or_else(|| row.get("fecha_registro"))
        .and_then(|v| parse_flexible_date(v))
        .unwrap_or(today);

    let resolved = PLAN_COLUMNS
        .iter()
        .find_map(|key| row.get(*key).map(|v| v.trim()).filter(|v| !v.is_empty()))
        .and_then(|reference| catalog.resolve(reference));

    let email = field("email");
    let mut member = Member {
        id: Uuid::new_v4(),
        first_name: field("nombre"),
        last_name: field("apellido"),
        phone: field("telefono"),
        email: (!email.is_empty()).then_some(email),
        registered_at: noon_utc(registered_on),
        plan_id: None,
        membership_start: None,
        membership_end: None,
        status: MembershipStatus::Expired,
        created_at: now,
        updated_at: now,
    };

    if let Some(plan) = resolved {
        let ends_on = add_days(registered_on, plan.duration_days);
        member.plan_id = Some(plan.id.clone());
        member.membership_start = Some(noon_utc(registered_on));
        member.membership_end = Some(noon_utc(ends_on));
        member.status = if ends_on >= today {
            MembershipStatus::Active
        } else {
            MembershipStatus::Expired
        };
    }

    member
}
