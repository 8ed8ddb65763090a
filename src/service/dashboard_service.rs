use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::{
    dates::add_days,
    domain::{Member, MembershipStatus},
    error::Result,
    repository::MemberRepository,
};

/// Members whose end date falls within this many days of today count as
/// expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

#[derive(Debug, Default)]
pub struct DashboardSummary {
    pub active_count: usize,
    pub expired_count: usize,
    pub expiring_soon: Vec<Member>,
    pub overdue: Vec<Member>,
}

/// Partition a member set for the dashboard as of `today`.
///
/// The counts go by the stored status label. The expiring-soon list is drawn
/// from label-active members whose end date falls within
/// `[today, today + 7]` inclusive. The overdue list goes by the end date
/// alone — strictly before today — so a stale `active` label still lands
/// there. Members without an end date appear in neither list.
pub fn summarize(members: &[Member], today: NaiveDate) -> DashboardSummary {
    let horizon = add_days(today, EXPIRY_WARNING_DAYS);
    let mut summary = DashboardSummary::default();

    for member in members {
        match member.status {
            MembershipStatus::Active => summary.active_count += 1,
            MembershipStatus::Expired => summary.expired_count += 1,
        }

        let Some(end) = member.membership_end else {
            continue;
        };
        let end = end.date_naive();

        if member.status == MembershipStatus::Active && end >= today && end <= horizon {
            summary.expiring_soon.push(member.clone());
        }
        if end < today {
            summary.overdue.push(member.clone());
        }
    }

    summary
}

pub struct DashboardService {
    member_repo: Arc<dyn MemberRepository>,
}

impl DashboardService {
    pub fn new(member_repo: Arc<dyn MemberRepository>) -> Self {
        Self { member_repo }
    }

    pub async fn summary(&self) -> Result<DashboardSummary> {
        let members = self.member_repo.list().await?;
        Ok(summarize(&members, Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use crate::dates::noon_utc;

    fn member(status: MembershipStatus, end: Option<NaiveDate>) -> Member {
        let now = Utc::now();
        Member {
            id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            phone: "3001112222".to_string(),
            email: None,
            registered_at: now,
            plan_id: Some("mensual_basic".to_string()),
            membership_start: end.map(|d| noon_utc(add_days(d, -30))),
            membership_end: end.map(noon_utc),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn end_dates(list: &[Member]) -> Vec<Option<DateTime<Utc>>> {
        list.iter().map(|m| m.membership_end).collect()
    }

    #[test]
    fn counts_go_by_stored_label() {
        let members = vec![
            member(MembershipStatus::Active, Some(date(2026, 2, 10))),
            member(MembershipStatus::Active, None),
            member(MembershipStatus::Expired, Some(date(2025, 12, 1))),
        ];
        let summary = summarize(&members, today());
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.expired_count, 1);
    }

    #[test]
    fn expiring_soon_window_is_inclusive() {
        let members = vec![
            member(MembershipStatus::Active, Some(today())),
            member(MembershipStatus::Active, Some(date(2026, 1, 27))), // today + 7
            member(MembershipStatus::Active, Some(date(2026, 1, 28))), // past the window
        ];
        let summary = summarize(&members, today());
        assert_eq!(summary.expiring_soon.len(), 2);
        assert!(summary.overdue.is_empty());
    }

    #[test]
    fn overdue_ignores_a_stale_active_label() {
        let members = vec![member(MembershipStatus::Active, Some(date(2026, 1, 10)))];
        let summary = summarize(&members, today());
        assert_eq!(summary.active_count, 1);
        assert_eq!(summary.overdue.len(), 1);
        assert!(summary.expiring_soon.is_empty());
    }

    #[test]
    fn expiring_soon_and_overdue_are_disjoint() {
        let mut members = Vec::new();
        for day in 1..=31 {
            members.push(member(MembershipStatus::Active, Some(date(2026, 1, day))));
            members.push(member(MembershipStatus::Expired, Some(date(2026, 1, day))));
        }
        let summary = summarize(&members, today());
        let soon = end_dates(&summary.expiring_soon);
        for end in end_dates(&summary.overdue) {
            assert!(!soon.contains(&end));
        }
    }

    #[test]
    fn members_without_an_end_date_stay_off_both_lists() {
        let members = vec![
            member(MembershipStatus::Active, None),
            member(MembershipStatus::Expired, None),
        ];
        let summary = summarize(&members, today());
        assert!(summary.expiring_soon.is_empty());
        assert!(summary.overdue.is_empty());
        assert_eq!(summary.active_count, 1);
        assert_eq!(summary.expired_count, 1);
    }

    #[test]
    fn expired_label_with_future_end_is_not_expiring_soon() {
        let members = vec![member(MembershipStatus::Expired, Some(date(2026, 1, 22)))];
        let summary = summarize(&members, today());
        assert!(summary.expiring_soon.is_empty());
        assert!(summary.overdue.is_empty());
    }
}
