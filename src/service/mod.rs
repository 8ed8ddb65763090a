pub mod dashboard_service;
pub mod import_service;
pub mod member_service;
pub mod plan_service;

use std::sync::Arc;

use crate::repository::*;
use dashboard_service::DashboardService;
use import_service::ImportService;
use member_service::MemberService;
use plan_service::PlanService;

pub struct ServiceContext {
    pub member_repo: Arc<dyn MemberRepository>,
    pub plan_repo: Arc<dyn PlanRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub plan_service: Arc<PlanService>,
    pub member_service: Arc<MemberService>,
    pub dashboard_service: Arc<DashboardService>,
    pub import_service: Arc<ImportService>,
}

impl ServiceContext {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
    ) -> Self {
        let plan_service = Arc::new(PlanService::new(plan_repo.clone()));
        let member_service = Arc::new(MemberService::new(member_repo.clone(), plan_repo.clone()));
        let dashboard_service = Arc::new(DashboardService::new(member_repo.clone()));
        let import_service = Arc::new(ImportService::new(member_repo.clone(), plan_repo.clone()));

        Self {
            member_repo,
            plan_repo,
            payment_repo,
            plan_service,
            member_service,
            dashboard_service,
            import_service,
        }
    }
}
