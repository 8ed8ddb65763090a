use std::sync::Arc;

use crate::{
    domain::PlanCatalog,
    error::Result,
    repository::PlanRepository,
};

pub struct PlanService {
    repo: Arc<dyn PlanRepository>,
}

impl PlanService {
    pub fn new(repo: Arc<dyn PlanRepository>) -> Self {
        Self { repo }
    }

    /// Load the catalog: active plans only, sorted by duration.
    pub async fn catalog(&self) -> Result<PlanCatalog> {
        Ok(PlanCatalog::new(self.repo.list_all().await?))
    }
}
