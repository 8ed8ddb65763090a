use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod member_repository;
pub mod payment_repository;
pub mod plan_repository;

pub use member_repository::SqliteMemberRepository;
pub use payment_repository::SqlitePaymentRepository;
pub use plan_repository::SqlitePlanRepository;

#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Plan>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Plan>>;
    /// Out-of-band catalog maintenance (seed binary); not exposed via the API.
    async fn upsert(&self, plan: &Plan) -> Result<()>;
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>>;
    async fn list(&self) -> Result<Vec<Member>>;
    /// Registration: member plus initial payment, one transaction.
    async fn register(&self, member: &Member, initial_payment: &Payment) -> Result<()>;
    /// Renewal: new payment plus member window/plan/status update, one
    /// transaction. Flips the member to active.
    async fn renew(&self, member_id: Uuid, renewal: &MembershipRenewal, payment: &Payment)
        -> Result<()>;
    /// One import chunk, committed atomically.
    async fn insert_batch(&self, members: &[Member]) -> Result<()>;
    /// Removes the member's payments and then the member, one transaction.
    /// Returns the number of payments removed.
    async fn delete_with_payments(&self, id: Uuid) -> Result<u64>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list_by_member(&self, member_id: Uuid) -> Result<Vec<Payment>>;
}
