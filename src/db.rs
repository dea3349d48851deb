pub mod stores;
pub use stores::{NotificationStore, SaleStore, VisitStore};

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod visit_repo;
pub use visit_repo::VisitRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;
pub mod goals_repo;
pub use goals_repo::GoalRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;

#[cfg(test)]
pub mod memory;
#[cfg(test)]
pub mod testing;
