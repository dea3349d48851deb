pub mod auth;
pub mod dashboard_service;
pub mod goals_service;
pub mod notification_service;
pub mod sales_service;
pub mod visit_scheduler;
