pub mod auth;
pub mod dashboard;
pub mod goals;
pub mod notifications;
pub mod sales;
pub mod visits;
