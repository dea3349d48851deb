// src/handlers/notifications.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::notifications::Notification,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListNotificationsQuery {
    /// Para visitas, o salespersonId em texto
    pub user_id: String,
    #[serde(default)]
    pub unread_only: bool,
}

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    params(ListNotificationsQuery),
    responses(
        (status = 200, description = "Notificações do usuário, mais novas primeiro", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let notifications = app_state
        .notification_service
        .list_for_user(&query.user_id, query.unread_only)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(notifications)))
}

// PATCH /api/notifications/{id}/read
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 200, description = "Notificação marcada como lida", body = Notification),
        (status = 404, description = "Notificação não encontrada")
    )
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let notification = app_state
        .notification_service
        .mark_read(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(notification)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        common::clock::FixedClock,
        config::Stores,
        db::memory::{MemoryNotificationStore, MemorySaleStore, MemoryVisitStore},
        services::visit_scheduler::SchedulerPolicy,
    };

    async fn get_json(router: &axum::Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn scheduled_visit_notifies_the_salesperson_until_read() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let stores = Stores {
            sales: Arc::new(MemorySaleStore::default()),
            visits: Arc::new(MemoryVisitStore::default()),
            notifications: Arc::new(MemoryNotificationStore::default()),
        };
        let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()));
        let state = AppState::from_parts(pool, stores, clock, SchedulerPolicy::default());
        state
            .visit_scheduler
            .schedule_visit("Padaria Central", 7, Uuid::new_v4())
            .await
            .unwrap();
        let router = crate::build_router(state);

        let (status, unread) =
            get_json(&router, Method::GET, "/api/notifications?userId=7&unreadOnly=true").await;
        assert_eq!(status, StatusCode::OK);
        let unread = unread.as_array().unwrap().clone();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0]["type"], "visit");
        assert_eq!(unread[0]["description"], "Visit with Padaria Central scheduled for 05/03/2026");

        let id = unread[0]["id"].as_str().unwrap();
        let (status, read) = get_json(&router, Method::PATCH, &format!("/api/notifications/{id}/read")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read["read"], true);

        let (_, unread) =
            get_json(&router, Method::GET, "/api/notifications?userId=7&unreadOnly=true").await;
        assert!(unread.as_array().unwrap().is_empty());
        let (_, all) = get_json(&router, Method::GET, "/api/notifications?userId=7").await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_notification_is_not_found() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let stores = Stores {
            sales: Arc::new(MemorySaleStore::default()),
            visits: Arc::new(MemoryVisitStore::default()),
            notifications: Arc::new(MemoryNotificationStore::default()),
        };
        let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()));
        let router = crate::build_router(AppState::from_parts(pool, stores, clock, SchedulerPolicy::default()));

        let (status, body) =
            get_json(&router, Method::PATCH, &format!("/api/notifications/{}/read", Uuid::new_v4())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "notification_not_found");
    }
}
