// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erro interno da aplicação. Serviços e repositórios só conhecem este tipo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("user not found")]
    UserNotFound,

    #[error("sale {0} not found")]
    SaleNotFound(Uuid),

    #[error("visit {0} not found")]
    VisitNotFound(Uuid),

    #[error("notification {0} not found")]
    NotificationNotFound(Uuid),

    #[error("sale update must change the stage or the value")]
    EmptySaleUpdate,

    #[error("no slot found in the next {window_days} days")]
    SchedulingExhausted { window_days: u32 },

    #[error("a visit is already scheduled for sale {0}")]
    VisitAlreadyScheduled(Uuid),

    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

// Erro já traduzido, pronto para virar resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Chave de tradução (e código estável enviado ao frontend).
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::UserNotFound => "user_not_found",
            AppError::SaleNotFound(_) => "sale_not_found",
            AppError::VisitNotFound(_) => "visit_not_found",
            AppError::NotificationNotFound(_) => "notification_not_found",
            AppError::EmptySaleUpdate => "empty_sale_update",
            AppError::SchedulingExhausted { .. } => "scheduling_exhausted",
            AppError::VisitAlreadyScheduled(_) => "visit_already_scheduled",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::EmptySaleUpdate => StatusCode::BAD_REQUEST,
            AppError::UserNotFound
            | AppError::SaleNotFound(_)
            | AppError::VisitNotFound(_)
            | AppError::NotificationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SchedulingExhausted { .. } | AppError::VisitAlreadyScheduled(_) => {
                StatusCode::CONFLICT
            }
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_api_error(&self, locale: &Locale, i18n_store: &I18nStore) -> ApiError {
        let status = self.status();
        let code = self.code();

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            AppError::InvalidInput(reason) => Some(json!({ "reason": reason })),
            _ => None,
        };

        let message = match self {
            AppError::SchedulingExhausted { window_days } => i18n_store.translate_with(
                &locale.0,
                code,
                &[("days", window_days.to_string())],
            ),
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                // O detalhe fica só no log
                tracing::error!("Erro Interno do Servidor: {}", self);
                i18n_store.translate(&locale.0, code)
            }
            _ => i18n_store.translate(&locale.0, code),
        };

        ApiError { status, code, message, details }
    }
}

// Campo -> lista de códigos de erro do validator
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), json!(messages));
    }
    Value::Object(details)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.message,
            "code": self.code,
        });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "required"))]
        client_name: String,
    }

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn not_found_variants_map_to_404() {
        let store = I18nStore::new();
        for err in [
            AppError::UserNotFound,
            AppError::SaleNotFound(Uuid::nil()),
            AppError::VisitNotFound(Uuid::nil()),
            AppError::NotificationNotFound(Uuid::nil()),
        ] {
            assert_eq!(err.to_api_error(&pt(), &store).status, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn exhausted_window_is_a_conflict_with_the_window_in_the_message() {
        let store = I18nStore::new();
        let api = AppError::SchedulingExhausted { window_days: 30 }
            .to_api_error(&Locale("en".to_string()), &store);

        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.code, "scheduling_exhausted");
        assert_eq!(api.message, "No slot found in the next 30 days.");
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let errors = Probe { client_name: String::new() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&pt(), &I18nStore::new());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.details.unwrap()["client_name"], json!(["required"]));
    }

    #[test]
    fn database_errors_hide_the_cause() {
        let api = AppError::DatabaseError(sqlx::Error::RowNotFound)
            .to_api_error(&Locale("en".to_string()), &I18nStore::new());

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.contains("RowNotFound"));
    }
}
