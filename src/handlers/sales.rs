// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::sales::{Sale, SaleChanges, SaleStage, SaleUpdate},
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Padaria Central")]
    pub client_name: String,

    #[schema(value_type = f64, example = 1500.0)]
    pub value: Decimal,

    /// Padrão: registration
    pub stage: Option<SaleStage>,

    #[validate(range(min = 1, message = "must_be_positive"))]
    #[schema(example = 1)]
    pub salesperson_id: i32,

    pub description: Option<String>,

    pub owner_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    #[schema(example = "follow_up")]
    pub stage: Option<SaleStage>,
    #[schema(value_type = Option<f64>)]
    pub value: Option<Decimal>,
}

impl From<UpdateSalePayload> for SaleChanges {
    fn from(payload: UpdateSalePayload) -> Self {
        SaleChanges {
            stage: payload.stage,
            value: payload.value,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListSalesQuery {
    pub salesperson_id: Option<i32>,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda criada (e visita, se já nasceu em acompanhamento)", body = SaleUpdate),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let created = app_state
        .sales_service
        .create_sale(
            &payload.client_name,
            payload.value,
            payload.stage,
            payload.salesperson_id,
            payload.description.as_deref(),
            payload.owner_id,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(ListSalesQuery),
    responses(
        (status = 200, description = "Vendas, mais recentes primeiro", body = Vec<Sale>)
    )
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sales = app_state
        .sales_service
        .list_sales(query.salesperson_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda", body = Sale),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = app_state
        .sales_service
        .get_sale(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sale)))
}

// PATCH /api/sales/{id}
#[utoipa::path(
    patch,
    path = "/api/sales/{id}",
    tag = "Sales",
    request_body = UpdateSalePayload,
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda atualizada e resultado do pós-venda", body = SaleUpdate),
        (status = 400, description = "Nada para alterar"),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .sales_service
        .update_sale(id, payload.into())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(updated)))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda removida"),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .sales_service
        .delete_sale(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
