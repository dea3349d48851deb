// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Seller,
}

// Usuário do sistema. Vendedores recebem um salespersonId sequencial.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub name: String,
    #[schema(example = "maria@vendas.com")]
    pub email: String,
    pub role: UserRole,
    #[schema(example = 1)]
    pub salesperson_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro. A senha é aceita mas não é verificada nem guardada.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@vendas.com")]
    pub email: String,

    #[schema(example = "seller")]
    pub role: UserRole,

    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@vendas.com")]
    pub email: String,

    pub password: Option<String>,
}
