// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::visits::FollowUpOutcome;

// --- Etapas do funil ---
// Os nomes antigos em português continuam aceitos na entrada.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "sale_stage", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleStage {
    #[default]
    #[serde(alias = "cadastro")]
    Registration,
    #[serde(alias = "negociacao")]
    Negotiation,
    #[serde(alias = "fechamento")]
    Closing,
    #[serde(alias = "acompanhamento")]
    FollowUp,
}

impl SaleStage {
    /// Fechamento e acompanhamento contam como receita realizada.
    pub fn is_realized(self) -> bool {
        matches!(self, SaleStage::Closing | SaleStage::FollowUp)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    #[schema(example = "Padaria Central")]
    pub client_name: String,
    #[schema(value_type = f64, example = 1500.0)]
    pub value: Decimal,
    pub stage: SaleStage,
    #[schema(example = 1)]
    pub salesperson_id: i32,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Campos que o PATCH pode alterar. Nenhuma transição é imposta no servidor.
#[derive(Debug, Clone, Default)]
pub struct SaleChanges {
    pub stage: Option<SaleStage>,
    pub value: Option<Decimal>,
}

impl SaleChanges {
    pub fn is_empty(&self) -> bool {
        self.stage.is_none() && self.value.is_none()
    }
}

// Resultado do UPDATE: a venda nova e a etapa que ela tinha antes
#[derive(Debug, Clone, FromRow)]
pub struct SaleTransition {
    #[sqlx(flatten)]
    pub sale: Sale,
    pub previous_stage: SaleStage,
}

/// Resposta de criação/atualização: a venda e o que aconteceu com o pós-venda.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdate {
    pub sale: Sale,
    pub follow_up: FollowUpOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_use_snake_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&SaleStage::FollowUp).unwrap(), "\"follow_up\"");
    }

    #[test]
    fn portuguese_stage_names_are_accepted() {
        let stage: SaleStage = serde_json::from_str("\"acompanhamento\"").unwrap();
        assert_eq!(stage, SaleStage::FollowUp);
        let stage: SaleStage = serde_json::from_str("\"negociacao\"").unwrap();
        assert_eq!(stage, SaleStage::Negotiation);
    }

    #[test]
    fn only_closing_and_follow_up_are_realized() {
        assert!(!SaleStage::Registration.is_realized());
        assert!(!SaleStage::Negotiation.is_realized());
        assert!(SaleStage::Closing.is_realized());
        assert!(SaleStage::FollowUp.is_realized());
    }
}
