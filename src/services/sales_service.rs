// src/services/sales_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    db::SaleStore,
    models::{
        sales::{Sale, SaleChanges, SaleStage, SaleUpdate},
        visits::FollowUpOutcome,
    },
    services::visit_scheduler::VisitScheduler,
};

#[derive(Clone)]
pub struct SalesService {
    sales: Arc<dyn SaleStore>,
    scheduler: VisitScheduler,
    clock: Arc<dyn Clock>,
}

impl SalesService {
    pub fn new(sales: Arc<dyn SaleStore>, scheduler: VisitScheduler, clock: Arc<dyn Clock>) -> Self {
        Self {
            sales,
            scheduler,
            clock,
        }
    }

    // --- CADASTRO ---

    pub async fn create_sale(
        &self,
        client_name: &str,
        value: Decimal,
        stage: Option<SaleStage>,
        salesperson_id: i32,
        description: Option<&str>,
        owner_id: Uuid,
    ) -> Result<SaleUpdate, AppError> {
        ensure_valid_value(value)?;
        if salesperson_id <= 0 {
            return Err(AppError::InvalidInput(
                "salespersonId must be a positive integer".to_string(),
            ));
        }

        let now = self.clock.now();
        let sale = Sale {
            id: Uuid::new_v4(),
            client_name: client_name.trim().to_string(),
            value,
            stage: stage.unwrap_or_default(),
            salesperson_id,
            description: description.map(str::to_string),
            owner_id,
            created_at: now,
            updated_at: now,
        };

        let sale = self.sales.insert(&sale).await?;
        tracing::info!(sale_id = %sale.id, salesperson_id, stage = ?sale.stage, "venda cadastrada");

        // Venda que já nasce em acompanhamento também ganha a visita
        let follow_up = self.scheduler.maybe_auto_schedule(&sale, sale.stage, None).await;

        Ok(SaleUpdate { sale, follow_up })
    }

    pub async fn list_sales(&self, salesperson_id: Option<i32>) -> Result<Vec<Sale>, AppError> {
        self.sales.list(salesperson_id).await
    }

    pub async fn get_sale(&self, id: Uuid) -> Result<Sale, AppError> {
        self.sales.find_by_id(id).await?.ok_or(AppError::SaleNotFound(id))
    }

    // --- MOVIMENTAÇÃO NO FUNIL ---

    /// Grava a nova etapa/valor e roda o gatilho de pós-venda.
    ///
    /// Falha no agendamento não desfaz a mudança; ela volta em `follow_up`.
    pub async fn update_sale(&self, id: Uuid, changes: SaleChanges) -> Result<SaleUpdate, AppError> {
        if changes.is_empty() {
            return Err(AppError::EmptySaleUpdate);
        }
        if let Some(value) = changes.value {
            ensure_valid_value(value)?;
        }

        let transition = self
            .sales
            .update(id, &changes, self.clock.now())
            .await?
            .ok_or(AppError::SaleNotFound(id))?;

        let sale = transition.sale;
        let follow_up = match changes.stage {
            Some(new_stage) => {
                if new_stage != transition.previous_stage {
                    tracing::info!(
                        sale_id = %sale.id,
                        from = ?transition.previous_stage,
                        to = ?new_stage,
                        "venda mudou de etapa"
                    );
                }
                self.scheduler
                    .maybe_auto_schedule(&sale, new_stage, Some(transition.previous_stage))
                    .await
            }
            None => FollowUpOutcome::NotTriggered,
        };

        Ok(SaleUpdate { sale, follow_up })
    }

    pub async fn delete_sale(&self, id: Uuid) -> Result<(), AppError> {
        if !self.sales.delete(id).await? {
            return Err(AppError::SaleNotFound(id));
        }
        tracing::info!(sale_id = %id, "venda removida");
        Ok(())
    }
}

fn ensure_valid_value(value: Decimal) -> Result<(), AppError> {
    if value.is_sign_negative() {
        return Err(AppError::InvalidInput("value must not be negative".to_string()));
    }
    Ok(())
}
