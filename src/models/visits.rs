// src/models/visits.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::notifications::Notification;

// Visita pós-venda. Criada só pelo agendador; depois pode ter a data trocada.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: Uuid,
    #[serde(rename = "date")]
    pub scheduled_at: DateTime<Utc>,
    #[schema(example = "Padaria Central")]
    pub client_name: String,
    #[schema(example = 1)]
    pub salesperson_id: i32,
    pub sale_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A notificação é secundária: se falhar, a visita continua valendo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum NotificationDelivery {
    Sent { notification: Notification },
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledVisit {
    pub visit: Visit,
    pub notification: NotificationDelivery,
}

// O que o gatilho de etapa fez com o pós-venda
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum FollowUpOutcome {
    NotTriggered,
    AlreadyScheduled {
        visit: Visit,
    },
    Scheduled {
        visit: Visit,
        notification: NotificationDelivery,
    },
    Failed {
        reason: String,
    },
}

impl From<ScheduledVisit> for FollowUpOutcome {
    fn from(scheduled: ScheduledVisit) -> Self {
        FollowUpOutcome::Scheduled {
            visit: scheduled.visit,
            notification: scheduled.notification,
        }
    }
}
