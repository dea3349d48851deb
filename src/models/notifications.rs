// src/models/notifications.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::visits::Visit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Sale,
    Stage,
    User,
    Visit,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[schema(example = "New visit scheduled")]
    pub title: String,
    pub description: String,
    /// salespersonId em texto
    #[schema(example = "1")]
    pub user_id: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn visit_scheduled(visit: &Visit, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: NotificationKind::Visit,
            title: "New visit scheduled".to_string(),
            description: format!(
                "Visit with {} scheduled for {}",
                visit.client_name,
                visit.scheduled_at.format("%d/%m/%Y")
            ),
            user_id: visit.salesperson_id.to_string(),
            read: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn visit_notification_is_addressed_to_the_salesperson() {
        let day = Utc.with_ymd_and_hms(2026, 3, 9, 0, 0, 0).unwrap();
        let visit = Visit {
            id: Uuid::new_v4(),
            scheduled_at: day,
            client_name: "Padaria Central".to_string(),
            salesperson_id: 4,
            sale_id: Uuid::new_v4(),
            created_at: day,
            updated_at: day,
        };

        let n = Notification::visit_scheduled(&visit, day);

        assert_eq!(n.kind, NotificationKind::Visit);
        assert_eq!(n.title, "New visit scheduled");
        assert_eq!(n.description, "Visit with Padaria Central scheduled for 09/03/2026");
        assert_eq!(n.user_id, "4");
        assert!(!n.read);
    }

    #[test]
    fn kind_is_serialized_as_type() {
        let n = Notification {
            id: Uuid::nil(),
            kind: NotificationKind::Visit,
            title: String::new(),
            description: String::new(),
            user_id: "1".to_string(),
            read: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "visit");
        assert_eq!(json["userId"], "1");
    }
}
