// src/services/visit_scheduler.rs
//
// Agendamento automático de visitas pós-venda.
//
// Quando uma venda entra em "acompanhamento", procuramos o primeiro dia útil a
// partir de amanhã em que o vendedor ainda tem vaga, gravamos a visita e
// avisamos o vendedor. Padrão: 2 visitas/dia, janela de 30 dias, sem domingo.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc, Weekday};
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{NotificationStore, VisitStore},
    models::{
        notifications::Notification,
        sales::{Sale, SaleStage},
        visits::{FollowUpOutcome, NotificationDelivery, ScheduledVisit, Visit},
    },
};

/// Regras da agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerPolicy {
    /// Visitas por vendedor por dia.
    pub daily_capacity: u32,
    /// Dias corridos avaliados a partir de amanhã.
    pub window_days: u32,
    pub rest_day: Weekday,
}

impl Default for SchedulerPolicy {
    fn default() -> Self {
        Self {
            daily_capacity: 2,
            window_days: 30,
            rest_day: Weekday::Sun,
        }
    }
}

#[derive(Clone)]
pub struct VisitScheduler {
    visits: Arc<dyn VisitStore>,
    notifications: Arc<dyn NotificationStore>,
    clock: Arc<dyn Clock>,
    policy: SchedulerPolicy,
}

impl VisitScheduler {
    pub fn new(
        visits: Arc<dyn VisitStore>,
        notifications: Arc<dyn NotificationStore>,
        clock: Arc<dyn Clock>,
        policy: SchedulerPolicy,
    ) -> Self {
        Self {
            visits,
            notifications,
            clock,
            policy,
        }
    }

    /// Dias candidatos, em ordem: amanhã .. hoje + janela, sem o dia de folga.
    pub fn candidate_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let today = self.clock.today();
        let rest_day = self.policy.rest_day;

        (1..=u64::from(self.policy.window_days))
            .filter_map(move |offset| today.checked_add_days(Days::new(offset)))
            .filter(move |day| day.weekday() != rest_day)
    }

    // =========================================================================
    //  AGENDAMENTO
    // =========================================================================

    /// Agenda a visita no primeiro dia com vaga e cria a notificação.
    ///
    /// Sem vaga na janela: `SchedulingExhausted`, e nada é gravado.
    /// Se só a notificação falhar, a visita fica e o retorno diz o motivo.
    pub async fn schedule_visit(
        &self,
        client_name: &str,
        salesperson_id: i32,
        sale_id: Uuid,
    ) -> Result<ScheduledVisit, AppError> {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(AppError::InvalidInput("clientName must not be empty".to_string()));
        }
        if salesperson_id <= 0 {
            return Err(AppError::InvalidInput(
                "salespersonId must be a positive integer".to_string(),
            ));
        }

        let capacity = self.policy.daily_capacity;

        for day in self.candidate_days() {
            let booked = self
                .visits
                .count_by_day_and_salesperson(day, salesperson_id)
                .await?;
            if booked >= i64::from(capacity) {
                continue;
            }

            let now = self.clock.now();
            let candidate = Visit {
                id: Uuid::new_v4(),
                scheduled_at: day.and_time(NaiveTime::MIN).and_utc(),
                client_name: client_name.to_string(),
                salesperson_id,
                sale_id,
                created_at: now,
                updated_at: now,
            };

            // A contagem acima pode ter ficado velha; o store confere de novo
            let Some(visit) = self.visits.insert_within_capacity(&candidate, capacity).await? else {
                tracing::debug!(%day, salesperson_id, "dia lotou entre a contagem e a gravação");
                continue;
            };

            tracing::info!(
                visit_id = %visit.id,
                %sale_id,
                salesperson_id,
                %day,
                "visita pós-venda agendada"
            );

            let notification = self.notify(&visit).await;
            return Ok(ScheduledVisit { visit, notification });
        }

        tracing::warn!(
            salesperson_id,
            %sale_id,
            window_days = self.policy.window_days,
            "nenhuma vaga para visita na janela"
        );
        Err(AppError::SchedulingExhausted {
            window_days: self.policy.window_days,
        })
    }

    async fn notify(&self, visit: &Visit) -> NotificationDelivery {
        let notification = Notification::visit_scheduled(visit, self.clock.now());

        match self.notifications.insert(&notification).await {
            Ok(notification) => NotificationDelivery::Sent { notification },
            Err(e) => {
                tracing::warn!(visit_id = %visit.id, "falha ao gravar notificação da visita: {}", e);
                NotificationDelivery::Failed { reason: e.to_string() }
            }
        }
    }

    // =========================================================================
    //  GATILHO DE ETAPA
    // =========================================================================

    /// Dispara o agendamento só na borda "entrou em acompanhamento".
    ///
    /// Nunca devolve erro: a mudança de etapa já foi gravada e vale por si.
    /// `previous_stage` é `None` quando a venda acabou de ser criada.
    pub async fn maybe_auto_schedule(
        &self,
        sale: &Sale,
        new_stage: SaleStage,
        previous_stage: Option<SaleStage>,
    ) -> FollowUpOutcome {
        if new_stage != SaleStage::FollowUp || previous_stage == Some(SaleStage::FollowUp) {
            return FollowUpOutcome::NotTriggered;
        }

        match self.visits.find_by_sale_id(sale.id).await {
            Ok(Some(visit)) => return FollowUpOutcome::AlreadyScheduled { visit },
            Ok(None) => {}
            Err(e) => return self.auto_schedule_failed(sale, e),
        }

        match self
            .schedule_visit(&sale.client_name, sale.salesperson_id, sale.id)
            .await
        {
            Ok(scheduled) => scheduled.into(),
            // Outra requisição agendou esta venda no meio do caminho
            Err(AppError::VisitAlreadyScheduled(_)) => {
                match self.visits.find_by_sale_id(sale.id).await {
                    Ok(Some(visit)) => FollowUpOutcome::AlreadyScheduled { visit },
                    Ok(None) => self.auto_schedule_failed(sale, AppError::VisitAlreadyScheduled(sale.id)),
                    Err(e) => self.auto_schedule_failed(sale, e),
                }
            }
            Err(e) => self.auto_schedule_failed(sale, e),
        }
    }

    fn auto_schedule_failed(&self, sale: &Sale, error: AppError) -> FollowUpOutcome {
        tracing::warn!(
            sale_id = %sale.id,
            salesperson_id = sale.salesperson_id,
            "agendamento automático falhou, etapa mantida: {}",
            error
        );
        FollowUpOutcome::Failed {
            reason: error.to_string(),
        }
    }

    // =========================================================================
    //  CONSULTA E REAGENDAMENTO
    // =========================================================================

    /// Troca só a data. Capacidade e folga não são checadas (ajuste manual).
    pub async fn reschedule_visit(
        &self,
        visit_id: Uuid,
        new_date: DateTime<Utc>,
    ) -> Result<Visit, AppError> {
        let visit = self
            .visits
            .update_date(visit_id, new_date, self.clock.now())
            .await?
            .ok_or(AppError::VisitNotFound(visit_id))?;

        tracing::info!(%visit_id, date = %new_date, "visita reagendada");
        Ok(visit)
    }

    pub async fn list_visits(&self, salesperson_id: Option<i32>) -> Result<Vec<Visit>, AppError> {
        self.visits.list(salesperson_id).await
    }

    pub async fn find_by_sale_id(&self, sale_id: Uuid) -> Result<Option<Visit>, AppError> {
        self.visits.find_by_sale_id(sale_id).await
    }
}
