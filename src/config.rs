// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::{
        clock::{Clock, SystemClock},
        i18n::I18nStore,
    },
    db::{
        DashboardRepository, GoalRepository, NotificationRepository, NotificationStore,
        SaleStore, SalesRepository, UserRepository, VisitRepository, VisitStore,
    },
    services::{
        auth::AuthService,
        dashboard_service::DashboardService,
        goals_service::GoalsService,
        notification_service::NotificationService,
        sales_service::SalesService,
        visit_scheduler::{SchedulerPolicy, VisitScheduler},
    },
};

const MAX_VISIT_WINDOW_DAYS: u32 = 366;

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub visit_daily_capacity: u32,
    pub visit_window_days: u32,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let visit_daily_capacity: u32 = parse_or(&lookup, "VISIT_DAILY_CAPACITY", 2)?;
        anyhow::ensure!(
            visit_daily_capacity >= 1,
            "VISIT_DAILY_CAPACITY deve ser pelo menos 1"
        );

        // Cada dia da janela custa uma consulta de contagem
        let visit_window_days: u32 = parse_or(&lookup, "VISIT_WINDOW_DAYS", 30)?;
        anyhow::ensure!(
            (1..=MAX_VISIT_WINDOW_DAYS).contains(&visit_window_days),
            "VISIT_WINDOW_DAYS deve estar entre 1 e {MAX_VISIT_WINDOW_DAYS}, veio {visit_window_days}"
        );

        Ok(Self {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3001".to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            visit_daily_capacity,
            visit_window_days,
        })
    }

    pub fn scheduler_policy(&self) -> SchedulerPolicy {
        SchedulerPolicy {
            daily_capacity: self.visit_daily_capacity,
            window_days: self.visit_window_days,
            ..SchedulerPolicy::default()
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} inválida: {raw:?}")),
        None => Ok(default),
    }
}

/// Os três stores usados pelo agendador e pelas vendas.
#[derive(Clone)]
pub struct Stores {
    pub sales: Arc<dyn SaleStore>,
    pub visits: Arc<dyn VisitStore>,
    pub notifications: Arc<dyn NotificationStore>,
}

impl Stores {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            sales: Arc::new(SalesRepository::new(pool.clone())),
            visits: Arc::new(VisitRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub sales_service: SalesService,
    pub visit_scheduler: VisitScheduler,
    pub notification_service: NotificationService,
    pub goals_service: GoalsService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let stores = Stores::postgres(&db_pool);
        Ok(Self::from_parts(
            db_pool,
            stores,
            Arc::new(SystemClock),
            settings.scheduler_policy(),
        ))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(
        db_pool: PgPool,
        stores: Stores,
        clock: Arc<dyn Clock>,
        policy: SchedulerPolicy,
    ) -> Self {
        let visit_scheduler = VisitScheduler::new(
            stores.visits.clone(),
            stores.notifications.clone(),
            clock.clone(),
            policy,
        );
        let sales_service = SalesService::new(stores.sales.clone(), visit_scheduler.clone(), clock);

        Self {
            auth_service: AuthService::new(UserRepository::new(db_pool.clone())),
            notification_service: NotificationService::new(stores.notifications),
            goals_service: GoalsService::new(GoalRepository::new()),
            dashboard_service: DashboardService::new(DashboardRepository::new()),
            i18n_store: I18nStore::new(),
            sales_service,
            visit_scheduler,
            db_pool,
        }
    }
}
