//src/main.rs

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG manda; sem ele, info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = build_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Inicia o servidor
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn build_router(app_state: AppState) -> Router {
    // Usuários (sem senha nem token)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/salespeople", get(handlers::auth::list_salespeople));

    let sales_routes = Router::new()
        .route("/"
               ,post(handlers::sales::create_sale)
               .get(handlers::sales::list_sales)
        )
        .route("/{id}"
               ,get(handlers::sales::get_sale)
               .patch(handlers::sales::update_sale)
               .delete(handlers::sales::delete_sale)
        );

    let goals_routes = Router::new()
        .route("/", get(handlers::goals::list_goals))
        .route("/general", put(handlers::goals::set_general_goal))
        .route("/{salesperson_id}", put(handlers::goals::set_salesperson_goal));

    // Agenda pós-venda
    let visit_routes = Router::new()
        .route("/", get(handlers::visits::list_visits))
        .route("/schedule", post(handlers::visits::schedule_visit))
        .route("/by-sale/{sale_id}", get(handlers::visits::get_visit_by_sale))
        .route("/{id}", patch(handlers::visits::reschedule_visit));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route("/{id}/read", patch(handlers::notifications::mark_read));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/ranking", get(handlers::dashboard::get_ranking))
        .route("/api/dashboard/summary", get(handlers::dashboard::get_summary))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/sales", sales_routes)
        .nest("/api/goals", goals_routes)
        .nest("/api/visits", visit_routes)
        .nest("/api/notifications", notification_routes)
        .with_state(app_state)
}
