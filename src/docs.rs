// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::list_salespeople,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_ranking,

        // --- Goals ---
        handlers::goals::list_goals,
        handlers::goals::set_general_goal,
        handlers::goals::set_salesperson_goal,

        // --- Visits ---
        handlers::visits::schedule_visit,
        handlers::visits::list_visits,
        handlers::visits::get_visit_by_sale,
        handlers::visits::reschedule_visit,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_read,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,

            // --- Sales ---
            models::sales::SaleStage,
            models::sales::Sale,
            models::sales::SaleUpdate,
            handlers::sales::CreateSalePayload,
            handlers::sales::UpdateSalePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::RankingEntry,

            // --- Goals ---
            models::goals::SalesGoal,
            models::goals::UpsertGoalPayload,
            models::goals::GoalProgress,

            // --- Visits ---
            models::visits::Visit,
            models::visits::ScheduledVisit,
            models::visits::NotificationDelivery,
            models::visits::FollowUpOutcome,
            handlers::visits::ScheduleVisitPayload,
            handlers::visits::RescheduleVisitPayload,

            // --- Notifications ---
            models::notifications::NotificationKind,
            models::notifications::Notification,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro e login por e-mail"),
        (name = "Users", description = "Vendedores"),
        (name = "Sales", description = "Funil de vendas"),
        (name = "Dashboard", description = "Ranking e indicadores"),
        (name = "Goals", description = "Metas de receita"),
        (name = "Visits", description = "Agenda de visitas pós-venda"),
        (name = "Notifications", description = "Avisos por usuário")
    )
)]
pub struct ApiDoc;
