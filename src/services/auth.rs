// src/services/auth.rs
//
// "Autenticação" por e-mail: não há senha verificada nem token.

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Cria ou atualiza pelo e-mail. Vendedor novo recebe o próximo salespersonId.
    pub async fn register_user(&self, name: &str, email: &str, role: UserRole) -> Result<User, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.user_repo.pool().begin().await?;

        // Dois cadastros simultâneos não podem pegar o mesmo número
        sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let salesperson_id = match role {
            UserRole::Seller => Some(self.user_repo.next_salesperson_id(&mut *tx).await?),
            UserRole::Admin => None,
        };

        let user = self
            .user_repo
            .upsert_user(&mut *tx, name.trim(), email, role, salesperson_id)
            .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = ?user.role, salesperson_id = ?user.salesperson_id, "usuário registrado");
        Ok(user)
    }

    pub async fn login_user<'e, E>(&self, executor: E, email: &str) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.user_repo
            .find_by_email(executor, email)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn list_salespeople<'e, E>(&self, executor: E) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.user_repo.list_salespeople(executor).await
    }
}
