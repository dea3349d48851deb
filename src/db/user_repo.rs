// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email<'e, E>(&self, executor: E, email: &str) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Próximo salespersonId livre (maior atual + 1).
    ///
    /// Olha todos os usuários: quem virou admin continua com o número antigo.
    pub async fn next_salesperson_id<'e, E>(&self, executor: E) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let next = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(salesperson_id), 0) + 1 FROM users",
        )
        .fetch_one(executor)
        .await?;

        Ok(next)
    }

    /// Cria ou atualiza pelo e-mail. Um salespersonId já existente é mantido.
    pub async fn upsert_user<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        role: UserRole,
        salesperson_id: Option<i32>,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, role, salesperson_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO UPDATE
            SET name = EXCLUDED.name,
                role = EXCLUDED.role,
                salesperson_id = COALESCE(users.salesperson_id, EXCLUDED.salesperson_id),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(salesperson_id)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    pub async fn list_salespeople<'e, E>(&self, executor: E) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE role = 'seller' AND salesperson_id IS NOT NULL
            ORDER BY salesperson_id ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(users)
    }
}
