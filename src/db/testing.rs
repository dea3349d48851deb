// src/db/testing.rs
//
// Banco real para testes de SQL. Sem TEST_DATABASE_URL (ou DATABASE_URL) os
// testes que dependem dele retornam cedo. Cada chamada cria um schema próprio
// e roda as migrações nele, então os testes não se enxergam.

use std::str::FromStr;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use uuid::Uuid;

pub async fn isolated_pool() -> Option<PgPool> {
    let Some(url) = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
    else {
        eprintln!("TEST_DATABASE_URL não definida; pulando teste de banco");
        return None;
    };

    let schema = format!("teste_{}", Uuid::new_v4().simple());
    let admin = PgPool::connect(&url).await.expect("conexão com o banco de teste");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("criação do schema de teste");
    admin.close().await;

    let options = PgConnectOptions::from_str(&url)
        .expect("TEST_DATABASE_URL válida")
        .options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .expect("pool do schema de teste");

    sqlx::migrate!().run(&pool).await.expect("migrações no schema de teste");
    Some(pool)
}

/// Dono válido para a FK de `sales.owner_id`.
pub async fn seed_owner(pool: &PgPool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (id, name, email, role) VALUES ($1, 'Dono', $2, 'admin') RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(format!("dono-{}@vendas.com", Uuid::new_v4().simple()))
    .fetch_one(pool)
    .await
    .expect("dono de teste")
}

pub async fn seed_sale(
    pool: &PgPool,
    owner_id: Uuid,
    salesperson_id: i32,
    value: rust_decimal::Decimal,
    stage: crate::models::sales::SaleStage,
) {
    sqlx::query(
        r#"
        INSERT INTO sales (id, client_name, value, stage, salesperson_id, owner_id)
        VALUES ($1, 'Cliente', $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(value)
    .bind(stage)
    .bind(salesperson_id)
    .bind(owner_id)
    .execute(pool)
    .await
    .expect("venda de teste");
}
