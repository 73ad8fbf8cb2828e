// src/db/purchase_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::inventory::Purchase};

// Acesso à tabela 'purchases' (histórico de compras / fila FIFO de custos).
#[derive(Clone, Default)]
pub struct PurchaseRepository;

impl PurchaseRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        supplier_id: Uuid,
        unit_cost: Decimal,
        quantity: i32,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (product_id, supplier_id, unit_cost, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(supplier_id)
        .bind(unit_cost)
        .bind(quantity)
        .fetch_one(executor)
        .await?;
        Ok(purchase)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>("SELECT * FROM purchases WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(purchase)
    }

    // Fila FIFO do custeio: compras mais antigas primeiro. O desempate por
    // id mantém a caminhada determinística quando duas compras compartilham
    // o mesmo timestamp.
    pub async fn list_by_product_oldest_first<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Vec<Purchase>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchases = sqlx::query_as::<_, Purchase>(
            "SELECT * FROM purchases WHERE product_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(product_id)
        .fetch_all(executor)
        .await?;
        Ok(purchases)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
