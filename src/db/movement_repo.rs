// src/db/movement_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{MovementType, StockMovement},
};

// Acesso à tabela 'stock_movements'. Somente INSERT: o livro-razão é
// imutável e o lado de leitura (relatórios) vive em outra camada.
#[derive(Clone, Default)]
pub struct MovementRepository;

impl MovementRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
        movement_type: MovementType,
        reference_id: Option<Uuid>,
        note: &str,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (product_id, quantity, movement_type, reference_id, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(movement_type)
        .bind(reference_id)
        .bind(note)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }
}
