// src/services/movement_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::MovementRepository,
    models::inventory::{MovementType, StockMovement},
};

// Gravador do livro-razão: só escreve, nunca lê entradas anteriores.
// A agregação de leitura é um problema de relatórios, fora do núcleo.
#[derive(Clone)]
pub struct MovementService {
    movement_repo: MovementRepository,
}

impl MovementService {
    pub fn new(movement_repo: MovementRepository) -> Self {
        Self { movement_repo }
    }

    pub async fn record<'e, E>(
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
        self.movement_repo
            .create(executor, product_id, quantity, movement_type, reference_id, note)
            .await
    }
}
