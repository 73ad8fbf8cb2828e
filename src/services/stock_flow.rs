// src/services/stock_flow.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::MovementType,
    services::{MovementService, StockService},
};

/// Sequência compartilhada pelos fluxos de compra e venda: ajusta o saldo
/// e, só depois, grava a entrada no livro-razão. A ordem importa: a checagem
/// de saldo negativo precisa ver o estado do ledger antes da nova entrada.
pub(crate) async fn apply_movement_flow(
    stock_service: &StockService,
    movement_service: &MovementService,
    conn: &mut PgConnection,
    product_id: Uuid,
    quantity: i32,
    movement_type: MovementType,
    reference_id: Option<Uuid>,
    note: &str,
) -> Result<(), AppError> {
    stock_service
        .apply_movement(&mut *conn, product_id, quantity, movement_type)
        .await?;

    movement_service
        .record(&mut *conn, product_id, quantity, movement_type, reference_id, note)
        .await?;

    Ok(())
}
