// src/services/stock_service.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::StockRepository,
    models::inventory::{MovementType, StockRecord},
};

#[derive(Clone)]
pub struct StockService {
    stock_repo: StockRepository,
}

impl StockService {
    pub fn new(stock_repo: StockRepository) -> Self {
        Self { stock_repo }
    }

    /// Aplica uma movimentação ao saldo do produto.
    ///
    /// Recebe a conexão da transação do fluxo chamador: a leitura usa
    /// FOR UPDATE, então dois fluxos concorrentes sobre o mesmo produto
    /// serializam aqui e o segundo revalida contra o saldo já commitado.
    pub async fn apply_movement(
        &self,
        conn: &mut PgConnection,
        product_id: Uuid,
        quantity: i32,
        movement_type: MovementType,
    ) -> Result<StockRecord, AppError> {
        let existing = self
            .stock_repo
            .find_by_product_for_update(&mut *conn, product_id)
            .await?;

        match existing {
            // Primeira movimentação do produto: o saldo nasce com a
            // quantidade recebida (a direção é ignorada na criação).
            None => self.stock_repo.create(&mut *conn, product_id, quantity).await,
            Some(stock) => {
                let new_quantity = next_quantity(stock.quantity, quantity, movement_type).ok_or(
                    AppError::InsufficientStock {
                        product_id,
                        requested: quantity,
                        available: stock.quantity,
                    },
                )?;
                self.stock_repo
                    .update_quantity(&mut *conn, product_id, new_quantity)
                    .await
            }
        }
    }
}

// Aritmética do saldo, separada para teste.
// IN soma, OUT subtrai; um resultado negativo é rejeitado sem alterar nada.
// A soma é checada: um estouro de i32 também rejeita a movimentação em vez
// de dar panic ou dar a volta. ADJUSTMENT não passa pelos fluxos de
// compra/venda e não altera o saldo aqui: correções manuais têm caminho
// administrativo próprio.
fn next_quantity(current: i32, quantity: i32, movement_type: MovementType) -> Option<i32> {
    let next = match movement_type {
        MovementType::In => current.checked_add(quantity)?,
        MovementType::Out => current.checked_sub(quantity)?,
        MovementType::Adjustment => current,
    };
    (next >= 0).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_adds_to_current_quantity() {
        assert_eq!(next_quantity(10, 5, MovementType::In), Some(15));
    }

    #[test]
    fn out_subtracts_from_current_quantity() {
        assert_eq!(next_quantity(15, 12, MovementType::Out), Some(3));
    }

    #[test]
    fn out_to_exactly_zero_is_allowed() {
        assert_eq!(next_quantity(12, 12, MovementType::Out), Some(0));
    }

    #[test]
    fn out_below_zero_is_rejected() {
        assert_eq!(next_quantity(3, 10, MovementType::Out), None);
    }

    #[test]
    fn in_beyond_i32_max_is_rejected() {
        assert_eq!(next_quantity(i32::MAX, 1, MovementType::In), None);
        assert_eq!(next_quantity(i32::MAX - 5, 5, MovementType::In), Some(i32::MAX));
    }

    #[test]
    fn adjustment_leaves_quantity_unchanged() {
        assert_eq!(next_quantity(7, 99, MovementType::Adjustment), Some(7));
    }
}
