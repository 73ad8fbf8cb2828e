// src/services/costing_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PurchaseRepository, StockRepository},
    models::inventory::Purchase,
};

#[derive(Clone)]
pub struct CostingService {
    stock_repo: StockRepository,
    purchase_repo: PurchaseRepository,
}

impl CostingService {
    pub fn new(stock_repo: StockRepository, purchase_repo: PurchaseRepository) -> Self {
        Self {
            stock_repo,
            purchase_repo,
        }
    }

    /// Custo médio FIFO e saldo atual de um produto.
    ///
    /// O modelo é "as compras mais antigas ainda estão na prateleira": a
    /// caminhada consome a fila de compras (mais antigas primeiro) até
    /// cobrir exatamente o saldo atual, e o custo médio sai dessa fatia.
    /// Sem saldo (ou sem registro) não há base de custo: retorna (0, 0).
    ///
    /// Aceita pool, conexão ou transação; dentro de uma venda roda na
    /// transação do fluxo.
    pub async fn average_cost_and_stock<'a, A>(
        &self,
        acquirable: A,
        product_id: Uuid,
    ) -> Result<(Decimal, i32), AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut conn = acquirable.acquire().await?;

        let Some(stock) = self.stock_repo.find_by_product(&mut *conn, product_id).await? else {
            return Ok((Decimal::ZERO, 0));
        };
        if stock.quantity <= 0 {
            return Ok((Decimal::ZERO, 0));
        }

        let purchases = self
            .purchase_repo
            .list_by_product_oldest_first(&mut *conn, product_id)
            .await?;

        Ok((fifo_average_cost(stock.quantity, &purchases), stock.quantity))
    }
}

/// Média ponderada FIFO: consome da fila de compras (já ordenada da mais
/// antiga para a mais nova) no máximo `stock_quantity` unidades e divide o
/// custo acumulado pelo saldo. Recalculada do zero a cada chamada; o
/// histórico de compras é tratado como completo e imutável.
pub fn fifo_average_cost(stock_quantity: i32, purchases: &[Purchase]) -> Decimal {
    if stock_quantity <= 0 {
        return Decimal::ZERO;
    }

    let mut total_cost = Decimal::ZERO;
    let mut remaining = stock_quantity;

    for purchase in purchases {
        if remaining <= 0 {
            break;
        }
        let consumed = purchase.quantity.min(remaining);
        total_cost += Decimal::from(consumed) * purchase.unit_cost;
        remaining -= consumed;
    }

    total_cost / Decimal::from(stock_quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn purchase(unit_cost: Decimal, quantity: i32) -> Purchase {
        Purchase {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            unit_cost,
            quantity,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn zero_stock_has_no_cost_basis() {
        assert_eq!(fifo_average_cost(0, &[]), Decimal::ZERO);
        assert_eq!(fifo_average_cost(0, &[purchase(dec!(5.00), 10)]), Decimal::ZERO);
    }

    #[test]
    fn weighted_average_over_full_history() {
        // 10 un @ 5.00 + 5 un @ 8.00, saldo 15 -> 90.00 / 15 = 6.00
        let history = [purchase(dec!(5.00), 10), purchase(dec!(8.00), 5)];
        assert_eq!(fifo_average_cost(15, &history), dec!(6.00));
    }

    #[test]
    fn consumes_oldest_purchases_first() {
        // Saldo 3 com histórico [10 @ 5.00, 5 @ 8.00]: só a compra mais
        // antiga cobre o que resta na prateleira.
        let history = [purchase(dec!(5.00), 10), purchase(dec!(8.00), 5)];
        assert_eq!(fifo_average_cost(3, &history), dec!(5.00));
    }

    #[test]
    fn partial_consumption_of_second_purchase() {
        // Saldo 12: 10 @ 5.00 + 2 @ 8.00 = 66.00 / 12 = 5.50
        let history = [purchase(dec!(5.00), 10), purchase(dec!(8.00), 5)];
        assert_eq!(fifo_average_cost(12, &history), dec!(5.50));
    }

    #[test]
    fn stock_beyond_history_dilutes_the_average() {
        // A fila se esgota antes do saldo: o custo acumulado é dividido
        // pelo saldo inteiro mesmo assim.
        let history = [purchase(dec!(5.00), 10)];
        assert_eq!(fifo_average_cost(20, &history), dec!(2.50));
    }

    #[test]
    fn recomputation_is_deterministic() {
        let history = [purchase(dec!(5.00), 10), purchase(dec!(8.00), 5)];
        let first = fifo_average_cost(15, &history);
        let second = fifo_average_cost(15, &history);
        assert_eq!(first, second);
    }

    #[test]
    fn replay_of_purchase_and_sale_sequence() {
        // Cenários B -> E da vida do produto, sobre o histórico em memória:
        // compra 10 @ 5.00, compra 5 @ 8.00, venda de 12, estorno da venda.
        let history = [purchase(dec!(5.00), 10), purchase(dec!(8.00), 5)];

        let mut stock = 15;
        assert_eq!(fifo_average_cost(stock, &history), dec!(6.00));

        // Venda de 12 unidades: saldo cai para 3 e o custo médio passa a
        // refletir só a compra mais antiga ainda na prateleira.
        stock -= 12;
        assert_eq!(stock, 3);
        assert_eq!(fifo_average_cost(stock, &history), dec!(5.00));

        // Estorno da venda: saldo e custo médio voltam ao valor anterior.
        stock += 12;
        assert_eq!(fifo_average_cost(stock, &history), dec!(6.00));
    }
}
