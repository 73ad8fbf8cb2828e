// src/services/sale_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Postgres};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, SaleRepository},
    models::inventory::{MovementType, NewSale, Sale},
    services::{stock_flow::apply_movement_flow, CostingService, MovementService, StockService},
};

pub const NOTE_NEW_SALE: &str = "Nova venda";
pub const NOTE_SALE_RETURN: &str = "Devolução de venda";

#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    catalog_repo: CatalogRepository,
    costing_service: CostingService,
    stock_service: StockService,
    movement_service: MovementService,
}

impl SaleService {
    pub fn new(
        sale_repo: SaleRepository,
        catalog_repo: CatalogRepository,
        costing_service: CostingService,
        stock_service: StockService,
        movement_service: MovementService,
    ) -> Self {
        Self {
            sale_repo,
            catalog_repo,
            costing_service,
            stock_service,
            movement_service,
        }
    }

    /// Registra uma venda: precifica a partir do custo médio FIFO e da
    /// margem do produto, congela o custo no registro e reflete a saída no
    /// saldo e no livro-razão, tudo em uma transação.
    pub async fn create_sale<'a, A>(&self, acquirable: A, request: NewSale) -> Result<Sale, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        request.validate()?;

        let mut tx = acquirable.begin().await?;

        let product = self
            .catalog_repo
            .find_product(&mut *tx, request.product_id)
            .await?
            .ok_or(AppError::ProductNotFound(request.product_id))?;
        self.catalog_repo
            .find_customer(&mut *tx, request.customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(request.customer_id))?;

        // Checagem de disponibilidade com contexto para o chamador. A
        // garantia final contra corrida fica na saída do ledger, que lê o
        // saldo com FOR UPDATE dentro desta mesma transação.
        let (average_cost, available) = self
            .costing_service
            .average_cost_and_stock(&mut *tx, request.product_id)
            .await?;
        if available < request.quantity {
            return Err(AppError::InsufficientStock {
                product_id: request.product_id,
                requested: request.quantity,
                available,
            });
        }

        let unit_price = sale_unit_price(average_cost, product.profit_margin);

        // unit_price e average_cost ficam congelados no registro da venda;
        // compras posteriores não os alteram.
        let sale = self
            .sale_repo
            .create(
                &mut *tx,
                request.product_id,
                request.customer_id,
                request.quantity,
                unit_price,
                average_cost.round_dp(2),
            )
            .await?;

        apply_movement_flow(
            &self.stock_service,
            &self.movement_service,
            &mut *tx,
            sale.product_id,
            sale.quantity,
            MovementType::Out,
            Some(sale.id),
            NOTE_NEW_SALE,
        )
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Venda {} registrada: produto {}, {} un @ {}",
            sale.id,
            sale.product_id,
            sale.quantity,
            sale.unit_price
        );
        Ok(sale)
    }

    /// Apaga uma venda devolvendo as unidades ao saldo. A entrada de
    /// estorno é uma nova linha no livro-razão; a saída original permanece.
    pub async fn delete_sale<'a, A>(&self, acquirable: A, id: Uuid) -> Result<Sale, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = acquirable.begin().await?;

        let sale = self
            .sale_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::SaleNotFound(id))?;

        apply_movement_flow(
            &self.stock_service,
            &self.movement_service,
            &mut *tx,
            sale.product_id,
            sale.quantity,
            MovementType::In,
            Some(sale.id),
            NOTE_SALE_RETURN,
        )
        .await?;

        self.sale_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::debug!("Venda {} removida (devolução)", sale.id);
        Ok(sale)
    }
}

// Preço de venda: custo médio x (1 + margem/100), arredondado a 2 casas.
fn sale_unit_price(average_cost: Decimal, profit_margin: Decimal) -> Decimal {
    (average_cost * (Decimal::ONE + profit_margin / Decimal::ONE_HUNDRED)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_applies_profit_margin_over_average_cost() {
        // Cenário: custo médio 6.00 com margem de 25% -> 7.50
        assert_eq!(sale_unit_price(dec!(6.00), dec!(25)), dec!(7.50));
    }

    #[test]
    fn zero_margin_sells_at_cost() {
        assert_eq!(sale_unit_price(dec!(6.00), dec!(0)), dec!(6.00));
    }

    #[test]
    fn price_is_rounded_to_cents() {
        // 3.33 x 1.15 = 3.8295 -> 3.83
        assert_eq!(sale_unit_price(dec!(3.33), dec!(15)), dec!(3.83));
    }

    #[test]
    fn fractional_margin_is_supported() {
        assert_eq!(sale_unit_price(dec!(10.00), dec!(12.5)), dec!(11.25));
    }
}
