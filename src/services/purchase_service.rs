// src/services/purchase_service.rs

use sqlx::{Acquire, Postgres};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, PurchaseRepository},
    models::inventory::{MovementType, NewPurchase, Purchase},
    services::{stock_flow::apply_movement_flow, MovementService, StockService},
};

pub const NOTE_NEW_PURCHASE: &str = "Nova compra";
pub const NOTE_PURCHASE_RETURN: &str = "Devolução de compra";

#[derive(Clone)]
pub struct PurchaseService {
    purchase_repo: PurchaseRepository,
    catalog_repo: CatalogRepository,
    stock_service: StockService,
    movement_service: MovementService,
}

impl PurchaseService {
    pub fn new(
        purchase_repo: PurchaseRepository,
        catalog_repo: CatalogRepository,
        stock_service: StockService,
        movement_service: MovementService,
    ) -> Self {
        Self {
            purchase_repo,
            catalog_repo,
            stock_service,
            movement_service,
        }
    }

    /// Registra uma compra: valida as referências, persiste o histórico e
    /// reflete a entrada no saldo e no livro-razão, tudo em uma transação.
    pub async fn create_purchase<'a, A>(
        &self,
        acquirable: A,
        request: NewPurchase,
    ) -> Result<Purchase, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        request.validate()?;

        let mut tx = acquirable.begin().await?;

        self.catalog_repo
            .find_product(&mut *tx, request.product_id)
            .await?
            .ok_or(AppError::ProductNotFound(request.product_id))?;
        self.catalog_repo
            .find_supplier(&mut *tx, request.supplier_id)
            .await?
            .ok_or(AppError::SupplierNotFound(request.supplier_id))?;

        let purchase = self
            .purchase_repo
            .create(
                &mut *tx,
                request.product_id,
                request.supplier_id,
                request.unit_cost,
                request.quantity,
            )
            .await?;

        apply_movement_flow(
            &self.stock_service,
            &self.movement_service,
            &mut *tx,
            purchase.product_id,
            purchase.quantity,
            MovementType::In,
            Some(purchase.id),
            NOTE_NEW_PURCHASE,
        )
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Compra {} registrada: produto {}, {} un",
            purchase.id,
            purchase.product_id,
            purchase.quantity
        );
        Ok(purchase)
    }

    /// Apaga uma compra revertendo seu efeito no saldo.
    ///
    /// Se as unidades compradas já foram vendidas, a saída de estorno
    /// violaria o invariante de saldo não negativo: a operação inteira
    /// falha com `InsufficientStock` e a compra é mantida.
    pub async fn delete_purchase<'a, A>(&self, acquirable: A, id: Uuid) -> Result<Purchase, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let mut tx = acquirable.begin().await?;

        let purchase = self
            .purchase_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::PurchaseNotFound(id))?;

        apply_movement_flow(
            &self.stock_service,
            &self.movement_service,
            &mut *tx,
            purchase.product_id,
            purchase.quantity,
            MovementType::Out,
            Some(purchase.id),
            NOTE_PURCHASE_RETURN,
        )
        .await?;

        // Apagar a compra remove sua contribuição da fila de custos FIFO:
        // o custeio das próximas vendas não a verá mais.
        self.purchase_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::debug!("Compra {} removida (devolução)", purchase.id);
        Ok(purchase)
    }
}
