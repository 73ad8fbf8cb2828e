pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod stock_repo;
pub use stock_repo::StockRepository;
pub mod movement_repo;
pub use movement_repo::MovementRepository;
pub mod purchase_repo;
pub use purchase_repo::PurchaseRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;

use crate::common::error::AppError;
use sqlx::PgPool;

/// Roda as migrações embutidas (diretório ./migrations) na inicialização.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
    Ok(())
}
