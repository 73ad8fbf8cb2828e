// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::db::{
    self, CatalogRepository, MovementRepository, PurchaseRepository, SaleRepository,
    StockRepository,
};
use crate::services::{
    CostingService, MovementService, PurchaseService, SaleService, StockService,
};

// O estado compartilhado do núcleo: pool + serviços montados.
// Substitui o handle global de banco do sistema original por um contexto
// explícito, aberto na inicialização do processo e passado às camadas de
// cima; cada invocação de fluxo abre sua própria transação sobre a pool.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub stock_service: StockService,
    pub movement_service: MovementService,
    pub costing_service: CostingService,
    pub purchase_service: PurchaseService,
    pub sale_service: SaleService,
}

impl AppState {
    /// Carrega as configurações do ambiente, conecta ao banco, roda as
    /// migrações e monta o gráfico de serviços.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        db::run_migrations(&db_pool).await?;

        Ok(Self::from_pool(db_pool))
    }

    /// Monta o gráfico de dependências sobre uma pool já aberta (testes e
    /// aplicações que gerenciam a própria conexão).
    pub fn from_pool(db_pool: PgPool) -> Self {
        let stock_service = StockService::new(StockRepository::new());
        let movement_service = MovementService::new(MovementRepository::new());
        let costing_service =
            CostingService::new(StockRepository::new(), PurchaseRepository::new());

        let purchase_service = PurchaseService::new(
            PurchaseRepository::new(),
            CatalogRepository::new(),
            stock_service.clone(),
            movement_service.clone(),
        );
        let sale_service = SaleService::new(
            SaleRepository::new(),
            CatalogRepository::new(),
            costing_service.clone(),
            stock_service.clone(),
            movement_service.clone(),
        );

        Self {
            db_pool,
            stock_service,
            movement_service,
            costing_service,
            purchase_service,
            sale_service,
        }
    }
}

/// Inicializa o logger. Chamado uma vez pela aplicação que embute o núcleo.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}
