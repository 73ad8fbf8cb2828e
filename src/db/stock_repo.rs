// src/db/stock_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::inventory::StockRecord};

// Acesso à tabela 'product_stocks' (uma linha por produto).
// Toda escrita roda dentro da transação do fluxo chamador.
#[derive(Clone, Default)]
pub struct StockRepository;

impl StockRepository {
    pub fn new() -> Self {
        Self
    }

    // Leitura simples do saldo (custeio, relatórios).
    pub async fn find_by_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Option<StockRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock =
            sqlx::query_as::<_, StockRecord>("SELECT * FROM product_stocks WHERE product_id = $1")
                .bind(product_id)
                .fetch_optional(executor)
                .await?;
        Ok(stock)
    }

    // Leitura com FOR UPDATE: trava a linha do produto até o fim da
    // transação, serializando fluxos concorrentes sobre o mesmo saldo.
    pub async fn find_by_product_for_update<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Option<StockRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, StockRecord>(
            "SELECT * FROM product_stocks WHERE product_id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
        Ok(stock)
    }

    // Cria o saldo na primeira movimentação de um produto.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<StockRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, StockRecord>(
            r#"
            INSERT INTO product_stocks (product_id, quantity)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_one(executor)
        .await?;
        Ok(stock)
    }

    // Grava o novo saldo absoluto, já verificado pelo serviço.
    pub async fn update_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<StockRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_as::<_, StockRecord>(
            r#"
            UPDATE product_stocks
            SET quantity = $2, updated_at = now()
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_one(executor)
        .await?;
        Ok(stock)
    }
}
