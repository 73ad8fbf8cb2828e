// src/common/error.rs

use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Todos os erros de domínio são terminais para a operação corrente:
// nada é retentado dentro do núcleo. As camadas superiores mapeiam as
// variantes para códigos HTTP (not-found -> 404, estoque/referência -> 400,
// banco -> 500).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Produto {0} não encontrado")]
    ProductNotFound(Uuid),

    #[error("Fornecedor {0} não encontrado")]
    SupplierNotFound(Uuid),

    #[error("Cliente {0} não encontrado")]
    CustomerNotFound(Uuid),

    #[error("Compra {0} não encontrada")]
    PurchaseNotFound(Uuid),

    #[error("Venda {0} não encontrada")]
    SaleNotFound(Uuid),

    // Uma saída que deixaria o saldo negativo. Carrega o contexto
    // necessário para a camada de cima montar uma mensagem acionável.
    #[error(
        "Estoque insuficiente para o produto {product_id}: solicitado {requested}, disponível {available}"
    )]
    InsufficientStock {
        product_id: Uuid,
        requested: i32,
        available: i32,
    },

    // Variante para erros de banco de dados. A mensagem é genérica de
    // propósito: detalhes do storage não vazam para o chamador.
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro ao rodar as migrações")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}
