// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Tipo de movimentação ---
// ADJUSTMENT é reservado para correções manuais registradas por camadas
// administrativas; os fluxos de compra/venda só geram IN e OUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "movement_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    In,         // Vira "IN"
    Out,        // Vira "OUT"
    Adjustment, // Vira "ADJUSTMENT"
}

// --- Saldo atual (tabela 'product_stocks') ---
// Uma linha por produto, criada na primeira movimentação.
// Invariante: quantity >= 0, sempre.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub updated_at: DateTime<Utc>,
}

// --- Livro-razão (tabela 'stock_movements') ---
// Entradas imutáveis: estornos são novas entradas com o tipo oposto,
// nunca correções das existentes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    // Magnitude do evento; o sinal vem do movement_type.
    pub quantity: i32,
    pub movement_type: MovementType,
    // Compra ou venda que originou a movimentação (quando houver)
    pub reference_id: Option<Uuid>,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

// --- Histórico de compras (tabela 'purchases') ---
// Fila de custos FIFO consumida pelo custeio, ordenada por created_at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Uuid,
    pub product_id: Uuid,
    pub supplier_id: Uuid,
    pub unit_cost: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

// --- Histórico de vendas (tabela 'sales') ---
// unit_price e average_cost são calculados na criação e nunca
// recalculados depois, mesmo que compras posteriores mudem o custo médio
// teórico do produto.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub product_id: Uuid,
    pub customer_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub average_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads dos fluxos
// ---

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub product_id: Uuid,
    pub supplier_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub unit_cost: Decimal,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: Uuid,
    pub customer_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_purchase_rejects_non_positive_quantity() {
        let payload = NewPurchase {
            product_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            unit_cost: dec!(5.00),
            quantity: 0,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn new_purchase_rejects_non_positive_cost() {
        let payload = NewPurchase {
            product_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            unit_cost: dec!(0),
            quantity: 10,
        };
        assert!(payload.validate().is_err());

        let payload = NewPurchase {
            unit_cost: dec!(-1.50),
            ..payload
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn valid_payloads_pass() {
        let purchase = NewPurchase {
            product_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            unit_cost: dec!(5.00),
            quantity: 10,
        };
        assert!(purchase.validate().is_ok());

        let sale = NewSale {
            product_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            quantity: 12,
        };
        assert!(sale.validate().is_ok());
    }
}
