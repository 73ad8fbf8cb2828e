pub mod catalog;
pub mod inventory;

pub use catalog::{Customer, Product, Supplier};
pub use inventory::{
    MovementType, NewPurchase, NewSale, Purchase, Sale, StockMovement, StockRecord,
};
