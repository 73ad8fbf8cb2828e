// src/lib.rs

// Núcleo de estoque e custeio: saldo por produto, livro-razão de
// movimentações e custo médio FIFO usado para precificar vendas.
// As camadas externas (HTTP, auth, relatórios) consomem este crate
// como biblioteca.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

pub use common::error::AppError;
pub use config::AppState;
