pub mod costing_service;
pub use costing_service::CostingService;
pub mod movement_service;
pub use movement_service::MovementService;
pub mod purchase_service;
pub use purchase_service::PurchaseService;
pub mod sale_service;
pub use sale_service::SaleService;
pub mod stock_flow;
pub mod stock_service;
pub use stock_service::StockService;
