pub mod price_service;
pub mod stock_service;
