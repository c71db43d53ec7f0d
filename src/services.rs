pub mod customer_service;
pub use customer_service::CustomerService;
pub mod credit_service;
pub use credit_service::CreditService;
