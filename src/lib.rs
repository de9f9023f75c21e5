pub mod coffee_shop;
pub mod config;
pub mod constants;
pub mod customer;
pub mod customer_processor;
pub mod customers_queue;
pub mod errors;
pub mod inventory;
pub mod ledger;
pub mod maintenance;
pub mod menu;
pub mod metrics;
pub mod replenisher;
pub mod report;
pub mod scheduler;
pub mod shift;
pub mod statistics;
