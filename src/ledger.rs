//! Caja registradora y estadisticas de ventas, compartida como `Arc<Mutex<Ledger>>`.
use std::collections::HashMap;

use crate::menu::DrinkType;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger {
    revenue: f64,
    sales: HashMap<DrinkType, u64>,
    customers_served: u64,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    /// Registra una venta: suma a la caja, a las ventas de la bebida y a los clientes atendidos.
    pub fn record(&mut self, price: f64, drink: DrinkType) {
        self.revenue += price;
        *self.sales.entry(drink).or_insert(0) += 1;
        self.customers_served += 1;
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn customers_served(&self) -> u64 {
        self.customers_served
    }

    pub fn sales_of(&self, drink: DrinkType) -> u64 {
        self.sales.get(&drink).copied().unwrap_or(0)
    }
}
