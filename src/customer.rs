//! Clientes de la cafeteria y el resultado de atenderlos.
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::{
    constants::{MAX_CASH, MIN_CASH},
    errors::CoffeeShopError,
    menu::{DrinkType, Menu},
};

/// Un cliente. Se crea al armar la cola y no se modifica despues.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: u32,
    pub cash: f64,
    pub drink: DrinkType,
}

impl Customer {
    pub fn new(id: u32, cash: f64, drink: DrinkType) -> Customer {
        Customer { id, cash, drink }
    }

    pub fn price(&self, menu: &Menu) -> Result<f64, CoffeeShopError> {
        menu.price(self.drink)
    }

    pub fn can_afford(&self, menu: &Menu) -> Result<bool, CoffeeShopError> {
        Ok(self.cash >= self.price(menu)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    RejectedNoFunds,
    RejectedNoStock,
    Served,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerReport {
    pub customer: Customer,
    pub outcome: Outcome,
    /// Precio cobrado, 0 si no fue atendido
    pub charged: f64,
    pub latency: Duration,
}

impl CustomerReport {
    pub fn is_served(&self) -> bool {
        self.outcome == Outcome::Served
    }
}

/// Genera los clientes `1..=count` con dinero entero en `[MIN_CASH, MAX_CASH)`
/// y una bebida al azar. Con `seed` la poblacion es siempre la misma.
pub fn generate_population(count: u32, seed: Option<u64>) -> Vec<Customer> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (1..=count)
        .map(|id| {
            let cash: u32 = rng.gen_range(MIN_CASH, MAX_CASH);
            let drink = DrinkType::ALL[rng.gen_range(0, DrinkType::ALL.len())];
            Customer::new(id, cash as f64, drink)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_not_afford_a_coffee_with_ten_dollars() {
        let customer = Customer::new(1, 10.0, DrinkType::Coffee);
        assert_eq!(Ok(false), customer.can_afford(&Menu::standard()));
    }

    #[test]
    fn should_afford_a_drink_with_the_exact_price() {
        let customer = Customer::new(1, 40.0, DrinkType::Frappe);
        assert_eq!(Ok(true), customer.can_afford(&Menu::standard()));
    }

    #[test]
    fn should_generate_the_whole_population_in_range() {
        let customers = generate_population(200, Some(7));
        assert_eq!(200, customers.len());
        for (index, customer) in customers.iter().enumerate() {
            assert_eq!(index as u32 + 1, customer.id);
            assert!(customer.cash >= MIN_CASH as f64 && customer.cash < MAX_CASH as f64);
            assert_eq!(customer.cash.trunc(), customer.cash);
        }
    }

    #[test]
    fn should_generate_the_same_population_with_the_same_seed() {
        assert_eq!(generate_population(50, Some(42)), generate_population(50, Some(42)));
    }

    #[test]
    fn should_generate_no_customers() {
        assert_eq!(true, generate_population(0, None).is_empty());
    }
}
