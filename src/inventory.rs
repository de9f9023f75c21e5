//! Inventario de ingredientes de la cafeteria.
//!
//! Se comparte entre workers como `Arc<Mutex<Inventory>>`: un unico lock para
//! todos los ingredientes, ya que una receta usa varios a la vez. Verificar y
//! consumir tienen que hacerse en la misma toma del lock.
use std::collections::HashMap;

use serde::Serialize;

use crate::menu::{DrinkSpec, Ingredient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Restocked {
    pub ingredient: Ingredient,
    pub before: u64,
    pub after: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    stock: HashMap<Ingredient, u64>,
}

impl Inventory {
    pub fn new(initial_stock: u64) -> Inventory {
        let stock = Ingredient::ALL
            .iter()
            .map(|ingredient| (*ingredient, initial_stock))
            .collect();
        Inventory { stock }
    }

    /// Inventario con las cantidades dadas. Los ingredientes no mencionados quedan en 0.
    pub fn with_quantities(quantities: &[(Ingredient, u64)]) -> Inventory {
        let mut inventory = Inventory::new(0);
        for (ingredient, quantity) in quantities {
            inventory.stock.insert(*ingredient, *quantity);
        }
        inventory
    }

    pub fn remaining(&self, ingredient: Ingredient) -> u64 {
        self.stock.get(&ingredient).copied().unwrap_or(0)
    }

    pub fn can_serve(&self, drink: &DrinkSpec) -> bool {
        drink
            .recipe
            .iter()
            .all(|(ingredient, required)| self.remaining(*ingredient) >= *required)
    }

    /// Descuenta la receta. Quien llama tiene que haber verificado `can_serve`
    /// sin soltar el lock.
    pub fn consume(&mut self, drink: &DrinkSpec) {
        for (ingredient, required) in &drink.recipe {
            let remaining = self.stock.entry(*ingredient).or_insert(0);
            *remaining -= *required;
        }
    }

    /// Verifica y consume en un solo paso. Devuelve si se pudo consumir.
    pub fn try_consume(&mut self, drink: &DrinkSpec) -> bool {
        if !self.can_serve(drink) {
            return false;
        }
        self.consume(drink);
        true
    }

    /// Suma `amount` a cada ingrediente por debajo de `threshold`. Satura en `u64::MAX`.
    pub fn restock(&mut self, threshold: u64, amount: u64) -> Vec<Restocked> {
        let mut restocked = Vec::new();
        for ingredient in Ingredient::ALL {
            let remaining = self.stock.entry(ingredient).or_insert(0);
            if *remaining < threshold {
                let before = *remaining;
                *remaining = remaining.saturating_add(amount);
                restocked.push(Restocked {
                    ingredient,
                    before,
                    after: *remaining,
                });
            }
        }
        restocked
    }

    /// Cantidades actuales en el orden de `Ingredient::ALL`.
    pub fn snapshot(&self) -> Vec<(Ingredient, u64)> {
        Ingredient::ALL
            .iter()
            .map(|ingredient| (*ingredient, self.remaining(*ingredient)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{DrinkType, Menu};

    #[test]
    fn should_start_with_the_same_stock_of_every_ingredient() {
        let inventory = Inventory::new(100);
        for ingredient in Ingredient::ALL {
            assert_eq!(100, inventory.remaining(ingredient));
        }
    }

    #[test]
    fn should_not_serve_coffee_without_beans() {
        let menu = Menu::standard();
        let inventory =
            Inventory::with_quantities(&[(Ingredient::CoffeeBeans, 0), (Ingredient::Milk, 5)]);
        assert_eq!(false, inventory.can_serve(menu.spec(DrinkType::Coffee).unwrap()));
    }

    #[test]
    fn should_consume_the_whole_recipe() {
        let menu = Menu::standard();
        let mut inventory = Inventory::new(10);
        assert_eq!(true, inventory.try_consume(menu.spec(DrinkType::Frappe).unwrap()));
        assert_eq!(9, inventory.remaining(Ingredient::CoffeeBeans));
        assert_eq!(8, inventory.remaining(Ingredient::Ice));
        assert_eq!(9, inventory.remaining(Ingredient::Milk));
        assert_eq!(10, inventory.remaining(Ingredient::Sugar));
        assert_eq!(10, inventory.remaining(Ingredient::Fruit));
    }

    #[test]
    fn should_not_consume_when_one_ingredient_is_short() {
        let menu = Menu::standard();
        let mut inventory =
            Inventory::with_quantities(&[(Ingredient::Fruit, 1), (Ingredient::Ice, 5)]);
        assert_eq!(false, inventory.try_consume(menu.spec(DrinkType::Smoothie).unwrap()));
        assert_eq!(1, inventory.remaining(Ingredient::Fruit));
        assert_eq!(5, inventory.remaining(Ingredient::Ice));
    }

    #[test]
    fn should_restock_only_ingredients_below_the_threshold() {
        let mut inventory = Inventory::with_quantities(&[
            (Ingredient::CoffeeBeans, 3),
            (Ingredient::Milk, 15),
            (Ingredient::Sugar, 10),
            (Ingredient::Ice, 9),
            (Ingredient::Fruit, 40),
        ]);
        let restocked = inventory.restock(10, 20);

        assert_eq!(23, inventory.remaining(Ingredient::CoffeeBeans));
        assert_eq!(15, inventory.remaining(Ingredient::Milk));
        assert_eq!(10, inventory.remaining(Ingredient::Sugar));
        assert_eq!(29, inventory.remaining(Ingredient::Ice));
        assert_eq!(40, inventory.remaining(Ingredient::Fruit));
        assert_eq!(
            vec![
                Restocked { ingredient: Ingredient::CoffeeBeans, before: 3, after: 23 },
                Restocked { ingredient: Ingredient::Ice, before: 9, after: 29 },
            ],
            restocked
        );
    }

    #[test]
    fn should_not_overflow_when_restocking_a_huge_amount() {
        let mut inventory = Inventory::with_quantities(&[(Ingredient::Sugar, 3)]);
        let restocked = inventory.restock(10, u64::MAX);

        assert_eq!(u64::MAX, inventory.remaining(Ingredient::Sugar));
        assert_eq!(u64::MAX, inventory.remaining(Ingredient::Milk));
        assert_eq!(5, restocked.len());
        assert_eq!(
            Restocked { ingredient: Ingredient::Sugar, before: 3, after: u64::MAX },
            restocked[2]
        );
    }

    #[test]
    fn should_list_the_snapshot_in_ingredient_order() {
        let inventory = Inventory::with_quantities(&[(Ingredient::Sugar, 2)]);
        assert_eq!(
            vec![
                (Ingredient::CoffeeBeans, 0),
                (Ingredient::Milk, 0),
                (Ingredient::Sugar, 2),
                (Ingredient::Ice, 0),
                (Ingredient::Fruit, 0),
            ],
            inventory.snapshot()
        );
    }
}
