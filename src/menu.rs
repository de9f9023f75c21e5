//! Ingredientes, bebidas y el menu de la cafeteria.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::CoffeeShopError;

pub const TOTAL_INGREDIENTS: usize = 5;
pub const TOTAL_DRINKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ingredient {
    CoffeeBeans,
    Milk,
    Sugar,
    Ice,
    Fruit,
}

impl Ingredient {
    pub const ALL: [Ingredient; TOTAL_INGREDIENTS] = [
        Ingredient::CoffeeBeans,
        Ingredient::Milk,
        Ingredient::Sugar,
        Ingredient::Ice,
        Ingredient::Fruit,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DrinkType {
    Coffee,
    Tea,
    Smoothie,
    Frappe,
}

impl DrinkType {
    pub const ALL: [DrinkType; TOTAL_DRINKS] = [
        DrinkType::Coffee,
        DrinkType::Tea,
        DrinkType::Smoothie,
        DrinkType::Frappe,
    ];
}

/// Lo que cuesta, lo que consume y lo que tarda una bebida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkSpec {
    pub drink: DrinkType,
    pub price: f64,
    pub recipe: Vec<(Ingredient, u64)>,
    pub preparation_ms: u64,
}

impl DrinkSpec {
    pub fn new(
        drink: DrinkType,
        price: f64,
        recipe: Vec<(Ingredient, u64)>,
        preparation_ms: u64,
    ) -> DrinkSpec {
        DrinkSpec {
            drink,
            price,
            recipe,
            preparation_ms,
        }
    }

    pub fn preparation_time(&self) -> Duration {
        Duration::from_millis(self.preparation_ms)
    }
}

/// Tabla fija de bebidas. Cada `DrinkType` tiene exactamente una entrada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    drinks: Vec<DrinkSpec>,
}

impl Menu {
    pub fn new(drinks: Vec<DrinkSpec>) -> Menu {
        Menu { drinks }
    }

    pub fn standard() -> Menu {
        use Ingredient::*;
        Menu::new(vec![
            DrinkSpec::new(DrinkType::Coffee, 25.0, vec![(CoffeeBeans, 1), (Milk, 1)], 100),
            DrinkSpec::new(DrinkType::Tea, 20.0, vec![(Sugar, 1)], 80),
            DrinkSpec::new(DrinkType::Smoothie, 35.0, vec![(Fruit, 2), (Ice, 1)], 200),
            DrinkSpec::new(
                DrinkType::Frappe,
                40.0,
                vec![(CoffeeBeans, 1), (Ice, 2), (Milk, 1)],
                150,
            ),
        ])
    }

    /// Mismo menu pero con todas las bebidas tardando `preparation_ms`.
    pub fn with_preparation_ms(mut self, preparation_ms: u64) -> Menu {
        for spec in self.drinks.iter_mut() {
            spec.preparation_ms = preparation_ms;
        }
        self
    }

    pub fn spec(&self, drink: DrinkType) -> Result<&DrinkSpec, CoffeeShopError> {
        self.drinks
            .iter()
            .find(|spec| spec.drink == drink)
            .ok_or(CoffeeShopError::DrinkNotOnMenu(drink))
    }

    pub fn price(&self, drink: DrinkType) -> Result<f64, CoffeeShopError> {
        Ok(self.spec(drink)?.price)
    }

    pub fn validate(&self) -> Result<(), CoffeeShopError> {
        for drink in DrinkType::ALL {
            let matching = self.drinks.iter().filter(|spec| spec.drink == drink).count();
            if matching != 1 {
                return Err(CoffeeShopError::InvalidConfig(format!(
                    "the menu must have exactly one entry for {:?}, found {}",
                    drink, matching
                )));
            }
        }
        for spec in &self.drinks {
            if !spec.price.is_finite() || spec.price < 0.0 {
                return Err(CoffeeShopError::InvalidConfig(format!(
                    "{:?} has an invalid price {}",
                    spec.drink, spec.price
                )));
            }
            for (index, (ingredient, _)) in spec.recipe.iter().enumerate() {
                if spec.recipe[..index].iter().any(|(seen, _)| seen == ingredient) {
                    return Err(CoffeeShopError::InvalidConfig(format!(
                        "the {:?} recipe lists {:?} more than once",
                        spec.drink, ingredient
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Menu {
    fn default() -> Menu {
        Menu::standard()
    }
}
