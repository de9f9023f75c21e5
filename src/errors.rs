use std::fmt;

use crate::menu::DrinkType;

#[derive(Debug, Clone, PartialEq)]
pub enum CoffeeShopError {
    LockError,
    DrinkNotOnMenu(DrinkType),
    ConfigReaderError(String),
    InvalidConfig(String),
    Cancelled,
    DeadlineExceeded,
    WorkerPanicked(String),
}

impl<T> From<std::sync::PoisonError<T>> for CoffeeShopError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CoffeeShopError::LockError
    }
}

impl fmt::Display for CoffeeShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoffeeShopError::LockError => write!(f, "a shared lock was poisoned"),
            CoffeeShopError::DrinkNotOnMenu(drink) => write!(f, "{:?} is not on the menu", drink),
            CoffeeShopError::ConfigReaderError(reason) => {
                write!(f, "could not read configuration: {}", reason)
            }
            CoffeeShopError::InvalidConfig(reason) => {
                write!(f, "invalid configuration: {}", reason)
            }
            CoffeeShopError::Cancelled => write!(f, "the shift was cancelled"),
            CoffeeShopError::DeadlineExceeded => write!(f, "the shift deadline was exceeded"),
            CoffeeShopError::WorkerPanicked(who) => write!(f, "{} panicked", who),
        }
    }
}

impl std::error::Error for CoffeeShopError {}
