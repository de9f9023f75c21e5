//! Configuracion del turno. Todo tiene un valor por defecto y se puede
//! sobreescribir desde un archivo JSON.
use std::{error::Error, fs::File, io::BufReader, path::Path, time::Duration};

use log::{debug, error};
use serde::Deserialize;

use crate::{
    constants::{
        CUSTOMERS_PER_CHUNK, INITIAL_STOCK, N_CUSTOMERS, N_WORKERS, RESTOCK_AMOUNT,
        RESTOCK_THRESHOLD, STATISTICS_WAIT_IN_MS,
    },
    errors::CoffeeShopError,
    maintenance::MaintenanceTimings,
    menu::Menu,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub customers: usize,
    pub workers: usize,
    pub chunk_size: usize,
    pub initial_stock: u64,
    pub restock_threshold: u64,
    pub restock_amount: u64,
    pub statistics_interval_ms: u64,
    /// Semilla para generar los clientes; sin semilla cada turno es distinto
    pub seed: Option<u64>,
    /// Tiempo maximo del turno, a partir del cual se corta cualquier espera
    pub shift_limit_ms: Option<u64>,
    pub menu: Menu,
    pub maintenance: MaintenanceTimings,
}

impl Default for ShopConfig {
    fn default() -> ShopConfig {
        ShopConfig {
            customers: N_CUSTOMERS,
            workers: N_WORKERS,
            chunk_size: CUSTOMERS_PER_CHUNK,
            initial_stock: INITIAL_STOCK,
            restock_threshold: RESTOCK_THRESHOLD,
            restock_amount: RESTOCK_AMOUNT,
            statistics_interval_ms: STATISTICS_WAIT_IN_MS,
            seed: None,
            shift_limit_ms: None,
            menu: Menu::standard(),
            maintenance: MaintenanceTimings::default(),
        }
    }
}

impl ShopConfig {
    pub fn validate(&self) -> Result<(), CoffeeShopError> {
        if self.workers == 0 {
            return Err(CoffeeShopError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(CoffeeShopError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if u32::try_from(self.customers).is_err() {
            return Err(CoffeeShopError::InvalidConfig(format!(
                "too many customers: {}",
                self.customers
            )));
        }
        self.menu.validate()
    }

    pub fn population(&self) -> u32 {
        u32::try_from(self.customers).unwrap_or(u32::MAX)
    }

    pub fn statistics_interval(&self) -> Duration {
        Duration::from_millis(self.statistics_interval_ms)
    }

    pub fn shift_limit(&self) -> Option<Duration> {
        self.shift_limit_ms.map(Duration::from_millis)
    }
}

fn read_config_from_file<P: AsRef<Path>>(path: P) -> Result<ShopConfig, Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: ShopConfig = serde_json::from_reader(reader)?;
    Ok(config)
}

pub fn read_config<P: AsRef<Path>>(path: P) -> Result<ShopConfig, CoffeeShopError> {
    let config = read_config_from_file(&path).map_err(|err| {
        error!("[CONFIG] Error while reading {}: {}", path.as_ref().display(), err);
        CoffeeShopError::ConfigReaderError(err.to_string())
    })?;
    config.validate()?;
    debug!("[CONFIG] Loaded {:?}", config);
    Ok(config)
}
