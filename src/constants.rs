//! Parametros de configuracion por defecto de la cafeteria

/// Cantidad de clientes que se atienden en el turno
pub const N_CUSTOMERS: usize = 50;

/// Cantidad de workers (threads) que atienden clientes
pub const N_WORKERS: usize = 4;

/// Cantidad de clientes que toma un worker cada vez que va a la cola
pub const CUSTOMERS_PER_CHUNK: usize = 2;

/// Cantidad inicial de cada ingrediente
pub const INITIAL_STOCK: u64 = 100;

/// Por debajo de esta cantidad el reabastecimiento repone un ingrediente
pub const RESTOCK_THRESHOLD: u64 = 10;

/// Cantidad que se agrega a cada ingrediente reabastecido
pub const RESTOCK_AMOUNT: u64 = 20;

/// Rango del dinero de cada cliente, `[MIN_CASH, MAX_CASH)`
pub const MIN_CASH: u32 = 30;
pub const MAX_CASH: u32 = 80;

/// Indica cuanto tiempo se debe de esperar entre cada impresion de las estadisticas del turno
pub const STATISTICS_WAIT_IN_MS: u64 = 250;

/// Pasos de la limpieza de equipos y duracion de cada uno
pub const CLEANING_STEPS: u32 = 5;
pub const CLEANING_STEP_IN_MS: u64 = 50;

/// Tiempo que tarda el reabastecimiento despues de reponer
pub const RESTOCKING_WAIT_IN_MS: u64 = 100;

/// Tiempo que tarda el control de calidad
pub const QUALITY_CONTROL_IN_MS: u64 = 200;

/// Tolerancia al comparar la caja registradora con la reduccion de ventas
pub const REVENUE_EPSILON: f64 = 1e-6;
