use std::{env, process, sync::Arc};

use coffee_shop_simulation::{
    coffee_shop::CoffeeShop,
    config::{read_config, ShopConfig},
    errors::CoffeeShopError,
    report::LogSink,
};
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

fn run() -> Result<(), CoffeeShopError> {
    let config = match env::args().nth(1) {
        Some(path) => read_config(path)?,
        None => ShopConfig::default(),
    };
    let coffee_shop = CoffeeShop::new(config, Arc::new(LogSink))?;
    coffee_shop.run()?;
    Ok(())
}

fn main() {
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Could not start the logger: {}", err);
    }
    if let Err(err) = run() {
        error!("[SHIFT] The simulation failed: {}", err);
        process::exit(1);
    }
}
