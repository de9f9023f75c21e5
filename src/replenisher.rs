//! Reabastecimiento de ingredientes al cerrar el turno.
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::debug;

use crate::{
    errors::CoffeeShopError,
    inventory::{Inventory, Restocked},
    report::{ReportEvent, ReportSink},
    shift::ShiftSignal,
};

pub struct Replenisher {
    inventory: Arc<Mutex<Inventory>>,
    threshold: u64,
    amount: u64,
    wait: Duration,
    shift: Arc<ShiftSignal>,
    sink: Arc<dyn ReportSink>,
}

impl Replenisher {
    pub fn new(
        inventory: Arc<Mutex<Inventory>>,
        threshold: u64,
        amount: u64,
        wait: Duration,
        shift: Arc<ShiftSignal>,
        sink: Arc<dyn ReportSink>,
    ) -> Replenisher {
        Replenisher {
            inventory,
            threshold,
            amount,
            wait,
            shift,
            sink,
        }
    }

    /// Repone todo lo que este por debajo del umbral en una sola toma del lock
    /// y despues espera fuera del lock.
    pub fn replenish(&self) -> Result<Vec<Restocked>, CoffeeShopError> {
        let restocked = self.inventory.lock()?.restock(self.threshold, self.amount);
        debug!("[RESTOCKING] {} ingredients below {}", restocked.len(), self.threshold);
        for replenished in &restocked {
            self.sink.report(ReportEvent::Restocked(*replenished));
        }
        self.shift.sleep(self.wait)?;
        Ok(restocked)
    }
}
