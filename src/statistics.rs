use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::error;

use crate::{
    errors::CoffeeShopError,
    inventory::Inventory,
    ledger::Ledger,
    report::{ReportEvent, ReportSink},
    shift::ShiftSignal,
};

/// Reporta periodicamente la caja y el inventario mientras se atienden clientes.
pub struct StatisticsPrinter {
    ledger: Arc<Mutex<Ledger>>,
    inventory: Arc<Mutex<Inventory>>,
    sink: Arc<dyn ReportSink>,
    interval: Duration,
    finish: ShiftSignal,
}

impl StatisticsPrinter {
    pub fn new(
        ledger: Arc<Mutex<Ledger>>,
        inventory: Arc<Mutex<Inventory>>,
        sink: Arc<dyn ReportSink>,
        interval: Duration,
    ) -> StatisticsPrinter {
        StatisticsPrinter {
            ledger,
            inventory,
            sink,
            interval,
            finish: ShiftSignal::new(),
        }
    }

    pub fn finish(&self) {
        if self.finish.cancel().is_err() {
            error!("Error setting statistics thread to finish");
        }
    }

    pub fn process_statistics(&self) -> Result<(), CoffeeShopError> {
        loop {
            self.print_statistics()?;
            match self.finish.sleep(self.interval) {
                Ok(()) => continue,
                Err(CoffeeShopError::Cancelled) => {
                    self.print_statistics()?;
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn print_statistics(&self) -> Result<(), CoffeeShopError> {
        let (served, revenue) = {
            let ledger = self.ledger.lock()?;
            (ledger.customers_served(), ledger.revenue())
        };
        let inventory = self.inventory.lock()?.snapshot();
        self.sink.report(ReportEvent::Statistics {
            served,
            revenue,
            inventory,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{menu::DrinkType, report::testing::RecordingSink};
    use std::thread;

    #[test]
    fn should_print_a_last_snapshot_when_finished() {
        let ledger = Arc::new(Mutex::new(Ledger::new()));
        let sink = Arc::new(RecordingSink::default());
        let printer = Arc::new(StatisticsPrinter::new(
            ledger.clone(),
            Arc::new(Mutex::new(Inventory::new(7))),
            sink.clone(),
            Duration::from_secs(60),
        ));
        let printer_clone = printer.clone();
        let handle = thread::spawn(move || printer_clone.process_statistics());

        thread::sleep(Duration::from_millis(20));
        ledger.lock().unwrap().record(25.0, DrinkType::Coffee);
        printer.finish();
        assert_eq!(Ok(()), handle.join().unwrap());

        let events = sink.events();
        assert_eq!(2, events.len());
        match events.last() {
            Some(ReportEvent::Statistics { served, revenue, inventory }) => {
                assert_eq!(1, *served);
                assert_eq!(25.0, *revenue);
                assert!(inventory.iter().all(|(_, remaining)| *remaining == 7));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn should_print_periodically() {
        let sink = Arc::new(RecordingSink::default());
        let printer = Arc::new(StatisticsPrinter::new(
            Arc::new(Mutex::new(Ledger::new())),
            Arc::new(Mutex::new(Inventory::new(1))),
            sink.clone(),
            Duration::from_millis(5),
        ));
        let printer_clone = printer.clone();
        let handle = thread::spawn(move || printer_clone.process_statistics());

        thread::sleep(Duration::from_millis(60));
        printer.finish();
        handle.join().unwrap().unwrap();
        assert!(sink.events().len() >= 3);
    }
}
