//! Atencion de un cliente: cobro, ingredientes, preparacion y caja.
use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use log::debug;

use crate::{
    customer::{Customer, CustomerReport, Outcome},
    errors::CoffeeShopError,
    inventory::Inventory,
    ledger::Ledger,
    menu::{DrinkSpec, Menu},
    report::{ReportEvent, ReportSink},
    shift::ShiftSignal,
};

/// Tiene referencias al inventario y a la caja (cada uno con su lock), al menu,
/// a la senal de fin de turno y al destino de los reportes.
/// Los locks nunca se toman a la vez y ninguno se mantiene durante la preparacion.
#[derive(Clone)]
pub struct CustomerProcessor {
    inventory: Arc<Mutex<Inventory>>,
    ledger: Arc<Mutex<Ledger>>,
    menu: Arc<Menu>,
    shift: Arc<ShiftSignal>,
    sink: Arc<dyn ReportSink>,
}

impl CustomerProcessor {
    pub fn new(
        inventory: Arc<Mutex<Inventory>>,
        ledger: Arc<Mutex<Ledger>>,
        menu: Arc<Menu>,
        shift: Arc<ShiftSignal>,
        sink: Arc<dyn ReportSink>,
    ) -> CustomerProcessor {
        CustomerProcessor {
            inventory,
            ledger,
            menu,
            shift,
            sink,
        }
    }

    pub fn shift(&self) -> &ShiftSignal {
        &self.shift
    }

    /// Con el turno cancelado no se atiende a nadie mas.
    pub fn process(&self, customer: Customer) -> Result<CustomerReport, CoffeeShopError> {
        if self.shift.is_cancelled()? {
            return Err(CoffeeShopError::Cancelled);
        }
        let start = Instant::now();
        let spec = self.menu.spec(customer.drink)?;

        if !customer.can_afford(&self.menu)? {
            self.sink.report(ReportEvent::RejectedNoFunds {
                customer_id: customer.id,
                drink: customer.drink,
                cash: customer.cash,
                price: spec.price,
            });
            return Ok(rejected(customer, Outcome::RejectedNoFunds, start));
        }

        if !self.take_ingredients(&customer, spec)? {
            self.sink.report(ReportEvent::RejectedNoStock {
                customer_id: customer.id,
                drink: customer.drink,
            });
            return Ok(rejected(customer, Outcome::RejectedNoStock, start));
        }

        self.sink.report(ReportEvent::Preparing {
            customer_id: customer.id,
            drink: customer.drink,
            price: spec.price,
        });
        self.shift.sleep(spec.preparation_time())?;

        self.register_sale(spec)?;
        self.sink.report(ReportEvent::Delivered {
            customer_id: customer.id,
            drink: customer.drink,
        });

        Ok(CustomerReport {
            customer,
            outcome: Outcome::Served,
            charged: spec.price,
            latency: start.elapsed(),
        })
    }

    fn take_ingredients(
        &self,
        customer: &Customer,
        spec: &DrinkSpec,
    ) -> Result<bool, CoffeeShopError> {
        let mut inventory = self.inventory.lock()?;
        if !inventory.can_serve(spec) {
            return Ok(false);
        }
        inventory.consume(spec);
        debug!(
            "[CUSTOMER {}] Took the ingredients for {:?}",
            customer.id, customer.drink
        );
        Ok(true)
    }

    fn register_sale(&self, spec: &DrinkSpec) -> Result<(), CoffeeShopError> {
        let mut ledger = self.ledger.lock()?;
        ledger.record(spec.price, spec.drink);
        Ok(())
    }
}

fn rejected(customer: Customer, outcome: Outcome, start: Instant) -> CustomerReport {
    CustomerReport {
        customer,
        outcome,
        charged: 0.0,
        latency: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        menu::{DrinkType, Ingredient},
        report::testing::RecordingSink,
    };
    use std::thread;

    struct Fixture {
        processor: CustomerProcessor,
        inventory: Arc<Mutex<Inventory>>,
        ledger: Arc<Mutex<Ledger>>,
        sink: Arc<RecordingSink>,
        shift: Arc<ShiftSignal>,
    }

    fn fixture(inventory: Inventory, preparation_ms: u64) -> Fixture {
        let inventory = Arc::new(Mutex::new(inventory));
        let ledger = Arc::new(Mutex::new(Ledger::new()));
        let sink = Arc::new(RecordingSink::default());
        let shift = Arc::new(ShiftSignal::new());
        let processor = CustomerProcessor::new(
            inventory.clone(),
            ledger.clone(),
            Arc::new(Menu::standard().with_preparation_ms(preparation_ms)),
            shift.clone(),
            sink.clone(),
        );
        Fixture {
            processor,
            inventory,
            ledger,
            sink,
            shift,
        }
    }

    #[test]
    fn should_reject_a_customer_without_money() {
        let f = fixture(Inventory::new(100), 0);
        let report = f.processor.process(Customer::new(1, 10.0, DrinkType::Coffee)).unwrap();

        assert_eq!(Outcome::RejectedNoFunds, report.outcome);
        assert_eq!(0.0, report.charged);
        assert_eq!(Inventory::new(100), *f.inventory.lock().unwrap());
        assert_eq!(Ledger::new(), *f.ledger.lock().unwrap());
        assert_eq!(
            vec![ReportEvent::RejectedNoFunds {
                customer_id: 1,
                drink: DrinkType::Coffee,
                cash: 10.0,
                price: 25.0
            }],
            f.sink.events()
        );
    }

    #[test]
    fn should_reject_a_customer_when_there_are_no_ingredients() {
        let inventory =
            Inventory::with_quantities(&[(Ingredient::CoffeeBeans, 0), (Ingredient::Milk, 5)]);
        let f = fixture(inventory.clone(), 0);
        let report = f.processor.process(Customer::new(1, 30.0, DrinkType::Coffee)).unwrap();

        assert_eq!(Outcome::RejectedNoStock, report.outcome);
        assert_eq!(inventory, *f.inventory.lock().unwrap());
        assert_eq!(Ledger::new(), *f.ledger.lock().unwrap());
    }

    #[test]
    fn should_serve_a_customer() {
        let f = fixture(Inventory::new(100), 5);
        let report = f.processor.process(Customer::new(3, 50.0, DrinkType::Frappe)).unwrap();

        assert_eq!(Outcome::Served, report.outcome);
        assert_eq!(40.0, report.charged);
        assert!(report.latency.as_millis() >= 5);

        let inventory = f.inventory.lock().unwrap();
        assert_eq!(99, inventory.remaining(Ingredient::CoffeeBeans));
        assert_eq!(98, inventory.remaining(Ingredient::Ice));
        assert_eq!(99, inventory.remaining(Ingredient::Milk));

        let ledger = f.ledger.lock().unwrap();
        assert_eq!(40.0, ledger.revenue());
        assert_eq!(1, ledger.customers_served());
        assert_eq!(1, ledger.sales_of(DrinkType::Frappe));
        assert_eq!(
            vec![
                ReportEvent::Preparing { customer_id: 3, drink: DrinkType::Frappe, price: 40.0 },
                ReportEvent::Delivered { customer_id: 3, drink: DrinkType::Frappe },
            ],
            f.sink.events()
        );
    }

    #[test]
    fn should_serve_only_while_there_is_sugar() {
        let f = fixture(Inventory::with_quantities(&[(Ingredient::Sugar, 2)]), 0);
        let outcomes: Vec<Outcome> = (1..=3)
            .map(|id| f.processor.process(Customer::new(id, 50.0, DrinkType::Tea)).unwrap().outcome)
            .collect();

        assert_eq!(
            vec![Outcome::Served, Outcome::Served, Outcome::RejectedNoStock],
            outcomes
        );
        assert_eq!(0, f.inventory.lock().unwrap().remaining(Ingredient::Sugar));
        assert_eq!(40.0, f.ledger.lock().unwrap().revenue());
    }

    #[test]
    fn should_not_hold_the_inventory_lock_while_preparing() {
        let f = fixture(Inventory::new(100), 300);
        let processor = f.processor.clone();
        let preparing =
            thread::spawn(move || processor.process(Customer::new(1, 50.0, DrinkType::Smoothie)));

        thread::sleep(std::time::Duration::from_millis(50));
        let start = Instant::now();
        let fruit = f.inventory.lock().unwrap().remaining(Ingredient::Fruit);
        let ledger_served = f.ledger.lock().unwrap().customers_served();
        assert!(start.elapsed().as_millis() < 200);
        assert_eq!(98, fruit);
        assert_eq!(0, ledger_served);

        assert_eq!(Outcome::Served, preparing.join().unwrap().unwrap().outcome);
    }

    #[test]
    fn should_never_oversell_under_contention() {
        let f = fixture(Inventory::with_quantities(&[(Ingredient::Sugar, 25)]), 1);
        let handles: Vec<_> = (1..=40)
            .map(|id| {
                let processor = f.processor.clone();
                thread::spawn(move || processor.process(Customer::new(id, 50.0, DrinkType::Tea)))
            })
            .collect();
        let served = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .filter(|report| report.is_served())
            .count();

        assert_eq!(25, served);
        assert_eq!(0, f.inventory.lock().unwrap().remaining(Ingredient::Sugar));
        assert_eq!(25, f.ledger.lock().unwrap().customers_served());
        assert_eq!(500.0, f.ledger.lock().unwrap().revenue());
    }

    #[test]
    fn should_stop_preparing_when_the_shift_is_cancelled() {
        let f = fixture(Inventory::new(100), 10_000);
        let processor = f.processor.clone();
        let preparing =
            thread::spawn(move || processor.process(Customer::new(1, 50.0, DrinkType::Coffee)));

        thread::sleep(std::time::Duration::from_millis(50));
        f.shift.cancel().unwrap();

        assert_eq!(Err(CoffeeShopError::Cancelled), preparing.join().unwrap());
        assert_eq!(99, f.inventory.lock().unwrap().remaining(Ingredient::CoffeeBeans));
        assert_eq!(Ledger::new(), *f.ledger.lock().unwrap());
    }

    #[test]
    fn should_not_take_customers_once_the_shift_is_cancelled() {
        let f = fixture(Inventory::new(100), 0);
        f.processor.shift().cancel().unwrap();
        let result = f.processor.process(Customer::new(1, 50.0, DrinkType::Coffee));

        assert_eq!(Err(CoffeeShopError::Cancelled), result);
        assert_eq!(Inventory::new(100), *f.inventory.lock().unwrap());
        assert_eq!(Ledger::new(), *f.ledger.lock().unwrap());
        assert_eq!(true, f.sink.events().is_empty());
    }
}
