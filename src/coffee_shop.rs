use std::{
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use log::{debug, warn};

use crate::{
    config::ShopConfig,
    constants::REVENUE_EPSILON,
    customer::{generate_population, Customer},
    customer_processor::CustomerProcessor,
    errors::CoffeeShopError,
    inventory::Inventory,
    ledger::Ledger,
    maintenance::{MaintenanceReport, MaintenanceStage},
    menu::{DrinkType, Ingredient, Menu},
    replenisher::Replenisher,
    report::{DrinkSales, ReportEvent, ReportSink, SimulationSummary},
    scheduler::{ServiceReport, ServiceScheduler},
    shift::ShiftSignal,
    statistics::StatisticsPrinter,
};

/// Un turno completo: atencion de clientes, cambio de turno con mantenimiento y resumen.
pub struct CoffeeShop {
    config: ShopConfig,
    inventory: Arc<Mutex<Inventory>>,
    ledger: Arc<Mutex<Ledger>>,
    menu: Arc<Menu>,
    shift: Arc<ShiftSignal>,
    sink: Arc<dyn ReportSink>,
}

/// Todo lo que produjo un turno.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftResult {
    pub service: ServiceReport,
    pub maintenance: MaintenanceReport,
    pub summary: SimulationSummary,
}

impl CoffeeShop {
    pub fn new(
        config: ShopConfig,
        sink: Arc<dyn ReportSink>,
    ) -> Result<CoffeeShop, CoffeeShopError> {
        let inventory = Inventory::new(config.initial_stock);
        CoffeeShop::with_inventory(config, inventory, sink)
    }

    pub fn with_inventory(
        config: ShopConfig,
        inventory: Inventory,
        sink: Arc<dyn ReportSink>,
    ) -> Result<CoffeeShop, CoffeeShopError> {
        config.validate()?;
        Ok(CoffeeShop {
            menu: Arc::new(config.menu.clone()),
            config,
            inventory: Arc::new(Mutex::new(inventory)),
            ledger: Arc::new(Mutex::new(Ledger::new())),
            shift: Arc::new(ShiftSignal::new()),
            sink,
        })
    }

    pub fn shift(&self) -> Arc<ShiftSignal> {
        self.shift.clone()
    }

    pub fn inventory(&self) -> Result<Inventory, CoffeeShopError> {
        Ok(self.inventory.lock()?.clone())
    }

    pub fn ledger(&self) -> Result<Ledger, CoffeeShopError> {
        Ok(self.ledger.lock()?.clone())
    }

    /// Genera la poblacion de clientes segun la configuracion y corre el turno.
    pub fn run(&self) -> Result<ShiftResult, CoffeeShopError> {
        let customers = generate_population(self.config.population(), self.config.seed);
        self.run_with_customers(customers)
    }

    /// El limite del turno, si lo hay, se cuenta desde aca y no desde la construccion.
    pub fn run_with_customers(
        &self,
        customers: Vec<Customer>,
    ) -> Result<ShiftResult, CoffeeShopError> {
        let start = Instant::now();
        if let Some(limit) = self.config.shift_limit() {
            self.shift.set_deadline(start + limit)?;
        }
        let population = customers.len() as u32;
        let scheduler = ServiceScheduler::new(self.config.workers, self.config.chunk_size)?;
        self.sink.report(ReportEvent::ShiftStarted {
            customers: population,
            workers: scheduler.workers(),
            inventory: self.inventory()?.snapshot(),
        });

        let service = self.serve_customers(&scheduler, customers)?;
        self.sink.report(ReportEvent::ServiceFinished {
            served: service.metrics.total_served,
            population,
        });
        self.check_consistency(&service)?;

        let maintenance = self.maintenance_stage().run();

        let summary = self.summarize(start.elapsed(), population, &service, &maintenance)?;
        if let Ok(json) = serde_json::to_string(&summary) {
            debug!("[SUMMARY] {}", json);
        }
        self.sink.report(ReportEvent::Summary(summary.clone()));

        Ok(ShiftResult {
            service,
            maintenance,
            summary,
        })
    }

    fn serve_customers(
        &self,
        scheduler: &ServiceScheduler,
        customers: Vec<Customer>,
    ) -> Result<ServiceReport, CoffeeShopError> {
        let statistics = Arc::new(StatisticsPrinter::new(
            self.ledger.clone(),
            self.inventory.clone(),
            self.sink.clone(),
            self.config.statistics_interval(),
        ));
        let statistics_clone = statistics.clone();
        let statistics_thread = thread::spawn(move || statistics_clone.process_statistics());

        let processor = CustomerProcessor::new(
            self.inventory.clone(),
            self.ledger.clone(),
            self.menu.clone(),
            self.shift.clone(),
            self.sink.clone(),
        );
        let service = scheduler.serve(customers, &processor);

        statistics.finish();
        match statistics_thread.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!("[STATISTICS] Stopped with error: {}", err),
            Err(_) => warn!("[STATISTICS] Panicked"),
        }
        service
    }

    fn check_consistency(&self, service: &ServiceReport) -> Result<(), CoffeeShopError> {
        let ledger = self.ledger.lock()?;
        if ledger.customers_served() != service.metrics.total_served {
            warn!(
                "[SHIFT] Ledger served {} customers but the reduction counted {}",
                ledger.customers_served(),
                service.metrics.total_served
            );
        }
        if (ledger.revenue() - service.metrics.total_revenue).abs() > REVENUE_EPSILON {
            warn!(
                "[SHIFT] Ledger revenue {:.2} differs from the reduction {:.2}",
                ledger.revenue(),
                service.metrics.total_revenue
            );
        }
        Ok(())
    }

    fn maintenance_stage(&self) -> MaintenanceStage {
        let timings = self.config.maintenance;
        let replenisher = Replenisher::new(
            self.inventory.clone(),
            self.config.restock_threshold,
            self.config.restock_amount,
            Duration::from_millis(timings.restocking_wait_ms),
            self.shift.clone(),
            self.sink.clone(),
        );
        MaintenanceStage::new(timings, replenisher, self.shift.clone(), self.sink.clone())
    }

    fn summarize(
        &self,
        elapsed: Duration,
        population: u32,
        service: &ServiceReport,
        maintenance: &MaintenanceReport,
    ) -> Result<SimulationSummary, CoffeeShopError> {
        let ledger = self.ledger()?;
        let final_inventory: Vec<(Ingredient, u64)> = self.inventory()?.snapshot();
        let sales = DrinkType::ALL
            .iter()
            .map(|drink| {
                let sold = ledger.sales_of(*drink);
                let percentage = if ledger.customers_served() == 0 {
                    0.0
                } else {
                    sold as f64 / ledger.customers_served() as f64 * 100.0
                };
                DrinkSales {
                    drink: *drink,
                    sold,
                    percentage,
                }
            })
            .collect();

        Ok(SimulationSummary {
            elapsed,
            population,
            workers: self.config.workers,
            ledger_revenue: ledger.revenue(),
            ledger_served: ledger.customers_served(),
            metrics: service.metrics,
            sales,
            final_inventory,
            maintenance: maintenance.statuses(),
        })
    }
}
