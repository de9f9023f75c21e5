//! Eventos que la simulacion reporta hacia afuera y el resumen final del turno.
use std::time::Duration;

use log::{info, warn};
use serde::Serialize;

use crate::{
    inventory::Restocked,
    maintenance::{MaintenanceTask, TaskStatus},
    menu::{DrinkType, Ingredient},
    metrics::ServiceMetrics,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrinkSales {
    pub drink: DrinkType,
    pub sold: u64,
    /// Porcentaje sobre los clientes atendidos, 0 si no se atendio a nadie
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub elapsed: Duration,
    pub population: u32,
    pub workers: usize,
    pub ledger_revenue: f64,
    pub ledger_served: u64,
    pub metrics: ServiceMetrics,
    pub sales: Vec<DrinkSales>,
    pub final_inventory: Vec<(Ingredient, u64)>,
    pub maintenance: Vec<TaskStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    ShiftStarted {
        customers: u32,
        workers: usize,
        /// Existencias al empezar el turno, en el orden de `Ingredient::ALL`
        inventory: Vec<(Ingredient, u64)>,
    },
    RejectedNoFunds {
        customer_id: u32,
        drink: DrinkType,
        cash: f64,
        price: f64,
    },
    RejectedNoStock {
        customer_id: u32,
        drink: DrinkType,
    },
    Preparing {
        customer_id: u32,
        drink: DrinkType,
        price: f64,
    },
    Delivered {
        customer_id: u32,
        drink: DrinkType,
    },
    Statistics {
        served: u64,
        revenue: f64,
        inventory: Vec<(Ingredient, u64)>,
    },
    ServiceFinished {
        served: u64,
        population: u32,
    },
    TaskStarted(MaintenanceTask),
    CleaningStep {
        step: u32,
        total: u32,
    },
    Restocked(Restocked),
    TaskFinished(TaskStatus),
    Summary(SimulationSummary),
}

/// Destino de los eventos. Se comparte entre todos los threads de la simulacion.
pub trait ReportSink: Send + Sync {
    fn report(&self, event: ReportEvent);
}

/// Escribe cada evento como una linea de log.
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&self, event: ReportEvent) {
        match event {
            ReportEvent::ShiftStarted {
                customers,
                workers,
                inventory,
            } => info!(
                "[SHIFT] Serving {} customers with {} workers, stock: {}",
                customers,
                workers,
                format_inventory(&inventory)
            ),
            ReportEvent::RejectedNoFunds {
                customer_id,
                drink,
                cash,
                price,
            } => info!(
                "[CUSTOMER {}] Not enough money for {:?} (has {:.2}, needs {:.2})",
                customer_id, drink, cash, price
            ),
            ReportEvent::RejectedNoStock { customer_id, drink } => {
                info!("[CUSTOMER {}] Not enough ingredients for {:?}", customer_id, drink)
            }
            ReportEvent::Preparing {
                customer_id,
                drink,
                price,
            } => info!(
                "[CUSTOMER {}] Preparing {:?} (price {:.2})",
                customer_id, drink, price
            ),
            ReportEvent::Delivered { customer_id, drink } => {
                info!("[CUSTOMER {}] {:?} delivered", customer_id, drink)
            }
            ReportEvent::Statistics {
                served,
                revenue,
                inventory,
            } => info!(
                "[STATISTICS] Served={} | Revenue={:.2} | Inventory={}",
                served,
                revenue,
                format_inventory(&inventory)
            ),
            ReportEvent::ServiceFinished { served, population } => {
                info!("[SHIFT] Customer service finished, {}/{} served", served, population)
            }
            ReportEvent::TaskStarted(task) => info!("[{}] Starting", task.label()),
            ReportEvent::CleaningStep { step, total } => info!(
                "[{}] Cleaning equipment {}/{}",
                MaintenanceTask::Cleaning.label(),
                step,
                total
            ),
            ReportEvent::Restocked(restocked) => info!(
                "[{}] Restocked {:?} from {} to {}",
                MaintenanceTask::Restocking.label(),
                restocked.ingredient,
                restocked.before,
                restocked.after
            ),
            ReportEvent::TaskFinished(status) => match &status.error {
                None => info!("[{}] Completed", status.task.label()),
                Some(reason) => warn!("[{}] Failed: {}", status.task.label(), reason),
            },
            ReportEvent::Summary(summary) => log_summary(&summary),
        }
    }
}

fn format_inventory(inventory: &[(Ingredient, u64)]) -> String {
    inventory
        .iter()
        .map(|(ingredient, remaining)| format!("{:?}={}", ingredient, remaining))
        .collect::<Vec<String>>()
        .join(" ")
}

fn format_latency(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("{} us", latency.as_micros()),
        None => "n/a (no customers served)".to_string(),
    }
}

fn log_summary(summary: &SimulationSummary) {
    info!("[SUMMARY] Total simulation time: {:.3} s", summary.elapsed.as_secs_f64());
    info!("[SUMMARY] Cash register: ${:.2}", summary.ledger_revenue);
    info!("[SUMMARY] Sales by reduction: ${:.2}", summary.metrics.total_revenue);
    info!(
        "[SUMMARY] Customers processed: {}/{}",
        summary.ledger_served, summary.population
    );
    info!("[SUMMARY] Customers served (reduction): {}", summary.metrics.total_served);
    info!("[SUMMARY] Max service time: {}", format_latency(summary.metrics.max_latency));
    info!("[SUMMARY] Min service time: {}", format_latency(summary.metrics.min_latency));
    for sales in &summary.sales {
        info!(
            "[SUMMARY] {:?}: {} sold ({:.2}% of total)",
            sales.drink, sales.sold, sales.percentage
        );
    }
    for (ingredient, remaining) in &summary.final_inventory {
        info!("[SUMMARY] {:?}: {} units remaining", ingredient, remaining);
    }
    for status in &summary.maintenance {
        match &status.error {
            None => info!("[SUMMARY] {}: completed", status.task.label()),
            Some(reason) => warn!("[SUMMARY] {}: failed ({})", status.task.label(), reason),
        }
    }
}
