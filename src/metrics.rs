//! Reduccion de las metricas de servicio. Cada worker acumula las suyas y se
//! combinan al final; el orden en que se combinan no cambia el resultado.
use std::time::Duration;

use serde::Serialize;

use crate::customer::CustomerReport;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ServiceMetrics {
    pub total_revenue: f64,
    pub total_served: u64,
    /// `None` mientras no haya ningun cliente atendido
    pub max_latency: Option<Duration>,
    pub min_latency: Option<Duration>,
}

impl ServiceMetrics {
    pub fn new() -> ServiceMetrics {
        ServiceMetrics::default()
    }

    /// Suma un cliente. Los rechazados no aportan ni a la caja ni a las latencias.
    pub fn fold(&mut self, report: &CustomerReport) {
        if !report.is_served() {
            return;
        }
        self.total_revenue += report.charged;
        self.total_served += 1;
        self.max_latency = max_latency(self.max_latency, Some(report.latency));
        self.min_latency = min_latency(self.min_latency, Some(report.latency));
    }

    pub fn combine(self, other: ServiceMetrics) -> ServiceMetrics {
        ServiceMetrics {
            total_revenue: self.total_revenue + other.total_revenue,
            total_served: self.total_served + other.total_served,
            max_latency: max_latency(self.max_latency, other.max_latency),
            min_latency: min_latency(self.min_latency, other.min_latency),
        }
    }
}

fn max_latency(a: Option<Duration>, b: Option<Duration>) -> Option<Duration> {
    a.max(b)
}

fn min_latency(a: Option<Duration>, b: Option<Duration>) -> Option<Duration> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
