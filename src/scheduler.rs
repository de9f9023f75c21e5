//! Reparto de los clientes entre un pool fijo de workers.
//!
//! Los workers no reciben una particion fija: cada uno toma la siguiente tanda
//! libre de la cola compartida, asi los que atienden bebidas rapidas toman mas
//! clientes. Cada worker acumula sus propias metricas y se combinan despues del join.
use std::{
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};

use log::{debug, error, warn};

use crate::{
    customer::{Customer, CustomerReport},
    customer_processor::CustomerProcessor,
    customers_queue::CustomersQueue,
    errors::CoffeeShopError,
    metrics::ServiceMetrics,
};

/// Resultado de atender a toda la poblacion.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReport {
    pub metrics: ServiceMetrics,
    /// Un reporte por cliente, ordenados por id
    pub customers: Vec<CustomerReport>,
}

struct WorkerReport {
    metrics: ServiceMetrics,
    customers: Vec<CustomerReport>,
}

type WorkerHandle = JoinHandle<Result<WorkerReport, CoffeeShopError>>;

struct Worker {
    id: usize,
    queue: Arc<Mutex<CustomersQueue>>,
    processor: CustomerProcessor,
    chunk_size: usize,
}

impl Worker {
    fn serve_customers(&self) -> Result<WorkerReport, CoffeeShopError> {
        let mut report = WorkerReport {
            metrics: ServiceMetrics::new(),
            customers: Vec::new(),
        };
        loop {
            let chunk = self.queue.lock()?.pop_chunk(self.chunk_size);
            if chunk.is_empty() {
                debug!(
                    "[WORKER {}] No more customers, served {}",
                    self.id, report.metrics.total_served
                );
                return Ok(report);
            }

            debug!(
                "[WORKER {}] Takes customers {:?}",
                self.id,
                chunk.iter().map(|customer| customer.id).collect::<Vec<u32>>()
            );
            for customer in chunk {
                let customer_report = match self.processor.process(customer) {
                    Ok(customer_report) => customer_report,
                    Err(err) => {
                        self.stop_shift();
                        return Err(err);
                    }
                };
                report.metrics.fold(&customer_report);
                report.customers.push(customer_report);
            }
        }
    }

    /// Un error corta el turno para todos: los demas workers dejan de tomar clientes.
    fn stop_shift(&self) {
        if let Err(err) = self.processor.shift().cancel() {
            warn!("[WORKER {}] Could not cancel the shift: {}", self.id, err);
        }
    }
}

pub struct ServiceScheduler {
    workers: usize,
    chunk_size: usize,
}

impl ServiceScheduler {
    pub fn new(workers: usize, chunk_size: usize) -> Result<ServiceScheduler, CoffeeShopError> {
        if workers == 0 {
            return Err(CoffeeShopError::InvalidConfig(
                "the worker pool needs at least one worker".to_string(),
            ));
        }
        if chunk_size == 0 {
            return Err(CoffeeShopError::InvalidConfig(
                "the chunk size must be at least one customer".to_string(),
            ));
        }
        Ok(ServiceScheduler {
            workers,
            chunk_size,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Atiende a todos los clientes y espera a que terminen todos los workers.
    /// Cualquier error de un worker cancela el turno y lo hace fallar entero; se
    /// devuelve el error que lo causo y no las cancelaciones que le siguieron.
    pub fn serve(
        &self,
        customers: Vec<Customer>,
        processor: &CustomerProcessor,
    ) -> Result<ServiceReport, CoffeeShopError> {
        let population = customers.len();
        let queue = Arc::new(Mutex::new(CustomersQueue::from(customers)));

        let worker_threads: Vec<WorkerHandle> = (0..self.workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    queue: queue.clone(),
                    processor: processor.clone(),
                    chunk_size: self.chunk_size,
                };
                thread::spawn(move || worker.serve_customers())
            })
            .collect();

        let mut metrics = ServiceMetrics::new();
        let mut reports = Vec::with_capacity(population);
        let mut first_error: Option<CoffeeShopError> = None;
        for (id, worker) in worker_threads.into_iter().enumerate() {
            match worker.join() {
                Ok(Ok(report)) => {
                    metrics = metrics.combine(report.metrics);
                    reports.extend(report.customers);
                }
                Ok(Err(err)) => {
                    error!("[WORKER {}] Failed: {}", id, err);
                    keep_first_cause(&mut first_error, err);
                }
                Err(_) => {
                    error!("[WORKER {}] Panicked", id);
                    let err = CoffeeShopError::WorkerPanicked(format!("worker {}", id));
                    keep_first_cause(&mut first_error, err);
                }
            }
        }
        if let Some(err) = first_error {
            return Err(err);
        }

        reports.sort_by_key(|report| report.customer.id);
        Ok(ServiceReport {
            metrics,
            customers: reports,
        })
    }
}

fn keep_first_cause(first_error: &mut Option<CoffeeShopError>, err: CoffeeShopError) {
    match first_error {
        None => *first_error = Some(err),
        Some(CoffeeShopError::Cancelled) if err != CoffeeShopError::Cancelled => {
            *first_error = Some(err)
        }
        Some(_) => {}
    }
}
