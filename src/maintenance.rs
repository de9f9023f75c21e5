//! Operaciones de las estaciones al terminar la atencion de clientes: limpieza,
//! reabastecimiento y control de calidad corren en paralelo y se esperan las tres.
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        CLEANING_STEPS, CLEANING_STEP_IN_MS, QUALITY_CONTROL_IN_MS, RESTOCKING_WAIT_IN_MS,
    },
    errors::CoffeeShopError,
    inventory::Restocked,
    replenisher::Replenisher,
    report::{ReportEvent, ReportSink},
    shift::ShiftSignal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaintenanceTask {
    Cleaning,
    Restocking,
    QualityControl,
}

impl MaintenanceTask {
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceTask::Cleaning => "CLEANING",
            MaintenanceTask::Restocking => "RESTOCKING",
            MaintenanceTask::QualityControl => "QUALITY CONTROL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStatus {
    pub task: MaintenanceTask,
    pub error: Option<String>,
}

impl TaskStatus {
    fn of<T>(task: MaintenanceTask, result: &Result<T, CoffeeShopError>) -> TaskStatus {
        TaskStatus {
            task,
            error: result.as_ref().err().map(|err| err.to_string()),
        }
    }

    pub fn completed(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceTimings {
    pub cleaning_steps: u32,
    pub cleaning_step_ms: u64,
    pub restocking_wait_ms: u64,
    pub quality_control_ms: u64,
}

impl MaintenanceTimings {
    pub fn instant() -> MaintenanceTimings {
        MaintenanceTimings {
            cleaning_step_ms: 0,
            restocking_wait_ms: 0,
            quality_control_ms: 0,
            ..MaintenanceTimings::default()
        }
    }
}

impl Default for MaintenanceTimings {
    fn default() -> MaintenanceTimings {
        MaintenanceTimings {
            cleaning_steps: CLEANING_STEPS,
            cleaning_step_ms: CLEANING_STEP_IN_MS,
            restocking_wait_ms: RESTOCKING_WAIT_IN_MS,
            quality_control_ms: QUALITY_CONTROL_IN_MS,
        }
    }
}

/// Resultado de cada tarea por separado; que una falle no afecta a las otras.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceReport {
    pub cleaning: Result<(), CoffeeShopError>,
    pub restocking: Result<Vec<Restocked>, CoffeeShopError>,
    pub quality_control: Result<(), CoffeeShopError>,
}

impl MaintenanceReport {
    pub fn statuses(&self) -> Vec<TaskStatus> {
        vec![
            TaskStatus::of(MaintenanceTask::Cleaning, &self.cleaning),
            TaskStatus::of(MaintenanceTask::Restocking, &self.restocking),
            TaskStatus::of(MaintenanceTask::QualityControl, &self.quality_control),
        ]
    }

    pub fn all_completed(&self) -> bool {
        self.statuses().iter().all(TaskStatus::completed)
    }
}

pub struct MaintenanceStage {
    timings: MaintenanceTimings,
    replenisher: Replenisher,
    shift: Arc<ShiftSignal>,
    sink: Arc<dyn ReportSink>,
}

impl MaintenanceStage {
    pub fn new(
        timings: MaintenanceTimings,
        replenisher: Replenisher,
        shift: Arc<ShiftSignal>,
        sink: Arc<dyn ReportSink>,
    ) -> MaintenanceStage {
        MaintenanceStage {
            timings,
            replenisher,
            shift,
            sink,
        }
    }

    pub fn run(self) -> MaintenanceReport {
        let MaintenanceStage {
            timings,
            replenisher,
            shift,
            sink,
        } = self;

        let cleaning = {
            let shift = shift.clone();
            let sink = sink.clone();
            thread::spawn(move || {
                sink.report(ReportEvent::TaskStarted(MaintenanceTask::Cleaning));
                clean_equipment(timings, &shift, &*sink)
            })
        };
        let restocking = {
            let sink = sink.clone();
            thread::spawn(move || {
                sink.report(ReportEvent::TaskStarted(MaintenanceTask::Restocking));
                replenisher.replenish()
            })
        };
        let quality_control = {
            let shift = shift.clone();
            let sink = sink.clone();
            thread::spawn(move || {
                sink.report(ReportEvent::TaskStarted(MaintenanceTask::QualityControl));
                shift.sleep(Duration::from_millis(timings.quality_control_ms))
            })
        };

        let report = MaintenanceReport {
            cleaning: join_task(MaintenanceTask::Cleaning, cleaning),
            restocking: join_task(MaintenanceTask::Restocking, restocking),
            quality_control: join_task(MaintenanceTask::QualityControl, quality_control),
        };
        for status in report.statuses() {
            sink.report(ReportEvent::TaskFinished(status));
        }
        report
    }
}

fn clean_equipment(
    timings: MaintenanceTimings,
    shift: &ShiftSignal,
    sink: &dyn ReportSink,
) -> Result<(), CoffeeShopError> {
    for step in 1..=timings.cleaning_steps {
        shift.sleep(Duration::from_millis(timings.cleaning_step_ms))?;
        sink.report(ReportEvent::CleaningStep {
            step,
            total: timings.cleaning_steps,
        });
    }
    Ok(())
}

fn join_task<T>(
    task: MaintenanceTask,
    handle: JoinHandle<Result<T, CoffeeShopError>>,
) -> Result<T, CoffeeShopError> {
    let result = handle
        .join()
        .unwrap_or_else(|_| Err(CoffeeShopError::WorkerPanicked(format!("{:?} task", task))));
    debug!("[{}] Joined", task.label());
    result
}
