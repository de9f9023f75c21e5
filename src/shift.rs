//! Senal de fin de turno. Todas las esperas de la simulacion (preparacion de
//! bebidas, tareas de mantenimiento) pasan por `ShiftSignal::sleep` para poder
//! interrumpirse.
use std::{
    sync::{Condvar, Mutex},
    time::{Duration, Instant},
};

use crate::errors::CoffeeShopError;

pub struct ShiftSignal {
    cancelled: Mutex<bool>,
    cond: Condvar,
    deadline: Mutex<Option<Instant>>,
}

impl ShiftSignal {
    pub fn new() -> ShiftSignal {
        ShiftSignal {
            cancelled: Mutex::new(false),
            cond: Condvar::new(),
            deadline: Mutex::new(None),
        }
    }

    pub fn with_deadline(deadline: Instant) -> ShiftSignal {
        ShiftSignal {
            deadline: Mutex::new(Some(deadline)),
            ..ShiftSignal::new()
        }
    }

    /// Fija el deadline del turno; las esperas ya en curso no lo ven.
    pub fn set_deadline(&self, deadline: Instant) -> Result<(), CoffeeShopError> {
        *self.deadline.lock()? = Some(deadline);
        Ok(())
    }

    pub fn cancel(&self) -> Result<(), CoffeeShopError> {
        let mut cancelled = self.cancelled.lock()?;
        *cancelled = true;
        self.cond.notify_all();
        Ok(())
    }

    pub fn is_cancelled(&self) -> Result<bool, CoffeeShopError> {
        Ok(*self.cancelled.lock()?)
    }

    /// Duerme `duration` salvo que se cancele el turno antes o que la espera
    /// termine despues del deadline.
    pub fn sleep(&self, duration: Duration) -> Result<(), CoffeeShopError> {
        let wake_up = Instant::now() + duration;
        let deadline = *self.deadline.lock()?;
        let (until, past_deadline) = match deadline {
            Some(deadline) if deadline < wake_up => (deadline, true),
            _ => (wake_up, false),
        };

        let guard = self.cancelled.lock()?;
        let timeout = until.saturating_duration_since(Instant::now());
        let (cancelled, _) = self
            .cond
            .wait_timeout_while(guard, timeout, |cancelled| {
                !*cancelled && Instant::now() < until
            })?;

        if *cancelled {
            return Err(CoffeeShopError::Cancelled);
        }
        if past_deadline {
            return Err(CoffeeShopError::DeadlineExceeded);
        }
        Ok(())
    }
}

impl Default for ShiftSignal {
    fn default() -> ShiftSignal {
        ShiftSignal::new()
    }
}
