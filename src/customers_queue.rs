//! Representacion de la cola de clientes
use std::collections::VecDeque;

use crate::customer::Customer;

/// Cola de clientes a atender. Los workers toman de a tandas los primeros clientes que quedan.
pub struct CustomersQueue {
    customers: VecDeque<Customer>,
}

impl CustomersQueue {
    pub fn new() -> CustomersQueue {
        CustomersQueue {
            customers: VecDeque::new(),
        }
    }

    pub fn push(&mut self, customer: Customer) {
        self.customers.push_back(customer);
    }

    /// Saca hasta `size` clientes del frente de la cola.
    pub fn pop_chunk(&mut self, size: usize) -> Vec<Customer> {
        let taken = size.min(self.customers.len());
        self.customers.drain(..taken).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }
}

impl From<Vec<Customer>> for CustomersQueue {
    fn from(customers: Vec<Customer>) -> CustomersQueue {
        CustomersQueue {
            customers: customers.into(),
        }
    }
}
