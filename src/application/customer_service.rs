use log::info;

use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, CustomerView, NewCustomer};
use crate::domain::ports::{CustomerRepository, OrderRepository};

pub struct CustomerService<C, O> {
    customers: C,
    orders: O,
}

impl<C: CustomerRepository, O: OrderRepository> CustomerService<C, O> {
    pub fn new(customers: C, orders: O) -> Self {
        Self { customers, orders }
    }

    pub fn create_customer(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        customer.validate()?;
        let created = self.customers.create(customer)?;
        info!("created customer {} for user {}", created.id, created.user_id);
        Ok(created)
    }

    /// The customer with the orders they placed, most recent first.
    pub fn customer_detail(&self, id: i32) -> Result<CustomerView, DomainError> {
        let customer = self
            .customers
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Customer"))?;
        let orders = self.orders.list_for_customer(customer.id)?;
        Ok(CustomerView { customer, orders })
    }
}
