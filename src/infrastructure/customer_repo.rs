use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, NewCustomer};
use crate::domain::ports::CustomerRepository;
use crate::schema::customers;

use super::models::{CustomerRow, NewCustomerRow};

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            user_id: row.user_id,
            phone: row.phone,
            address: row.address,
        }
    }
}

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
                user_id: customer.user_id,
                phone: customer.phone,
                address: customer.address,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::DieselCustomerRepository;
    use crate::domain::order::NewCustomer;
    use crate::domain::ports::CustomerRepository;
    use crate::infrastructure::test_support::setup_db;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn create_and_find_by_id_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCustomerRepository::new(pool);
        let user_id = Uuid::new_v4();

        let created = repo
            .create(NewCustomer {
                user_id,
                phone: Some("+1 555 0100".to_string()),
                address: None,
            })
            .expect("create failed");

        let found = repo
            .find_by_id(created.id)
            .expect("find failed")
            .expect("customer should exist");
        assert_eq!(found.user_id, user_id);
        assert_eq!(found.phone.as_deref(), Some("+1 555 0100"));
        assert!(found.address.is_none());
        assert!(repo.find_by_id(created.id + 1).expect("find failed").is_none());
    }
}
