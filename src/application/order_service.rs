use log::info;

use crate::domain::errors::DomainError;
use crate::domain::order::{page_offset, ListResult, NewOrder, OrderStatus, OrderView};
use crate::domain::ports::OrderRepository;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn place_order(&self, order: NewOrder) -> Result<i32, DomainError> {
        order.validate()?;
        let customer_id = order.customer_id;
        let cart_id = order.cart_id;
        let id = self.repo.create(order)?;
        info!("order {id} placed by customer {customer_id} for cart {cart_id:?}");
        Ok(id)
    }

    pub fn get_order(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        self.repo.find_by_id(id)
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let (page, limit) = (page.max(1), limit.clamp(1, 100));
        page_offset(page, limit)?;
        self.repo.list(page, limit)
    }

    /// Any status may be set from any other.
    pub fn update_status(&self, id: i32, status: OrderStatus) -> Result<(), DomainError> {
        if !self.repo.update_status(id, status)? {
            return Err(DomainError::NotFound("Order"));
        }
        info!("order {id} is now {status}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::order::BuyingType;

    #[derive(Default)]
    struct InMemoryOrders {
        orders: Mutex<Vec<OrderView>>,
        last_list: Mutex<Option<(i64, i64)>>,
    }

    impl OrderRepository for InMemoryOrders {
        fn create(&self, order: NewOrder) -> Result<i32, DomainError> {
            let mut orders = self.orders.lock().unwrap();
            let id = orders.len() as i32 + 1;
            orders.push(OrderView {
                id,
                customer_id: order.customer_id,
                first_name: order.first_name,
                last_name: order.last_name,
                phone: order.phone,
                cart_id: order.cart_id,
                address: order.address,
                status: OrderStatus::New,
                buying_type: order.buying_type,
                comment: order.comment,
                created_at: Utc::now(),
                order_date: order.order_date,
            });
            Ok(id)
        }

        fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
            Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
        }

        fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
            *self.last_list.lock().unwrap() = Some((page, limit));
            let orders = self.orders.lock().unwrap();
            Ok(ListResult {
                items: orders.clone(),
                total: orders.len() as i64,
            })
        }

        fn list_for_customer(&self, customer_id: i32) -> Result<Vec<OrderView>, DomainError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.customer_id == customer_id)
                .cloned()
                .collect())
        }

        fn update_status(&self, id: i32, status: OrderStatus) -> Result<bool, DomainError> {
            let mut orders = self.orders.lock().unwrap();
            match orders.iter_mut().find(|o| o.id == id) {
                Some(order) => {
                    order.status = status;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    fn new_order(first_name: &str) -> NewOrder {
        NewOrder {
            customer_id: 1,
            first_name: first_name.to_string(),
            last_name: "Hopper".to_string(),
            phone: "+1 555 0199".to_string(),
            cart_id: None,
            address: None,
            buying_type: BuyingType::SelfPickup,
            comment: None,
            order_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn placed_order_starts_as_new() {
        let service = OrderService::new(InMemoryOrders::default());

        let id = service.place_order(new_order("Grace")).unwrap();

        let order = service.get_order(id).unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.buying_type, BuyingType::SelfPickup);
    }

    #[test]
    fn invalid_order_is_not_stored() {
        let service = OrderService::new(InMemoryOrders::default());

        let err = service.place_order(new_order("  ")).unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(service.list_orders(1, 20).unwrap().total, 0);
    }

    #[test]
    fn list_clamps_page_and_limit() {
        let repo = InMemoryOrders::default();
        let service = OrderService::new(repo);

        service.list_orders(0, 1000).unwrap();
        assert_eq!(*service.repo.last_list.lock().unwrap(), Some((1, 100)));

        service.list_orders(3, 0).unwrap();
        assert_eq!(*service.repo.last_list.lock().unwrap(), Some((3, 1)));
    }

    #[test]
    fn page_past_the_addressable_range_is_rejected() {
        let service = OrderService::new(InMemoryOrders::default());

        assert!(matches!(
            service.list_orders(i64::MAX, 100),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(service.repo.last_list.lock().unwrap().is_none());
    }

    #[test]
    fn status_update_on_missing_order_is_not_found() {
        let service = OrderService::new(InMemoryOrders::default());
        let id = service.place_order(new_order("Grace")).unwrap();

        service.update_status(id, OrderStatus::Completed).unwrap();
        assert_eq!(
            service.get_order(id).unwrap().unwrap().status,
            OrderStatus::Completed
        );
        assert!(matches!(
            service.update_status(id + 1, OrderStatus::Ready),
            Err(DomainError::NotFound("Order"))
        ));
    }
}
