use std::str::FromStr;

use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    page_offset, BuyingType, ListResult, NewOrder, OrderStatus, OrderView,
};
use crate::domain::ports::OrderRepository;
use crate::schema::{carts, customers, orders};

use super::models::{NewOrderRow, OrderRow};

impl TryFrom<OrderRow> for OrderView {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_str(&row.status)
            .map_err(|e| DomainError::Internal(format!("order {}: {e}", row.id)))?;
        let buying_type = BuyingType::from_str(&row.buying_type)
            .map_err(|e| DomainError::Internal(format!("order {}: {e}", row.id)))?;
        Ok(OrderView {
            id: row.id,
            customer_id: row.customer_id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            cart_id: row.cart_id,
            address: row.address,
            status,
            buying_type,
            comment: row.comment,
            created_at: row.created_at,
            order_date: row.order_date,
        })
    }
}

fn into_views(rows: Vec<OrderRow>) -> Result<Vec<OrderView>, DomainError> {
    rows.into_iter().map(OrderView::try_from).collect()
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrder) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. The customer must exist
            let customer = customers::table
                .find(order.customer_id)
                .select(customers::id)
                .first::<i32>(conn)
                .optional()?;
            if customer.is_none() {
                return Err(DomainError::NotFound("Customer"));
            }

            // 2. Flag the cart as ordered
            if let Some(cart_id) = order.cart_id {
                let updated = diesel::update(carts::table.find(cart_id))
                    .set(carts::in_order.eq(true))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(DomainError::NotFound("Cart"));
                }
            }

            // 3. Insert the order
            let order_id = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    customer_id: order.customer_id,
                    first_name: order.first_name,
                    last_name: order.last_name,
                    phone: order.phone,
                    cart_id: order.cart_id,
                    address: order.address,
                    status: OrderStatus::New.as_str().to_string(),
                    buying_type: order.buying_type.as_str().to_string(),
                    comment: order.comment,
                    order_date: order.order_date,
                })
                .returning(orders::id)
                .get_result(conn)?;

            Ok(order_id)
        })
    }

    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(OrderView::try_from)
            .transpose()
    }

    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit)?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table.count().get_result(conn)?;

            let rows = orders::table
                .select(OrderRow::as_select())
                .order((orders::created_at.desc(), orders::id.desc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: into_views(rows)?,
                total,
            })
        })
    }

    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .select(OrderRow::as_select())
            .order((orders::created_at.desc(), orders::id.desc()))
            .load(&mut conn)?;
        into_views(rows)
    }

    fn update_status(&self, id: i32, status: OrderStatus) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(orders::table.find(id))
            .set(orders::status.eq(status.as_str()))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }
}
