use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::catalog::{check_length, TEXT_COLUMN_LEN};
use super::errors::DomainError;

/// Order progress. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    New,
    InProgress,
    Ready,
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Ready => "is_ready",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "in_progress" => Ok(OrderStatus::InProgress),
            "is_ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuyingType {
    SelfPickup,
    #[default]
    Delivery,
}

impl BuyingType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuyingType::SelfPickup => "self",
            BuyingType::Delivery => "delivery",
        }
    }
}

impl fmt::Display for BuyingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuyingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(BuyingType::SelfPickup),
            "delivery" => Ok(BuyingType::Delivery),
            other => Err(DomainError::InvalidInput(format!(
                "unknown buying type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub cart_id: Option<i32>,
    pub address: Option<String>,
    pub buying_type: BuyingType,
    pub comment: Option<String>,
    pub order_date: NaiveDate,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidInput(format!("{field} is required")));
            }
        }
        check_length("first_name", &self.first_name, TEXT_COLUMN_LEN)?;
        check_length("last_name", &self.last_name, TEXT_COLUMN_LEN)?;
        check_length("phone", &self.phone, PHONE_LEN)?;
        if let Some(address) = &self.address {
            check_length("address", address, ORDER_ADDRESS_LEN)?;
        }
        Ok(())
    }
}

pub const PHONE_LEN: usize = 20;
pub const ORDER_ADDRESS_LEN: usize = 1024;

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i32,
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub cart_id: Option<i32>,
    pub address: Option<String>,
    pub status: OrderStatus,
    pub buying_type: BuyingType,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub order_date: NaiveDate,
}

/// Rows skipped before `page` (1-based) of `limit` rows each.
pub fn page_offset(page: i64, limit: i64) -> Result<i64, DomainError> {
    page.checked_sub(1)
        .and_then(|skipped| skipped.checked_mul(limit))
        .filter(|offset| *offset >= 0)
        .ok_or_else(|| DomainError::InvalidInput(format!("page {page} is out of range")))
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i32,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(phone) = &self.phone {
            check_length("phone", phone, PHONE_LEN)?;
        }
        if let Some(address) = &self.address {
            check_length("address", address, TEXT_COLUMN_LEN)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CustomerView {
    pub customer: Customer,
    pub orders: Vec<OrderView>,
}
