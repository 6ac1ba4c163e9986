use bigdecimal::BigDecimal;

use super::catalog::{check_amount, ProductRef};
use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub total_products: i32,
    pub final_price: BigDecimal,
    pub in_order: bool,
    pub for_anonymous_user: bool,
}

/// One product reference and its quantity inside a cart.
///
/// `final_price` is derived: it is overwritten by [`CartLine::reprice`]
/// every time the line is written.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: Option<i32>,
    pub customer_id: i32,
    pub cart_id: i32,
    pub product: ProductRef,
    pub qty: i32,
    pub final_price: BigDecimal,
}

impl CartLine {
    pub fn new(customer_id: i32, cart_id: i32, product: ProductRef, qty: i32) -> Self {
        Self {
            id: None,
            customer_id,
            cart_id,
            product,
            qty,
            final_price: BigDecimal::from(0),
        }
    }

    /// Sets `final_price` to `qty * unit_price`, whatever it held before.
    /// A total too large for the price column leaves the line untouched.
    pub fn reprice(&mut self, unit_price: &BigDecimal) -> Result<(), DomainError> {
        validate_qty(self.qty)?;
        let total = line_total(self.qty, unit_price);
        check_amount("line total", &total)?;
        self.final_price = total;
        Ok(())
    }
}

pub fn validate_qty(qty: i32) -> Result<(), DomainError> {
    if qty <= 0 {
        return Err(DomainError::InvalidInput(format!(
            "quantity must be positive, got {qty}"
        )));
    }
    Ok(())
}

pub fn line_total(qty: i32, unit_price: &BigDecimal) -> BigDecimal {
    (BigDecimal::from(qty) * unit_price).with_scale(2)
}

/// Aggregates kept on the cart row. Always recomputed from the current lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    pub total_products: i32,
    pub final_price: BigDecimal,
}

impl CartTotals {
    pub fn from_line_prices<'a, I>(prices: I) -> Self
    where
        I: IntoIterator<Item = &'a BigDecimal>,
    {
        let (count, sum) = prices
            .into_iter()
            .fold((0usize, BigDecimal::from(0)), |(count, sum), price| {
                (count + 1, sum + price)
            });
        Self {
            total_products: i32::try_from(count).unwrap_or(i32::MAX),
            final_price: sum.with_scale(2),
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        check_amount("cart total", &self.final_price)
    }
}

#[derive(Debug, Clone)]
pub struct CartView {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
}
