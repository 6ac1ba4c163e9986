use log::{debug, info};

use crate::domain::cart::{validate_qty, Cart, CartLine, CartView};
use crate::domain::catalog::ProductRef;
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;

pub struct CartService<R> {
    repo: R,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_cart(
        &self,
        owner_id: Option<i32>,
        for_anonymous_user: bool,
    ) -> Result<Cart, DomainError> {
        let cart = self.repo.create_cart(owner_id, for_anonymous_user)?;
        info!("created cart {} for owner {:?}", cart.id, owner_id);
        Ok(cart)
    }

    pub fn get_cart(&self, cart_id: i32) -> Result<CartView, DomainError> {
        self.repo
            .find_cart(cart_id)?
            .ok_or(DomainError::NotFound("Cart"))
    }

    /// Puts a product into the cart. A product already in the cart keeps its
    /// existing line; `created` tells the two cases apart.
    pub fn add_product(
        &self,
        cart_id: i32,
        customer_id: i32,
        product: ProductRef,
        qty: i32,
    ) -> Result<(CartLine, bool), DomainError> {
        validate_qty(qty)?;
        self.get_cart(cart_id)?;
        if let Some(existing) = self.repo.find_line_for_product(cart_id, product)? {
            debug!("cart {cart_id} already holds {product}");
            return Ok((existing, false));
        }
        let line = self
            .repo
            .save_line(CartLine::new(customer_id, cart_id, product, qty))?;
        info!(
            "added {product} x{qty} to cart {cart_id}, line price {}",
            line.final_price
        );
        Ok((line, true))
    }

    /// Applies a product swap and/or a new quantity to a line in a single
    /// write. Nothing is stored when either change is rejected.
    pub fn update_line(
        &self,
        cart_id: i32,
        line_id: i32,
        product: Option<ProductRef>,
        qty: Option<i32>,
    ) -> Result<CartLine, DomainError> {
        if product.is_none() && qty.is_none() {
            return Err(DomainError::InvalidInput(
                "nothing to update: give a product or a qty".to_string(),
            ));
        }
        if let Some(qty) = qty {
            validate_qty(qty)?;
        }
        let mut line = self.line_in_cart(cart_id, line_id)?;
        if let Some(product) = product {
            if let Some(other) = self.repo.find_line_for_product(cart_id, product)? {
                if other.id != line.id {
                    return Err(DomainError::Conflict(format!(
                        "cart {cart_id} already holds {product}"
                    )));
                }
            }
            line.product = product;
        }
        if let Some(qty) = qty {
            line.qty = qty;
        }
        let line = self.repo.save_line(line)?;
        info!(
            "cart {cart_id} line {line_id} now {} x{}, price {}",
            line.product, line.qty, line.final_price
        );
        Ok(line)
    }

    pub fn change_qty(&self, cart_id: i32, line_id: i32, qty: i32) -> Result<CartLine, DomainError> {
        self.update_line(cart_id, line_id, None, Some(qty))
    }

    pub fn change_product(
        &self,
        cart_id: i32,
        line_id: i32,
        product: ProductRef,
    ) -> Result<CartLine, DomainError> {
        self.update_line(cart_id, line_id, Some(product), None)
    }

    pub fn remove_line(&self, cart_id: i32, line_id: i32) -> Result<(), DomainError> {
        if !self.repo.remove_line(cart_id, line_id)? {
            return Err(DomainError::NotFound("Cart line"));
        }
        info!("removed line {line_id} from cart {cart_id}");
        Ok(())
    }

    fn line_in_cart(&self, cart_id: i32, line_id: i32) -> Result<CartLine, DomainError> {
        self.repo
            .find_line(line_id)?
            .filter(|line| line.cart_id == cart_id)
            .ok_or(DomainError::NotFound("Cart line"))
    }
}
