use std::str::FromStr;

use bigdecimal::BigDecimal;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::cart::{Cart, CartLine, CartTotals, CartView};
use crate::domain::catalog::{ProductKind, ProductRef};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::{cart_products, carts, notebooks, smartphones};

use super::models::{CartProductRow, CartRow, NewCartProductRow, NewCartRow};

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Cart {
            id: row.id,
            owner_id: row.owner_id,
            total_products: row.total_products,
            final_price: row.final_price,
            in_order: row.in_order,
            for_anonymous_user: row.for_anonymous_user,
        }
    }
}

impl TryFrom<CartProductRow> for CartLine {
    type Error = DomainError;

    fn try_from(row: CartProductRow) -> Result<Self, Self::Error> {
        let kind = ProductKind::from_str(&row.content_type).map_err(|_| {
            DomainError::Internal(format!(
                "cart line {} references unknown product type '{}'",
                row.id, row.content_type
            ))
        })?;
        Ok(CartLine {
            id: Some(row.id),
            customer_id: row.customer_id,
            cart_id: row.cart_id,
            product: ProductRef::new(kind, row.object_id),
            qty: row.qty,
            final_price: row.final_price,
        })
    }
}

/// Resolves the polymorphic reference to the product's current unit price.
fn unit_price(conn: &mut PgConnection, product: ProductRef) -> QueryResult<Option<BigDecimal>> {
    match product.kind {
        ProductKind::Notebook => notebooks::table
            .find(product.id)
            .select(notebooks::price)
            .first(conn)
            .optional(),
        ProductKind::Smartphone => smartphones::table
            .find(product.id)
            .select(smartphones::price)
            .first(conn)
            .optional(),
    }
}

fn refresh_totals(conn: &mut PgConnection, cart_id: i32) -> Result<(), DomainError> {
    let prices: Vec<BigDecimal> = cart_products::table
        .filter(cart_products::cart_id.eq(cart_id))
        .select(cart_products::final_price)
        .load(conn)?;
    let totals = CartTotals::from_line_prices(&prices);
    totals.check()?;
    diesel::update(carts::table.find(cart_id))
        .set((
            carts::total_products.eq(totals.total_products),
            carts::final_price.eq(totals.final_price),
        ))
        .execute(conn)?;
    Ok(())
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CartRepository for DieselCartRepository {
    fn create_cart(
        &self,
        owner_id: Option<i32>,
        for_anonymous_user: bool,
    ) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(carts::table)
            .values(&NewCartRow {
                owner_id,
                for_anonymous_user,
            })
            .returning(CartRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_cart(&self, id: i32) -> Result<Option<CartView>, DomainError> {
        let mut conn = self.pool.get()?;

        let cart = carts::table
            .find(id)
            .select(CartRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let lines = CartProductRow::belonging_to(&cart)
            .order(cart_products::id.asc())
            .select(CartProductRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(CartLine::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CartView {
            cart: cart.into(),
            lines,
        }))
    }

    fn find_line(&self, id: i32) -> Result<Option<CartLine>, DomainError> {
        let mut conn = self.pool.get()?;
        cart_products::table
            .find(id)
            .select(CartProductRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(CartLine::try_from)
            .transpose()
    }

    fn find_line_for_product(
        &self,
        cart_id: i32,
        product: ProductRef,
    ) -> Result<Option<CartLine>, DomainError> {
        let mut conn = self.pool.get()?;
        cart_products::table
            .filter(cart_products::cart_id.eq(cart_id))
            .filter(cart_products::content_type.eq(product.kind.as_str()))
            .filter(cart_products::object_id.eq(product.id))
            .select(CartProductRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(CartLine::try_from)
            .transpose()
    }

    fn save_line(&self, mut line: CartLine) -> Result<CartLine, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Price from the product the line points at, overwriting
            //    whatever the caller left in final_price.
            let price = unit_price(conn, line.product)?
                .ok_or(DomainError::ReferenceResolution(line.product))?;
            line.reprice(&price)?;

            // 2. Upsert the line
            let id = match line.id {
                Some(id) => {
                    let updated = diesel::update(cart_products::table.find(id))
                        .set((
                            cart_products::content_type.eq(line.product.kind.as_str()),
                            cart_products::object_id.eq(line.product.id),
                            cart_products::qty.eq(line.qty),
                            cart_products::final_price.eq(line.final_price.clone()),
                        ))
                        .execute(conn)?;
                    if updated == 0 {
                        return Err(DomainError::NotFound("Cart line"));
                    }
                    id
                }
                None => diesel::insert_into(cart_products::table)
                    .values(&NewCartProductRow {
                        customer_id: line.customer_id,
                        cart_id: line.cart_id,
                        content_type: line.product.kind.as_str().to_string(),
                        object_id: line.product.id,
                        qty: line.qty,
                        final_price: line.final_price.clone(),
                    })
                    .returning(cart_products::id)
                    .get_result(conn)?,
            };
            line.id = Some(id);

            // 3. Cart aggregates follow the lines
            refresh_totals(conn, line.cart_id)?;

            Ok(line)
        })
    }

    fn remove_line(&self, cart_id: i32, line_id: i32) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let deleted = diesel::delete(
                cart_products::table
                    .filter(cart_products::id.eq(line_id))
                    .filter(cart_products::cart_id.eq(cart_id)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Ok(false);
            }
            refresh_totals(conn, cart_id)?;
            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::DieselCartRepository;
    use crate::domain::cart::CartLine;
    use crate::domain::catalog::{ProductKind, ProductRef};
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CartRepository;
    use crate::infrastructure::models::CartProductRow;
    use crate::infrastructure::test_support::{
        category, customer, dec, notebook, setup_db, smartphone,
    };

    fn line_row(content_type: &str) -> CartProductRow {
        CartProductRow {
            id: 11,
            customer_id: 1,
            cart_id: 3,
            content_type: content_type.to_string(),
            object_id: 5,
            qty: 2,
            final_price: dec("501.00"),
        }
    }

    #[test]
    fn stored_line_row_resolves_its_product_type() {
        let line = CartLine::try_from(line_row("smartphone")).unwrap();
        assert_eq!(line.id, Some(11));
        assert_eq!(line.product, ProductRef::new(ProductKind::Smartphone, 5));
        assert_eq!(line.final_price, dec("501.00"));
    }

    #[test]
    fn stored_line_with_unregistered_type_is_internal() {
        assert!(matches!(
            CartLine::try_from(line_row("tablet")),
            Err(DomainError::Internal(ref m)) if m.contains("tablet")
        ));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn saved_line_price_is_qty_times_unit_price_whatever_was_supplied() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCartRepository::new(pool.clone());
        let cat = category(&pool, "Notebooks", "notebooks");
        let product = notebook(&pool, cat.id, "zenbook", "749.99");
        let buyer = customer(&pool);
        let cart = repo.create_cart(Some(buyer.id), false).expect("create cart failed");

        let mut line = CartLine::new(buyer.id, cart.id, product.product_ref(), 3);
        line.final_price = dec("0.01");
        let saved = repo.save_line(line).expect("save failed");

        assert!(saved.id.is_some());
        assert_eq!(saved.final_price, dec("2249.97"));

        let stored = repo
            .find_line(saved.id.expect("id"))
            .expect("find failed")
            .expect("line should exist");
        assert_eq!(stored.final_price, dec("2249.97"));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn updating_qty_or_product_reprices_and_refreshes_cart_totals() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCartRepository::new(pool.clone());
        let notebooks = category(&pool, "Notebooks", "notebooks");
        let phones = category(&pool, "Smartphones", "smartphones");
        let laptop = notebook(&pool, notebooks.id, "laptop", "1000.00");
        let phone = smartphone(&pool, phones.id, "phone", "300.50");
        let buyer = customer(&pool);
        let cart = repo.create_cart(Some(buyer.id), false).expect("create cart failed");

        let mut line = repo
            .save_line(CartLine::new(buyer.id, cart.id, laptop.product_ref(), 1))
            .expect("save failed");
        repo.save_line(CartLine::new(buyer.id, cart.id, phone.product_ref(), 2))
            .expect("save failed");

        let view = repo.find_cart(cart.id).expect("find failed").expect("cart");
        assert_eq!(view.cart.total_products, 2);
        assert_eq!(view.cart.final_price, dec("1601.00"));

        line.qty = 2;
        let line = repo.save_line(line).expect("update failed");
        assert_eq!(line.final_price, dec("2000.00"));

        let mut line = line;
        line.product = phone.product_ref();
        let line = repo.save_line(line).expect("update failed");
        assert_eq!(line.final_price, dec("601.00"));

        let view = repo.find_cart(cart.id).expect("find failed").expect("cart");
        assert_eq!(view.lines.len(), 2);
        assert_eq!(view.cart.final_price, dec("1202.00"));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn dangling_reference_aborts_the_write() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCartRepository::new(pool.clone());
        let buyer = customer(&pool);
        let cart = repo.create_cart(Some(buyer.id), false).expect("create cart failed");
        let missing = ProductRef::new(ProductKind::Smartphone, 4242);

        let err = repo
            .save_line(CartLine::new(buyer.id, cart.id, missing, 1))
            .expect_err("dangling reference must fail");
        assert!(matches!(err, DomainError::ReferenceResolution(r) if r == missing));

        let view = repo.find_cart(cart.id).expect("find failed").expect("cart");
        assert!(view.lines.is_empty());
        assert_eq!(view.cart.total_products, 0);
        assert_eq!(view.cart.final_price, BigDecimal::from(0));
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn remove_line_only_within_its_cart() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCartRepository::new(pool.clone());
        let cat = category(&pool, "Notebooks", "notebooks");
        let product = notebook(&pool, cat.id, "laptop", "10.00");
        let buyer = customer(&pool);
        let cart = repo.create_cart(Some(buyer.id), false).expect("create cart failed");
        let other = repo.create_cart(None, true).expect("create cart failed");
        let line = repo
            .save_line(CartLine::new(buyer.id, cart.id, product.product_ref(), 1))
            .expect("save failed");
        let line_id = line.id.expect("id");

        assert!(!repo.remove_line(other.id, line_id).expect("remove failed"));
        assert!(repo.remove_line(cart.id, line_id).expect("remove failed"));

        let view = repo.find_cart(cart.id).expect("find failed").expect("cart");
        assert!(view.lines.is_empty());
        assert_eq!(view.cart.total_products, 0);
        assert_eq!(
            repo.find_line_for_product(cart.id, product.product_ref())
                .expect("find failed"),
            None
        );
    }
}
