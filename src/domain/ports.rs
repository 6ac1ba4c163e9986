use super::cart::{Cart, CartLine, CartView};
use super::catalog::{
    Category, NewCategory, NewNotebook, NewSmartphone, Product, ProductKind, ProductRef,
};
use super::errors::DomainError;
use super::order::{
    Customer, ListResult, NewCustomer, NewOrder, OrderStatus, OrderView,
};

pub trait CatalogRepository: Send + Sync + 'static {
    fn create_category(&self, category: NewCategory) -> Result<Category, DomainError>;
    /// All categories by ascending id.
    fn categories(&self) -> Result<Vec<Category>, DomainError>;
    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;
    /// `(category_id, product count)` for every category holding products of `kind`.
    fn count_by_category(&self, kind: ProductKind) -> Result<Vec<(i32, i64)>, DomainError>;

    fn create_notebook(&self, notebook: NewNotebook) -> Result<Product, DomainError>;
    fn create_smartphone(&self, smartphone: NewSmartphone) -> Result<Product, DomainError>;
    /// The `limit` most recent products of `kind`, by descending id.
    fn latest_of_kind(&self, kind: ProductKind, limit: i64) -> Result<Vec<Product>, DomainError>;
    fn find_by_slug(&self, kind: ProductKind, slug: &str) -> Result<Option<Product>, DomainError>;
    /// Products of `kind` in a category, by descending id.
    fn in_category(&self, kind: ProductKind, category_id: i32)
        -> Result<Vec<Product>, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn create_cart(&self, owner_id: Option<i32>, for_anonymous_user: bool)
        -> Result<Cart, DomainError>;
    fn find_cart(&self, id: i32) -> Result<Option<CartView>, DomainError>;
    fn find_line(&self, id: i32) -> Result<Option<CartLine>, DomainError>;
    fn find_line_for_product(
        &self,
        cart_id: i32,
        product: ProductRef,
    ) -> Result<Option<CartLine>, DomainError>;
    /// Inserts or updates the line, repricing it from the referenced product
    /// and refreshing the cart totals in the same transaction.
    fn save_line(&self, line: CartLine) -> Result<CartLine, DomainError>;
    /// Returns false when no such line exists in the cart.
    fn remove_line(&self, cart_id: i32, line_id: i32) -> Result<bool, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn create(&self, customer: NewCustomer) -> Result<Customer, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Stores the order and flags its cart as ordered, atomically.
    fn create(&self, order: NewOrder) -> Result<i32, DomainError>;
    fn find_by_id(&self, id: i32) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, page: i64, limit: i64) -> Result<ListResult, DomainError>;
    fn list_for_customer(&self, customer_id: i32) -> Result<Vec<OrderView>, DomainError>;
    /// Returns false when the order does not exist.
    fn update_status(&self, id: i32, status: OrderStatus) -> Result<bool, DomainError>;
}
