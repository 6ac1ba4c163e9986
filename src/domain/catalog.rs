use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Signed, Zero};

use super::errors::DomainError;
use super::image::{self, ImageUpload};

/// Registered product types. A type name is registered iff it parses into
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductKind {
    Notebook,
    Smartphone,
}

impl ProductKind {
    pub const ALL: [ProductKind; 2] = [ProductKind::Notebook, ProductKind::Smartphone];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductKind::Notebook => "notebook",
            ProductKind::Smartphone => "smartphone",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notebook" => Ok(ProductKind::Notebook),
            "smartphone" => Ok(ProductKind::Smartphone),
            other => Err(DomainError::InvalidInput(format!(
                "unknown product type '{other}'"
            ))),
        }
    }
}

/// Polymorphic pointer at exactly one product row: the type tag picks the
/// table, the id picks the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductRef {
    pub kind: ProductKind,
    pub id: i32,
}

impl ProductRef {
    pub fn new(kind: ProductKind, id: i32) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn url(&self) -> String {
        format!("/categories/{}", self.slug)
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("name is required".to_string()));
        }
        check_length("name", &self.name, TEXT_COLUMN_LEN)?;
        validate_slug(&self.slug)
    }
}

/// Columns shared by every product variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductBase {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: String,
    pub image_width: i32,
    pub image_height: i32,
    pub description: Option<String>,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub base: ProductBase,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Smartphone {
    pub base: ProductBase,
    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub battery_cap: String,
    pub ram: String,
    pub sd: bool,
    pub sd_volume_max: Option<String>,
    pub main_cam_mp: String,
    pub front_cam_mp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Notebook(Notebook),
    Smartphone(Smartphone),
}

impl Product {
    pub fn kind(&self) -> ProductKind {
        match self {
            Product::Notebook(_) => ProductKind::Notebook,
            Product::Smartphone(_) => ProductKind::Smartphone,
        }
    }

    pub fn base(&self) -> &ProductBase {
        match self {
            Product::Notebook(n) => &n.base,
            Product::Smartphone(s) => &s.base,
        }
    }

    pub fn product_ref(&self) -> ProductRef {
        ProductRef::new(self.kind(), self.base().id)
    }

    pub fn url(&self) -> String {
        format!("/products/{}/{}", self.kind(), self.base().slug)
    }
}

/// Input shared by every product variant on creation.
#[derive(Debug, Clone)]
pub struct NewProductBase {
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub image: ImageUpload,
    pub description: Option<String>,
    pub price: BigDecimal,
}

impl NewProductBase {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvalidInput("title is required".to_string()));
        }
        check_length("title", &self.title, TEXT_COLUMN_LEN)?;
        validate_slug(&self.slug)?;
        validate_price(&self.price)?;
        check_length("image path", &self.image.path, TEXT_COLUMN_LEN)?;
        image::check(&self.image)
    }

    /// Width and height the image is stored for display at.
    pub fn display_size(&self) -> (u32, u32) {
        image::fit_to_max_width(self.image.width, self.image.height)
    }
}

#[derive(Debug, Clone)]
pub struct NewNotebook {
    pub base: NewProductBase,
    pub diagonal: String,
    pub display_type: String,
    pub processor_freq: String,
    pub ram: String,
    pub video: String,
    pub time_without_charge: String,
}

impl NewNotebook {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.base.validate()?;
        for (field, value) in [
            ("diagonal", &self.diagonal),
            ("display_type", &self.display_type),
            ("processor_freq", &self.processor_freq),
            ("ram", &self.ram),
            ("video", &self.video),
            ("time_without_charge", &self.time_without_charge),
        ] {
            check_length(field, value, TEXT_COLUMN_LEN)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewSmartphone {
    pub base: NewProductBase,
    pub diagonal: String,
    pub display_type: String,
    pub resolution: String,
    pub battery_cap: String,
    pub ram: String,
    pub sd: bool,
    pub sd_volume_max: Option<String>,
    pub main_cam_mp: String,
    pub front_cam_mp: String,
}

impl NewSmartphone {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.base.validate()?;
        for (field, value) in [
            ("diagonal", &self.diagonal),
            ("display_type", &self.display_type),
            ("resolution", &self.resolution),
            ("battery_cap", &self.battery_cap),
            ("ram", &self.ram),
            ("main_cam_mp", &self.main_cam_mp),
            ("front_cam_mp", &self.front_cam_mp),
        ] {
            check_length(field, value, TEXT_COLUMN_LEN)?;
        }
        if let Some(volume) = &self.sd_volume_max {
            check_length("sd_volume_max", volume, TEXT_COLUMN_LEN)?;
        }
        Ok(())
    }
}

/// Width of the `VARCHAR(255)` columns.
pub const TEXT_COLUMN_LEN: usize = 255;

/// Largest amount storable in a `NUMERIC(9, 2)` column, exclusive.
pub const PRICE_LIMIT: i64 = 10_000_000;
const PRICE_INTEGER_DIGITS: i64 = 7;

/// Checks that a price is non-negative, has at most two fractional digits
/// and fits the price column.
pub fn validate_price(price: &BigDecimal) -> Result<(), DomainError> {
    if price.is_zero() {
        return Ok(());
    }
    if price.is_negative() {
        return Err(DomainError::InvalidInput(
            "price must not be negative".to_string(),
        ));
    }
    // Digit counts bound the magnitude before anything rescales the value.
    let digits = i64::try_from(price.digits()).unwrap_or(i64::MAX);
    let scale = price.fractional_digit_count();
    if digits.saturating_sub(scale) > PRICE_INTEGER_DIGITS {
        return Err(DomainError::InvalidInput(format!(
            "price must be below {PRICE_LIMIT}"
        )));
    }
    if scale > 2 && (scale - 2 > digits || price.with_scale(2) != *price) {
        return Err(DomainError::InvalidInput(
            "price must have at most 2 fractional digits".to_string(),
        ));
    }
    Ok(())
}

/// Amounts derived from prices (line and cart totals) share the price column.
pub fn check_amount(field: &str, amount: &BigDecimal) -> Result<(), DomainError> {
    if amount.abs() >= BigDecimal::from(PRICE_LIMIT) {
        return Err(DomainError::InvalidInput(format!(
            "{field} {amount} exceeds the storable limit of {PRICE_LIMIT}"
        )));
    }
    Ok(())
}

/// Rejects values longer than the `VARCHAR(max)` column they go into.
pub fn check_length(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::InvalidInput(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    let valid = !slug.is_empty()
        && slug.len() <= 50
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!("invalid slug '{slug}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn kind_parses_registered_names_only() {
        assert_eq!(
            ProductKind::from_str("notebook").unwrap(),
            ProductKind::Notebook
        );
        assert_eq!(
            ProductKind::from_str("smartphone").unwrap(),
            ProductKind::Smartphone
        );
        assert!(ProductKind::from_str("tablet").is_err());
        assert!(ProductKind::from_str("Notebook").is_err());
    }

    #[test]
    fn kind_round_trips_through_as_str() {
        for kind in ProductKind::ALL {
            assert_eq!(ProductKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn product_ref_display() {
        let r = ProductRef::new(ProductKind::Smartphone, 12);
        assert_eq!(r.to_string(), "smartphone#12");
    }

    #[test]
    fn category_url_uses_slug() {
        let c = Category {
            id: 1,
            name: "Notebooks".to_string(),
            slug: "notebooks".to_string(),
        };
        assert_eq!(c.url(), "/categories/notebooks");
    }

    #[test]
    fn price_validation() {
        let ok = |s: &str| validate_price(&BigDecimal::from_str(s).unwrap()).is_ok();
        assert!(ok("0"));
        assert!(ok("9.99"));
        assert!(ok("1299.5"));
        assert!(ok("9999999.99"));
        assert!(!ok("-1.00"));
        assert!(!ok("9.999"));
        assert!(!ok("10000000"));
        assert!(ok("1.500"));
        assert!(ok("5e2"));
    }

    #[test]
    fn extreme_exponents_are_rejected_without_expanding_them() {
        for s in ["1e2000000", "1e-2000000", "-1e2000000"] {
            let price = BigDecimal::from_str(s).unwrap();
            let started = std::time::Instant::now();
            assert!(matches!(
                validate_price(&price),
                Err(DomainError::InvalidInput(_))
            ));
            assert!(
                started.elapsed() < std::time::Duration::from_millis(50),
                "{s} took {:?}",
                started.elapsed()
            );
        }
    }

    #[test]
    fn amounts_must_fit_the_price_column() {
        assert!(check_amount("total", &BigDecimal::from_str("9999999.99").unwrap()).is_ok());
        assert!(matches!(
            check_amount("total", &BigDecimal::from_str("10000000.00").unwrap()),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn lengths_are_counted_in_characters() {
        assert!(check_length("name", &"é".repeat(255), TEXT_COLUMN_LEN).is_ok());
        assert!(check_length("name", &"é".repeat(256), TEXT_COLUMN_LEN).is_err());
    }

    #[test]
    fn category_validation() {
        let category = |name: &str, slug: &str| NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
        };
        assert!(category("Notebooks", "notebooks").validate().is_ok());
        assert!(category(" ", "notebooks").validate().is_err());
        assert!(category(&"N".repeat(256), "notebooks").validate().is_err());
        assert!(category("Notebooks", "bad slug").validate().is_err());
    }

    fn new_base() -> NewProductBase {
        NewProductBase {
            category_id: 1,
            title: "ThinkPad X1".to_string(),
            slug: "thinkpad-x1".to_string(),
            image: ImageUpload {
                path: "products/x1.jpg".to_string(),
                width: 1600,
                height: 900,
                size_bytes: 200_000,
            },
            description: None,
            price: BigDecimal::from_str("1499.00").unwrap(),
        }
    }

    #[test]
    fn new_product_validation_covers_title_slug_price_and_image() {
        assert!(new_base().validate().is_ok());

        let mut b = new_base();
        b.title = String::new();
        assert!(b.validate().is_err());

        let mut b = new_base();
        b.slug = "Think Pad".to_string();
        assert!(b.validate().is_err());

        let mut b = new_base();
        b.price = BigDecimal::from_str("-5").unwrap();
        assert!(b.validate().is_err());

        let mut b = new_base();
        b.image.width = 200;
        assert!(b.validate().is_err());

        let mut b = new_base();
        b.title = "T".repeat(256);
        assert!(b.validate().is_err());

        let mut b = new_base();
        b.image.path = format!("{}.jpg", "p".repeat(252));
        assert!(b.validate().is_err());
    }

    #[test]
    fn variant_validation_checks_characteristic_lengths() {
        let notebook = NewNotebook {
            base: new_base(),
            diagonal: "14\"".to_string(),
            display_type: "IPS".to_string(),
            processor_freq: "3.2 GHz".to_string(),
            ram: "16 GB".to_string(),
            video: "Iris Xe".to_string(),
            time_without_charge: "10 h".to_string(),
        };
        assert!(notebook.validate().is_ok());
        let mut long = notebook.clone();
        long.video = "v".repeat(256);
        assert!(long.validate().is_err());

        let smartphone = NewSmartphone {
            base: new_base(),
            diagonal: "6.1\"".to_string(),
            display_type: "OLED".to_string(),
            resolution: "2532x1170".to_string(),
            battery_cap: "3200 mAh".to_string(),
            ram: "6 GB".to_string(),
            sd: true,
            sd_volume_max: Some("s".repeat(256)),
            main_cam_mp: "12 MP".to_string(),
            front_cam_mp: "12 MP".to_string(),
        };
        assert!(smartphone.validate().is_err());
    }

    #[test]
    fn display_size_applies_max_width() {
        assert_eq!(new_base().display_size(), (800, 450));
    }

    #[test]
    fn slug_validation() {
        assert!(validate_slug("macbook-pro_14").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug(&"a".repeat(51)).is_err());
    }
}
