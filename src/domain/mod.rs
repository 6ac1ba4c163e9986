pub mod cart;
pub mod catalog;
pub mod errors;
pub mod image;
pub mod latest;
pub mod order;
pub mod ports;
pub mod sidebar;
pub mod spec_table;

#[cfg(test)]
pub(crate) mod test_fixtures;
