pub mod configurations;
pub mod filter;
