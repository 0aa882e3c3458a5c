pub mod explorer;
pub mod pivot;
