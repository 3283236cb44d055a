pub mod product;
pub mod simulate;
