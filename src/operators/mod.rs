pub mod behead;
pub mod nulls;
pub mod visibility;
