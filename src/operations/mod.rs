pub mod shadow;
pub mod union;
