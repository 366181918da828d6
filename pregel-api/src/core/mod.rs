pub mod entities;
pub mod utils;
