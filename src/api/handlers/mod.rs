mod health;

pub use health::{health, not_found};
