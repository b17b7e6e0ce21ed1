pub mod auth;
pub mod inventory;

pub use auth::*;
pub use inventory::*;
