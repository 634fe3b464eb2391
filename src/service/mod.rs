//! Business layer: user persistence behind a trait the handlers depend on.

pub mod crud;
#[cfg(test)]
pub mod memory;

pub use crud::{PgUserStore, UserStore};
