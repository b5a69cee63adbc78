pub mod account;
pub mod address;

pub use account::{derive_account_id, Account};
pub use address::{account_address, validate_address};
