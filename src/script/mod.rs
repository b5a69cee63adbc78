//! Spend-authorization script machine
//!
//! A fixed-opcode stack interpreter equivalent to pay-to-public-key-hash:
//! a spend is authorized when the claimed public key hashes to the
//! spender's account id and carries a valid signature over the asset
//! payload being spent.

pub mod interpreter;

pub use interpreter::{Opcode, Script};
