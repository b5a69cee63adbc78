use ring::digest::{Context, SHA256, SHA512};

use crate::error::{LedgerError, Result};

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// Full-width 512-bit digest used as the signing message representative.
pub fn sha512_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA512);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

pub fn base58_decode(data: &str) -> Result<Vec<u8>> {
    bs58::decode(data)
        .into_vec()
        .map_err(|e| LedgerError::Crypto(format!("Invalid base58 encoding: {e}")))
}
