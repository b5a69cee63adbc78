//! Accounts and their key wallets.
//!
//! An account's identity is the SHA-256 digest of its newest public
//! key. Adding a key pair therefore changes the account id; funds held
//! under an older id stay spendable because balances are looked up by
//! the id the coins were confirmed under, while new spend programs lock
//! to the current id.

use data_encoding::HEXLOWER;
use log::info;

use crate::account::address::account_address;
use crate::core::operation::AccountId;
use crate::crypto::{KeyGenerator, KeyPair, PublicKey, SignatureEngine};
use crate::error::{LedgerError, Result};
use crate::utils::{serialize, sha256_digest};

/// SHA-256 over the canonical encoding of a public key.
pub fn derive_account_id(public_key: &PublicKey) -> Result<AccountId> {
    let encoded = serialize(public_key)?;
    Ok(sha256_digest(&encoded))
}

pub struct Account {
    account_id: AccountId,
    wallet: Vec<KeyPair>,
}

impl Account {
    /// Create an account with a single freshly generated key pair.
    pub fn generate(generator: &KeyGenerator) -> Result<Account> {
        let pair = generator.generate()?;
        let account_id = derive_account_id(&pair.public_key())?;
        info!("created account {}", HEXLOWER.encode(&account_id));
        Ok(Account {
            account_id,
            wallet: vec![pair],
        })
    }

    /// Rotate in a new key pair: fresh primes, same public exponent as
    /// the newest key. The account id follows the new key.
    pub fn add_key_pair(&mut self, generator: &KeyGenerator) -> Result<()> {
        let exponent = self
            .newest_pair()
            .public_key()
            .exponent()
            .clone();
        let pair = generator.generate_with_exponent(&exponent)?;
        self.account_id = derive_account_id(&pair.public_key())?;
        self.wallet.push(pair);
        info!(
            "rotated account key, id is now {}",
            HEXLOWER.encode(&self.account_id)
        );
        Ok(())
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Human-readable base58check form of the account id.
    pub fn address(&self) -> String {
        account_address(&self.account_id)
    }

    pub fn key_count(&self) -> usize {
        self.wallet.len()
    }

    /// Public key at the given wallet index, oldest first.
    pub fn public_key(&self, index: usize) -> Option<PublicKey> {
        self.wallet.get(index).map(KeyPair::public_key)
    }

    /// Sign a message with the wallet key at `index`.
    pub fn sign(&self, engine: &SignatureEngine, message: &[u8], index: usize) -> Result<Vec<u8>> {
        let pair = self.wallet.get(index).ok_or_else(|| {
            LedgerError::Signature(format!(
                "wallet index {} out of range ({} keys)",
                index,
                self.wallet.len()
            ))
        })?;
        Ok(engine.sign(&pair.private_key(), message))
    }

    fn newest_pair(&self) -> &KeyPair {
        // generate() seeds one pair and keys are only ever appended
        self.wallet.last().expect("account wallet is never empty")
    }
}
