use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

/// Coins minted into the first allocation when none is given explicitly.
const DEFAULT_FAUCET_AMOUNT: u64 = 50_000;
/// Prime width for generated keys; the modulus is roughly twice this.
const DEFAULT_KEY_BIT_WIDTH: u64 = 1024;

const FAUCET_AMOUNT_KEY: &str = "FAUCET_AMOUNT";
const KEY_BIT_WIDTH_KEY: &str = "KEY_BIT_WIDTH";

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        let mut map = HashMap::new();

        if let Ok(amount) = env::var(FAUCET_AMOUNT_KEY) {
            map.insert(String::from(FAUCET_AMOUNT_KEY), amount);
        }
        if let Ok(width) = env::var(KEY_BIT_WIDTH_KEY) {
            map.insert(String::from(KEY_BIT_WIDTH_KEY), width);
        }

        Config {
            inner: RwLock::new(map),
        }
    }

    pub fn get_faucet_amount(&self) -> u64 {
        self.get_parsed(FAUCET_AMOUNT_KEY)
            .unwrap_or(DEFAULT_FAUCET_AMOUNT)
    }

    pub fn set_faucet_amount(&self, amount: u64) {
        self.set(FAUCET_AMOUNT_KEY, amount.to_string());
    }

    pub fn get_key_bit_width(&self) -> u64 {
        self.get_parsed(KEY_BIT_WIDTH_KEY)
            .unwrap_or(DEFAULT_KEY_BIT_WIDTH)
    }

    pub fn set_key_bit_width(&self, bit_width: u64) {
        self.set(KEY_BIT_WIDTH_KEY, bit_width.to_string());
    }

    fn get_parsed(&self, key: &str) -> Option<u64> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner.get(key).and_then(|value| value.parse().ok())
    }

    fn set(&self, key: &str, value: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(key), value);
    }
}
