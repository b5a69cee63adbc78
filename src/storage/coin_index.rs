// Per-account UTXO/STXO journal. Balances are not a running total
// field; they are derived on demand from an account's recorded entries,
// which keeps the balance equal to confirmed history by construction.

use std::collections::HashMap;

use crate::core::operation::AccountId;

/// Whether an entry credits or debits the account it is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Received value, not yet spent (UTXO)
    Unspent,
    /// Value spent away from this account (STXO)
    Spent,
}

/// One confirmed coin movement touching an account.
#[derive(Debug, Clone)]
pub struct CoinEntry {
    kind: EntryKind,
    amount: u64,
    /// Transaction that confirmed this entry
    txid: Vec<u8>,
}

impl CoinEntry {
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn txid(&self) -> &[u8] {
        self.txid.as_slice()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoinIndex {
    entries: HashMap<AccountId, Vec<CoinEntry>>,
}

impl CoinIndex {
    pub fn new() -> CoinIndex {
        CoinIndex {
            entries: HashMap::new(),
        }
    }

    pub fn record_unspent(&mut self, account: &AccountId, amount: u64, txid: &[u8]) {
        self.record(account, EntryKind::Unspent, amount, txid);
    }

    pub fn record_spent(&mut self, account: &AccountId, amount: u64, txid: &[u8]) {
        self.record(account, EntryKind::Spent, amount, txid);
    }

    fn record(&mut self, account: &AccountId, kind: EntryKind, amount: u64, txid: &[u8]) {
        self.entries
            .entry(account.clone())
            .or_default()
            .push(CoinEntry {
                kind,
                amount,
                txid: txid.to_vec(),
            });
    }

    /// Sum of unspent entries minus sum of spent entries, scanned from
    /// this account's journal only. Clamped at zero; overspending is
    /// rejected before commit, so the clamp is never load-bearing.
    pub fn balance(&self, account: &AccountId) -> u64 {
        let Some(entries) = self.entries.get(account) else {
            return 0;
        };
        let mut unspent: u64 = 0;
        let mut spent: u64 = 0;
        for entry in entries {
            match entry.kind {
                EntryKind::Unspent => unspent = unspent.saturating_add(entry.amount),
                EntryKind::Spent => spent = spent.saturating_add(entry.amount),
            }
        }
        unspent.saturating_sub(spent)
    }

    pub fn entries(&self, account: &AccountId) -> &[CoinEntry] {
        self.entries
            .get(account)
            .map(|e| e.as_slice())
            .unwrap_or(&[])
    }
}
