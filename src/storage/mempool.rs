use crate::core::transaction::Transaction;

/// Ordered staging area for transactions awaiting inclusion in a block.
///
/// Owned mutably by the ledger; entries leave the pool only when the
/// block consuming them commits.
#[derive(Debug, Clone, Default)]
pub struct Mempool {
    inner: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Mempool {
        Mempool { inner: Vec::new() }
    }

    pub fn add(&mut self, tx: Transaction) {
        self.inner.push(tx);
    }

    pub fn contains(&self, txid: &[u8]) -> bool {
        self.inner.iter().any(|tx| tx.id() == txid)
    }

    pub fn remove(&mut self, txid: &[u8]) {
        self.inner.retain(|tx| tx.id() != txid);
    }

    pub fn get_all(&self) -> Vec<Transaction> {
        self.inner.clone()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.inner.as_slice()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operation::{Asset, Operation};

    fn sample_tx(nonce: u32) -> Transaction {
        let op = Operation::new(None, vec![0x11; 32], Asset::Coin(10), vec![]);
        Transaction::new(vec![op], nonce).unwrap()
    }

    #[test]
    fn test_add_contains_remove() {
        let mut pool = Mempool::new();
        let tx = sample_tx(1);
        let id = tx.id().to_vec();

        pool.add(tx);
        assert!(pool.contains(&id));
        assert_eq!(pool.len(), 1);

        pool.remove(&id);
        assert!(!pool.contains(&id));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let mut pool = Mempool::new();
        let first = sample_tx(1);
        let second = sample_tx(2);
        pool.add(first.clone());
        pool.add(second.clone());

        let all = pool.get_all();
        assert_eq!(all[0].id(), first.id());
        assert_eq!(all[1].id(), second.id());
        assert_eq!(pool.transactions().len(), 2);
    }
}
