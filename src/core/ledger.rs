// This is the chain state machine - the heart of my ledger
// I keep everything in memory: the block history, the mempool, and the
// coin and property indexes all live inside one Ledger value
// Value only ever moves through validate_block, which checks the whole
// block first and commits it atomically - a block that fails any check
// leaves every index exactly as it was

use std::collections::{HashMap, HashSet};

use data_encoding::HEXLOWER;
use log::{debug, error, info};

use crate::account::Account;
use crate::config::GLOBAL_CONFIG;
use crate::core::block::{Block, GENESIS_PREV_HASH};
use crate::core::operation::{AccountId, Asset, Operation, PropertyId};
use crate::core::transaction::Transaction;
use crate::crypto::SignatureEngine;
use crate::error::{LedgerError, Result};
use crate::script::Script;
use crate::storage::{CoinIndex, Mempool};

// Lifecycle of my ledger: I only accept genesis allocations before the
// first block exists, and I only append blocks after it does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainState {
    Uninitialized,
    Active,
}

// This is my main ledger structure that holds the entire chain state
pub struct Ledger {
    state: ChainState,         // Where the chain is in its lifecycle
    block_history: Vec<Block>, // Every committed block, genesis first
    // I keep every confirmed transaction id here - my double-spend guard
    tx_index: HashSet<Vec<u8>>,
    mempool: Mempool,      // Transactions staged for the next block
    coin_index: CoinIndex, // Per-account spent/unspent journal
    // Cached balance view, rebuilt from the coin index on commit
    coin_database: HashMap<AccountId, u64>,
    // Who currently holds each registered deed
    property_owners: HashMap<PropertyId, AccountId>,
    engine: SignatureEngine, // The engine I verify every spend with
}

impl Ledger {
    pub fn new(engine: SignatureEngine) -> Ledger {
        Ledger {
            state: ChainState::Uninitialized,
            block_history: Vec::new(),
            tx_index: HashSet::new(),
            mempool: Mempool::new(),
            coin_index: CoinIndex::new(),
            coin_database: HashMap::new(),
            property_owners: HashMap::new(),
            engine,
        }
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    pub fn block_history(&self) -> &[Block] {
        self.block_history.as_slice()
    }

    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    // Confirmed balance of an account, zero for accounts I've never seen
    pub fn balance(&self, account: &AccountId) -> u64 {
        self.coin_database.get(account).copied().unwrap_or(0)
    }

    pub fn property_owner(&self, property: &PropertyId) -> Option<&AccountId> {
        self.property_owners.get(property)
    }

    // When an account wants to spend, I build the signed operation for it
    // The signature covers the asset's canonical bytes and is made with
    // the wallet key at `wallet_index`
    pub fn create_operation(
        &self,
        sender: &Account,
        receiver: &AccountId,
        asset: Asset,
        wallet_index: usize,
    ) -> Result<Operation> {
        let message = asset.canonical_bytes()?;
        let signature = sender.sign(&self.engine, &message, wallet_index)?;
        Ok(Operation::new(
            Some(sender.account_id().clone()),
            receiver.clone(),
            asset,
            signature,
        ))
    }

    // I check an operation against current state without mutating anything
    // Insufficient funds and foreign property spends are typed errors; a
    // script that fails to authorize is Ok(false). Issuance operations
    // have no authorizing party, so they never verify
    pub fn verify_operation(
        &self,
        operation: &Operation,
        sender: &Account,
        wallet_index: usize,
    ) -> Result<bool> {
        let Some(sender_id) = operation.sender() else {
            return Ok(false);
        };

        match operation.asset() {
            Asset::Coin(amount) => {
                let available = self.coin_index.balance(sender_id);
                if available < *amount {
                    return Err(LedgerError::InsufficientFunds {
                        required: *amount,
                        available,
                    });
                }
            }
            Asset::PropertyRef(property) => {
                match self.property_owners.get(property) {
                    Some(owner) if owner == sender_id => {}
                    Some(_) => {
                        return Err(LedgerError::InvalidOwnership(format!(
                            "property {} is not owned by the spending account",
                            HEXLOWER.encode(property)
                        )))
                    }
                    None => {
                        return Err(LedgerError::InvalidOwnership(format!(
                            "property {} is not registered",
                            HEXLOWER.encode(property)
                        )))
                    }
                }
            }
        }

        let Some(public_key) = sender.public_key(wallet_index) else {
            return Ok(false);
        };
        let message = operation.asset().canonical_bytes()?;
        let script = Script::pay_to_account(operation.signature(), &public_key, sender_id)?;
        script.eval(&message, &self.engine)
    }

    pub fn create_transaction(
        &self,
        operations: Vec<Operation>,
        nonce: u32,
    ) -> Result<Transaction> {
        Transaction::new(operations, nonce)
    }

    // I stage a transaction for the next block, rejecting anything
    // already confirmed or already sitting in the pool
    pub fn submit_transaction(&mut self, transaction: Transaction) -> Result<()> {
        if self.tx_index.contains(transaction.id()) || self.mempool.contains(transaction.id()) {
            return Err(LedgerError::DuplicateTransaction(
                HEXLOWER.encode(transaction.id()),
            ));
        }
        debug!("staged transaction {}", HEXLOWER.encode(transaction.id()));
        self.mempool.add(transaction);
        Ok(())
    }

    // When I bootstrap a chain, this stages an issuance of `amount`
    // coins to `receiver` - only allowed before the genesis block exists
    pub fn seed_genesis_allocation(&mut self, receiver: &AccountId, amount: u64) -> Result<()> {
        if self.state != ChainState::Uninitialized {
            return Err(LedgerError::Chain(
                "genesis allocations are only allowed before initialization".to_string(),
            ));
        }
        let operation = Operation::new(None, receiver.clone(), Asset::Coin(amount), Vec::new());
        let transaction = Transaction::new(vec![operation], rand::random())?;
        self.submit_transaction(transaction)
    }

    // Same as above but with the faucet amount from my global config
    pub fn seed_from_faucet(&mut self, receiver: &AccountId) -> Result<()> {
        self.seed_genesis_allocation(receiver, GLOBAL_CONFIG.get_faucet_amount())
    }

    // I register a new property deed under `owner`. Registration is an
    // act of the registrar, not an on-chain operation; every transfer
    // afterwards goes through the operation pipeline
    pub fn register_property(&mut self, owner: &AccountId, property: PropertyId) -> Result<()> {
        if self.property_owners.contains_key(&property) {
            return Err(LedgerError::InvalidOwnership(format!(
                "property {} is already registered",
                HEXLOWER.encode(&property)
            )));
        }
        self.property_owners.insert(property, owner.clone());
        Ok(())
    }

    // When I want to bring a chain to life: the staged allocations
    // become the genesis block and the state machine flips to Active
    pub fn init_blockchain(&mut self) -> Result<()> {
        if self.state != ChainState::Active {
            let transactions = self.mempool.get_all();
            let genesis = Block::new(GENESIS_PREV_HASH.to_vec(), transactions)?;
            self.validate_block(genesis)?;
            self.state = ChainState::Active;
            return Ok(());
        }
        Err(LedgerError::Chain(
            "blockchain is already initialized".to_string(),
        ))
    }

    // I assemble a block from the current mempool, chained to the tip
    pub fn create_block(&self) -> Result<Block> {
        Block::new(self.tip_hash(), self.mempool.get_all())
    }

    // The id the next block must reference: the tip's id, or the
    // all-zero sentinel when no block exists yet
    pub fn tip_hash(&self) -> Vec<u8> {
        self.block_history
            .last()
            .map(|block| block.id().to_vec())
            .unwrap_or_else(|| GENESIS_PREV_HASH.to_vec())
    }

    // This is where value actually moves - I validate a block against
    // current state and commit it
    // Checks run in order over the whole block before anything is
    // written: content addressing, chain linkage, transaction
    // duplicates, then fund and ownership feasibility including
    // intra-block spending order. Only a fully valid block touches
    // my indexes
    pub fn validate_block(&mut self, block: Block) -> Result<()> {
        let checks = self
            .check_structure(&block)
            .and_then(|_| self.check_duplicates(&block))
            .and_then(|_| self.check_feasibility(&block));
        if let Err(err) = checks {
            error!("rejected block {}: {}", HEXLOWER.encode(block.id()), err);
            return Err(err);
        }
        self.commit(block);
        Ok(())
    }

    fn check_structure(&self, block: &Block) -> Result<()> {
        if !block.verify_id()? {
            return Err(LedgerError::Chain(
                "block id does not match block contents".to_string(),
            ));
        }
        for transaction in block.transactions() {
            if !transaction.verify_id()? {
                return Err(LedgerError::Chain(format!(
                    "transaction {} does not match its contents",
                    HEXLOWER.encode(transaction.id())
                )));
            }
        }
        if block.prev_hash() != self.tip_hash() {
            return Err(LedgerError::Chain(
                "block does not chain to the current tip".to_string(),
            ));
        }
        Ok(())
    }

    fn check_duplicates(&self, block: &Block) -> Result<()> {
        let mut seen: HashSet<&[u8]> = HashSet::new();
        for transaction in block.transactions() {
            if self.tx_index.contains(transaction.id()) || !seen.insert(transaction.id()) {
                return Err(LedgerError::DuplicateTransaction(
                    HEXLOWER.encode(transaction.id()),
                ));
            }
        }
        Ok(())
    }

    // I replay the block's operations against working copies of the
    // balance and ownership views - nothing here touches real state
    fn check_feasibility(&self, block: &Block) -> Result<()> {
        fn balance_of(
            index: &CoinIndex,
            balances: &mut HashMap<AccountId, u64>,
            account: &AccountId,
        ) -> u64 {
            *balances
                .entry(account.clone())
                .or_insert_with(|| index.balance(account))
        }

        let mut balances: HashMap<AccountId, u64> = HashMap::new();
        let mut owners = self.property_owners.clone();

        for transaction in block.transactions() {
            for operation in transaction.operations() {
                match operation.asset() {
                    Asset::Coin(amount) => {
                        if let Some(sender) = operation.sender() {
                            let available =
                                balance_of(&self.coin_index, &mut balances, sender);
                            if available < *amount {
                                return Err(LedgerError::InsufficientFunds {
                                    required: *amount,
                                    available,
                                });
                            }
                            balances.insert(sender.clone(), available - amount);
                        }
                        let received =
                            balance_of(&self.coin_index, &mut balances, operation.receiver());
                        balances.insert(
                            operation.receiver().clone(),
                            received.saturating_add(*amount),
                        );
                    }
                    Asset::PropertyRef(property) => {
                        let Some(sender) = operation.sender() else {
                            return Err(LedgerError::InvalidOwnership(
                                "property transfers require a sender".to_string(),
                            ));
                        };
                        match owners.get(property) {
                            Some(owner) if owner == sender => {
                                owners.insert(property.clone(), operation.receiver().clone());
                            }
                            Some(_) => {
                                return Err(LedgerError::InvalidOwnership(format!(
                                    "property {} is not owned by the spending account",
                                    HEXLOWER.encode(property)
                                )))
                            }
                            None => {
                                return Err(LedgerError::InvalidOwnership(format!(
                                    "property {} is not registered",
                                    HEXLOWER.encode(property)
                                )))
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    // I write a fully checked block into the indexes; by the time I get
    // here every rejection path has already returned
    fn commit(&mut self, block: Block) {
        let mut touched: HashSet<AccountId> = HashSet::new();

        for transaction in block.transactions() {
            for operation in transaction.operations() {
                match operation.asset() {
                    Asset::Coin(amount) => {
                        if let Some(sender) = operation.sender() {
                            self.coin_index
                                .record_spent(sender, *amount, transaction.id());
                            touched.insert(sender.clone());
                        }
                        self.coin_index
                            .record_unspent(operation.receiver(), *amount, transaction.id());
                        touched.insert(operation.receiver().clone());
                    }
                    Asset::PropertyRef(property) => {
                        self.property_owners
                            .insert(property.clone(), operation.receiver().clone());
                    }
                }
            }
            self.tx_index.insert(transaction.id().to_vec());
            self.mempool.remove(transaction.id());
        }

        for account in touched {
            let balance = self.coin_index.balance(&account);
            self.coin_database.insert(account, balance);
        }

        info!(
            "committed block {} with {} transaction(s), height {}",
            HEXLOWER.encode(block.id()),
            block.transactions().len(),
            self.block_history.len()
        );
        self.block_history.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testnet::{create_seeded_ledger, create_test_account};

    fn seeded_ledger(amount: u64) -> (Ledger, Account) {
        create_seeded_ledger(amount).unwrap()
    }

    #[test]
    fn test_init_commits_genesis_allocation() {
        let (ledger, account) = seeded_ledger(1000);
        assert_eq!(ledger.state(), ChainState::Active);
        assert_eq!(ledger.block_history().len(), 1);
        assert!(ledger.block_history()[0].is_genesis());
        assert_eq!(ledger.balance(account.account_id()), 1000);
        assert!(ledger.mempool().is_empty());
    }

    #[test]
    fn test_init_twice_is_an_error() {
        let (mut ledger, _) = seeded_ledger(1000);
        assert!(matches!(
            ledger.init_blockchain(),
            Err(LedgerError::Chain(_))
        ));
    }

    #[test]
    fn test_seeding_after_init_is_rejected() {
        let (mut ledger, account) = seeded_ledger(1000);
        let result = ledger.seed_genesis_allocation(account.account_id(), 50);
        assert!(matches!(result, Err(LedgerError::Chain(_))));
    }

    #[test]
    fn test_spend_moves_balance() {
        let (mut ledger, alice) = seeded_ledger(1000);
        let bob = create_test_account().unwrap();

        let op = ledger
            .create_operation(&alice, bob.account_id(), Asset::Coin(200), 0)
            .unwrap();
        assert!(ledger.verify_operation(&op, &alice, 0).unwrap());

        let tx = ledger.create_transaction(vec![op], 7).unwrap();
        ledger.submit_transaction(tx).unwrap();
        let block = ledger.create_block().unwrap();
        ledger.validate_block(block).unwrap();

        assert_eq!(ledger.balance(alice.account_id()), 800);
        assert_eq!(ledger.balance(bob.account_id()), 200);
        assert_eq!(ledger.block_history().len(), 2);
    }

    #[test]
    fn test_overdraft_rejects_block_atomically() {
        let (mut ledger, alice) = seeded_ledger(1000);
        let bob = create_test_account().unwrap();

        let op = Operation::new(
            Some(alice.account_id().clone()),
            bob.account_id().clone(),
            Asset::Coin(2000),
            vec![0x01],
        );
        let tx = ledger.create_transaction(vec![op], 7).unwrap();
        ledger.submit_transaction(tx).unwrap();
        let block = ledger.create_block().unwrap();

        let result = ledger.validate_block(block);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds {
                required: 2000,
                available: 1000
            })
        ));
        assert_eq!(ledger.balance(alice.account_id()), 1000);
        assert_eq!(ledger.balance(bob.account_id()), 0);
        assert_eq!(ledger.block_history().len(), 1);
        // The rejected block must not drain the staged transaction
        assert_eq!(ledger.mempool().len(), 1);
    }

    #[test]
    fn test_confirmed_transaction_cannot_reenter() {
        let (mut ledger, alice) = seeded_ledger(1000);
        let bob = create_test_account().unwrap();

        let op = ledger
            .create_operation(&alice, bob.account_id(), Asset::Coin(200), 0)
            .unwrap();
        let tx = ledger.create_transaction(vec![op], 7).unwrap();
        ledger.submit_transaction(tx.clone()).unwrap();
        let block = ledger.create_block().unwrap();
        ledger.validate_block(block).unwrap();

        // Same confirmed transaction in a new block
        let replay = Block::new(ledger.tip_hash(), vec![tx.clone()]).unwrap();
        assert!(matches!(
            ledger.validate_block(replay),
            Err(LedgerError::DuplicateTransaction(_))
        ));

        // And it cannot be staged again either
        assert!(matches!(
            ledger.submit_transaction(tx),
            Err(LedgerError::DuplicateTransaction(_))
        ));
        assert_eq!(ledger.block_history().len(), 2);
        assert_eq!(ledger.balance(alice.account_id()), 800);
    }

    #[test]
    fn test_intra_block_duplicate_rejected() {
        let (mut ledger, alice) = seeded_ledger(1000);
        let bob = create_test_account().unwrap();

        let op = ledger
            .create_operation(&alice, bob.account_id(), Asset::Coin(100), 0)
            .unwrap();
        let tx = ledger.create_transaction(vec![op], 3).unwrap();
        let block = Block::new(ledger.tip_hash(), vec![tx.clone(), tx]).unwrap();

        assert!(matches!(
            ledger.validate_block(block),
            Err(LedgerError::DuplicateTransaction(_))
        ));
        assert_eq!(ledger.balance(alice.account_id()), 1000);
    }

    #[test]
    fn test_block_must_chain_to_tip() {
        let (mut ledger, alice) = seeded_ledger(1000);
        let op = Operation::new(None, alice.account_id().clone(), Asset::Coin(1), vec![]);
        let tx = Transaction::new(vec![op], 1).unwrap();
        let orphan = Block::new(vec![0xFF; 32], vec![tx]).unwrap();

        assert!(matches!(
            ledger.validate_block(orphan),
            Err(LedgerError::Chain(_))
        ));
    }

    #[test]
    fn test_verify_operation_flags_overdraft() {
        let (ledger, alice) = seeded_ledger(1000);
        let op = ledger
            .create_operation(&alice, alice.account_id(), Asset::Coin(2000), 0)
            .unwrap();
        assert!(matches!(
            ledger.verify_operation(&op, &alice, 0),
            Err(LedgerError::InsufficientFunds {
                required: 2000,
                available: 1000
            })
        ));
    }

    #[test]
    fn test_verify_operation_rejects_issuance() {
        let (ledger, alice) = seeded_ledger(1000);
        let op = Operation::new(None, alice.account_id().clone(), Asset::Coin(5), vec![]);
        assert!(!ledger.verify_operation(&op, &alice, 0).unwrap());
    }

    #[test]
    fn test_property_transfer_follows_ownership() {
        let (mut ledger, alice) = seeded_ledger(1000);
        let bob = create_test_account().unwrap();
        let deed: PropertyId = b"plot-7".to_vec();

        ledger
            .register_property(alice.account_id(), deed.clone())
            .unwrap();
        assert_eq!(ledger.property_owner(&deed), Some(alice.account_id()));

        let op = ledger
            .create_operation(&alice, bob.account_id(), Asset::PropertyRef(deed.clone()), 0)
            .unwrap();
        assert!(ledger.verify_operation(&op, &alice, 0).unwrap());

        let tx = ledger.create_transaction(vec![op], 11).unwrap();
        ledger.submit_transaction(tx).unwrap();
        let block = ledger.create_block().unwrap();
        ledger.validate_block(block).unwrap();

        assert_eq!(ledger.property_owner(&deed), Some(bob.account_id()));
    }

    #[test]
    fn test_foreign_property_spend_is_rejected() {
        let (mut ledger, alice) = seeded_ledger(1000);
        let bob = create_test_account().unwrap();
        let deed: PropertyId = b"plot-9".to_vec();

        ledger
            .register_property(bob.account_id(), deed.clone())
            .unwrap();

        let op = ledger
            .create_operation(&alice, alice.account_id(), Asset::PropertyRef(deed), 0)
            .unwrap();
        assert!(matches!(
            ledger.verify_operation(&op, &alice, 0),
            Err(LedgerError::InvalidOwnership(_))
        ));
    }
}
