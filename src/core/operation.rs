// A single authorized value movement: who spends, who receives, what
// asset moves, and the sender's signature over that asset's canonical
// byte encoding.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::serialize;

/// Account identity: the SHA-256 digest of the account's newest public key.
pub type AccountId = Vec<u8>;

/// Identifier of a registered property (digital deed).
pub type PropertyId = Vec<u8>;

/// What an operation moves. A closed tagged union: there is no implicit
/// coercion between coin amounts and property identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asset {
    /// A coin transfer of the given amount
    Coin(u64),
    /// Ownership transfer of a registered property
    PropertyRef(PropertyId),
}

impl Asset {
    /// The canonical byte encoding the sender signs.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        serialize(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// `None` marks a faucet/genesis issuance with no spending party.
    sender: Option<AccountId>,
    receiver: AccountId,
    asset: Asset,
    signature: Vec<u8>,
}

impl Operation {
    pub fn new(
        sender: Option<AccountId>,
        receiver: AccountId,
        asset: Asset,
        signature: Vec<u8>,
    ) -> Operation {
        Operation {
            sender,
            receiver,
            asset,
            signature,
        }
    }

    pub fn sender(&self) -> Option<&AccountId> {
        self.sender.as_ref()
    }

    pub fn receiver(&self) -> &AccountId {
        &self.receiver
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn signature(&self) -> &[u8] {
        self.signature.as_slice()
    }

    /// Issuance operations create coins out of nothing; they have no
    /// sender to authorize.
    pub fn is_issuance(&self) -> bool {
        self.sender.is_none()
    }
}
