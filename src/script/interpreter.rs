use crate::crypto::{PublicKey, SignatureEngine};
use crate::error::{LedgerError, Result};
use crate::utils::{deserialize, serialize, sha256_digest};

/// The closed set of executable opcodes. Anything else in a program is
/// literal data, never code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Duplicate the top stack item
    Dup,
    /// Replace the top stack item with its SHA-256 digest
    Hash,
    /// Pop two items; unequal items terminate evaluation with `false`
    EqualVerify,
    /// Pop public key then signature and verify against the
    /// authorization message; terminal
    CheckSig,
}

impl Opcode {
    fn from_token(token: &str) -> Option<Opcode> {
        match token {
            "DUP" => Some(Opcode::Dup),
            "HASH" => Some(Opcode::Hash),
            "EQUALVERIFY" => Some(Opcode::EqualVerify),
            "CHECKSIG" => Some(Opcode::CheckSig),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Op(Opcode),
    Data(Vec<u8>),
}

/// A parsed opcode program.
///
/// Programs are whitespace-separated token sequences parsed once up
/// front. Bareword tokens that are not reserved opcodes are pushed as
/// literal byte data: valid hex decodes to its bytes, anything else is
/// taken as raw ASCII.
#[derive(Debug, Clone)]
pub struct Script {
    tokens: Vec<Token>,
}

impl Script {
    /// Parse a program from source text. An empty program is a format
    /// error; there is nothing to evaluate.
    pub fn parse(source: &str) -> Result<Script> {
        let tokens: Vec<Token> = source
            .split_whitespace()
            .map(|token| match Opcode::from_token(token) {
                Some(op) => Token::Op(op),
                None => Token::Data(decode_literal(token)),
            })
            .collect();

        if tokens.is_empty() {
            return Err(LedgerError::ScriptFormat(
                "empty script program".to_string(),
            ));
        }
        Ok(Script { tokens })
    }

    /// Build the canonical spend program for an account:
    /// `<sig> <pubkey> DUP HASH <account-id> EQUALVERIFY CHECKSIG`.
    ///
    /// The pushed account id is what `EQUALVERIFY` compares the hashed
    /// public key against, so the script only passes when the claimed
    /// key really is the identity the spend claims to come from.
    pub fn pay_to_account(
        signature: &[u8],
        public_key: &PublicKey,
        account_id: &[u8],
    ) -> Result<Script> {
        let source = format!(
            "{} {} DUP HASH {} EQUALVERIFY CHECKSIG",
            hex::encode(signature),
            hex::encode(serialize(public_key)?),
            hex::encode(account_id),
        );
        Script::parse(&source)
    }

    /// Evaluate left to right against the authorization message.
    ///
    /// Stack underflow and comparison mismatches fail the script with
    /// `Ok(false)`; they are spend rejections, not faults. The result of
    /// `CHECKSIG` is the final result; a program that ends without
    /// reaching it authorizes nothing.
    pub fn eval(&self, message: &[u8], engine: &SignatureEngine) -> Result<bool> {
        let mut stack: Vec<Vec<u8>> = Vec::new();

        for token in &self.tokens {
            match token {
                Token::Data(data) => stack.push(data.clone()),
                Token::Op(Opcode::Dup) => {
                    let Some(top) = stack.last() else {
                        return Ok(false);
                    };
                    stack.push(top.clone());
                }
                Token::Op(Opcode::Hash) => {
                    let Some(top) = stack.pop() else {
                        return Ok(false);
                    };
                    stack.push(sha256_digest(&top));
                }
                Token::Op(Opcode::EqualVerify) => {
                    let Some(a) = stack.pop() else {
                        return Ok(false);
                    };
                    let Some(b) = stack.pop() else {
                        return Ok(false);
                    };
                    if a != b {
                        return Ok(false);
                    }
                }
                Token::Op(Opcode::CheckSig) => {
                    let Some(key_bytes) = stack.pop() else {
                        return Ok(false);
                    };
                    let Some(signature) = stack.pop() else {
                        return Ok(false);
                    };
                    let Ok(public_key) = deserialize::<PublicKey>(&key_bytes) else {
                        // Data that does not parse as a key cannot
                        // authorize anything.
                        return Ok(false);
                    };
                    return engine.verify(&signature, &public_key, message);
                }
            }
        }
        Ok(false)
    }
}

fn decode_literal(token: &str) -> Vec<u8> {
    hex::decode(token).unwrap_or_else(|_| token.as_bytes().to_vec())
}
