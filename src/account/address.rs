// Base58check rendering of account ids, for logs and display. The
// address is presentation only; consensus always works on the raw id.

use crate::utils::{base58_decode, base58_encode, sha256_digest};

const VERSION: u8 = 0x00;
const ADDRESS_CHECK_SUM_LEN: usize = 4;

/// Version byte, account id, and a 4-byte double-SHA-256 checksum,
/// base58 encoded.
pub fn account_address(account_id: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + account_id.len() + ADDRESS_CHECK_SUM_LEN);
    payload.push(VERSION);
    payload.extend_from_slice(account_id);
    let check_sum = checksum(&payload);
    payload.extend_from_slice(&check_sum);
    base58_encode(&payload)
}

/// Check the version byte and embedded checksum of an address string.
pub fn validate_address(address: &str) -> bool {
    let Ok(payload) = base58_decode(address) else {
        return false;
    };
    if payload.len() <= 1 + ADDRESS_CHECK_SUM_LEN || payload[0] != VERSION {
        return false;
    }
    let (body, embedded) = payload.split_at(payload.len() - ADDRESS_CHECK_SUM_LEN);
    checksum(body) == embedded
}

fn checksum(payload: &[u8]) -> Vec<u8> {
    let first_sha = sha256_digest(payload);
    let second_sha = sha256_digest(&first_sha);
    second_sha[0..ADDRESS_CHECK_SUM_LEN].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base58_decode;

    #[test]
    fn test_address_round_trips_through_base58() {
        let account_id = vec![0x42; 32];
        let address = account_address(&account_id);

        let decoded = base58_decode(&address).unwrap();
        assert_eq!(decoded[0], VERSION);
        assert_eq!(&decoded[1..33], account_id.as_slice());
        assert_eq!(decoded.len(), 1 + 32 + ADDRESS_CHECK_SUM_LEN);
    }

    #[test]
    fn test_checksum_detects_payload_change() {
        let a = account_address(&[0x01; 32]);
        let b = account_address(&[0x02; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_embedded_checksum_is_valid() {
        let account_id = vec![0x42; 32];
        let decoded = base58_decode(&account_address(&account_id)).unwrap();
        let (payload, embedded) = decoded.split_at(decoded.len() - ADDRESS_CHECK_SUM_LEN);
        assert_eq!(checksum(payload), embedded);
    }

    #[test]
    fn test_validate_address_accepts_own_output() {
        let address = account_address(&[0x42; 32]);
        assert!(validate_address(&address));
    }

    #[test]
    fn test_validate_address_rejects_corruption() {
        let address = account_address(&[0x42; 32]);
        let mut corrupted = address.into_bytes();
        let last = corrupted.len() - 1;
        corrupted[last] = if corrupted[last] == b'1' { b'2' } else { b'1' };
        assert!(!validate_address(&String::from_utf8(corrupted).unwrap()));

        assert!(!validate_address("not base58 ###"));
        assert!(!validate_address(""));
    }
}
