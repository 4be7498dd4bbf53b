use std::collections::HashMap;

use crowdsale_common::{address::Address, amount::Amount};
use lazy_static::lazy_static;
use sha3::{Digest, Keccak256};
use strum::IntoEnumIterator;

use super::ContractCall;

const WORD: usize = 32;

lazy_static! {
    static ref SELECTORS: HashMap<ContractCall, [u8; 4]> = ContractCall::iter()
        .map(|call| (call, selector(call.signature())))
        .collect();
}

// First 4 bytes of the Keccak-256 hash of the function signature
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

impl ContractCall {
    /// Calldata of this getter, none of them take arguments.
    pub fn calldata(&self) -> [u8; 4] {
        SELECTORS
            .get(self)
            .copied()
            .unwrap_or_else(|| selector(self.signature()))
    }
}

fn word(bytes: &[u8], index: usize) -> Option<&[u8]> {
    let start = index.checked_mul(WORD)?;
    bytes.get(start..start.checked_add(WORD)?)
}

pub fn decode_uint(bytes: &[u8]) -> Option<Amount> {
    word(bytes, 0).map(Amount::from_be_bytes)
}

pub fn decode_u8(bytes: &[u8]) -> Option<u8> {
    let value = decode_uint(bytes)?.as_u64()?;
    u8::try_from(value).ok()
}

// Left padded with 12 zero bytes
pub fn decode_address(bytes: &[u8]) -> Option<Address> {
    let word = word(bytes, 0)?;
    if word[..WORD - 20].iter().any(|b| *b != 0) {
        return None;
    }
    Address::from_slice(&word[WORD - 20..]).ok()
}

/// Decode an ABI `string` return value.
///
/// Some old tokens return `bytes32` for `name()` and `symbol()`, a single
/// word answer is read as a zero padded string.
pub fn decode_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() == WORD {
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(WORD);
        return String::from_utf8(bytes[..end].to_vec()).ok();
    }

    let offset = usize::try_from(decode_uint(bytes)?.as_u64()?).ok()?;
    if offset % WORD != 0 {
        return None;
    }
    let length_word = word(bytes, offset / WORD)?;
    let length = usize::try_from(Amount::from_be_bytes(length_word).as_u64()?).ok()?;
    let start = offset.checked_add(WORD)?;
    let data = bytes.get(start..start.checked_add(length)?)?;
    String::from_utf8(data.to_vec()).ok()
}

pub fn encode_uint(value: Amount) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

pub fn encode_address(address: &Address) -> Vec<u8> {
    let mut out = vec![0u8; WORD];
    out[WORD - 20..].copy_from_slice(address.as_bytes());
    out
}

pub fn encode_string(value: &str) -> Vec<u8> {
    let data = value.as_bytes();
    let padded = data.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(2 * WORD + padded);
    out.extend(encode_uint(Amount::from(WORD as u64)));
    out.extend(encode_uint(Amount::from(data.len() as u64)));
    out.extend_from_slice(data);
    out.resize(2 * WORD + padded, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector("name()")), "06fdde03");
        assert_eq!(hex::encode(selector("symbol()")), "95d89b41");
        assert_eq!(hex::encode(selector("decimals()")), "313ce567");
        assert_eq!(hex::encode(selector("owner()")), "8da5cb5b");
        assert_eq!(ContractCall::Name.calldata(), selector("name()"));
    }

    #[test]
    fn test_decode_string() {
        let encoded = encode_string("Crowd Token");
        assert_eq!(encoded.len(), 3 * WORD);
        assert_eq!(decode_string(&encoded).as_deref(), Some("Crowd Token"));
        assert_eq!(decode_string(&encode_string("")).as_deref(), Some(""));

        let mut legacy = [0u8; WORD];
        legacy[..3].copy_from_slice(b"MKR");
        assert_eq!(decode_string(&legacy).as_deref(), Some("MKR"));

        // length past the end of the answer
        let mut truncated = encode_string("abc");
        truncated.truncate(2 * WORD + 1);
        assert_eq!(decode_string(&truncated), None);
    }

    #[test]
    fn test_decode_words() {
        let address = Address::new([0xab; 20]);
        assert_eq!(decode_address(&encode_address(&address)), Some(address));
        assert_eq!(decode_uint(&[0u8; 31]), None);
        assert_eq!(decode_u8(&encode_uint(Amount::from(18))), Some(18));
        assert_eq!(decode_u8(&encode_uint(Amount::from(256))), None);
    }
}
