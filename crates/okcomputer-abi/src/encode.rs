use bytes::{BufMut, Bytes, BytesMut};

use crate::primitives::{Selector, U256};
use crate::token::Token;

/// Every head slot and length prefix is one 32-byte word.
pub const WORD_SIZE: usize = 32;

/// Encode call data: selector followed by the argument tuple.
///
/// Layout of the argument tuple:
/// ```text
/// ┌────────────────────────────────┬──────────────────────────────────┐
/// │ Head: one 32-byte slot per arg │ Tail: dynamic values, in order   │
/// │ static value, or offset of the │ ┌────────────┬─────────────────┐ │
/// │ dynamic value measured from    │ │ len (32B)  │ data, 0-padded  │ │
/// │ the start of the head          │ └────────────┴─────────────────┘ │
/// └────────────────────────────────┴──────────────────────────────────┘
/// ```
///
/// Argument order and types are not checked against any signature here.
pub fn encode_call(selector: Selector, args: &[Token]) -> Bytes {
    let mut out = BytesMut::with_capacity(4 + encoded_len(args));
    out.put_slice(selector.as_bytes());
    encode_tuple(args, &mut out);
    out.freeze()
}

/// Encode a tuple without a selector, in the layout the contract returns.
pub fn encode(tokens: &[Token]) -> Bytes {
    let mut out = BytesMut::with_capacity(encoded_len(tokens));
    encode_tuple(tokens, &mut out);
    out.freeze()
}

fn encode_tuple(tokens: &[Token], out: &mut BytesMut) {
    let head_len: usize = tokens.iter().map(Token::head_size).sum();
    let mut head = BytesMut::with_capacity(head_len);
    let mut tail = BytesMut::new();

    for token in tokens {
        if token.is_dynamic() {
            put_word(&mut head, &U256::from(head_len + tail.len()).to_be_bytes());
            encode_token(token, &mut tail);
        } else {
            encode_token(token, &mut head);
        }
    }

    out.put_slice(&head);
    out.put_slice(&tail);
}

fn encode_token(token: &Token, out: &mut BytesMut) {
    match token {
        Token::Uint(value) => put_word(out, &value.to_be_bytes()),
        Token::Address(addr) => {
            out.put_bytes(0, WORD_SIZE - 20);
            out.put_slice(addr.as_bytes());
        }
        Token::Bool(value) => {
            out.put_bytes(0, WORD_SIZE - 1);
            out.put_u8(u8::from(*value));
        }
        Token::FixedBytes(bytes) => {
            debug_assert!(bytes.len() <= WORD_SIZE, "bytesN is at most 32 bytes");
            let len = bytes.len().min(WORD_SIZE);
            out.put_slice(&bytes[..len]);
            out.put_bytes(0, WORD_SIZE - len);
        }
        Token::String(text) => put_dynamic(out, text.as_bytes()),
        Token::Bytes(bytes) => put_dynamic(out, bytes),
        Token::Tuple(items) => encode_tuple(items, out),
    }
}

fn put_word(out: &mut BytesMut, word: &[u8; WORD_SIZE]) {
    out.put_slice(word);
}

fn put_dynamic(out: &mut BytesMut, data: &[u8]) {
    put_word(out, &U256::from(data.len()).to_be_bytes());
    out.put_slice(data);
    out.put_bytes(0, padding(data.len()));
}

fn padding(len: usize) -> usize {
    (WORD_SIZE - len % WORD_SIZE) % WORD_SIZE
}

fn encoded_len(tokens: &[Token]) -> usize {
    tokens.iter().map(token_len).sum()
}

fn token_len(token: &Token) -> usize {
    match token {
        Token::String(text) => WORD_SIZE + dynamic_len(text.len()),
        Token::Bytes(bytes) => WORD_SIZE + dynamic_len(bytes.len()),
        Token::Tuple(items) if token.is_dynamic() => WORD_SIZE + encoded_len(items),
        Token::Tuple(items) => encoded_len(items),
        _ => WORD_SIZE,
    }
}

fn dynamic_len(len: usize) -> usize {
    WORD_SIZE + len + padding(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::derive_key;
    use crate::primitives::Address;

    fn word(hex_str: &str) -> String {
        format!("{hex_str:0>64}")
    }

    #[test]
    fn static_arguments_fill_head_slots() {
        let owner_of = Selector::new([0x63, 0x52, 0x21, 0x1e]);
        let data = encode_call(owner_of, &[Token::from(1399u64)]);

        assert_eq!(data.len(), 4 + WORD_SIZE);
        assert_eq!(&data[..4], &[0x63, 0x52, 0x21, 0x1e]);
        assert_eq!(hex::encode(&data[4..]), word("577"));
    }

    #[test]
    fn string_goes_to_tail_with_offset() {
        let key = derive_key("board");
        let body = encode(&[
            Token::from(1u64),
            Token::from(key),
            Token::from("hello"),
            Token::from(0u64),
        ]);

        // 4 head slots, then length word, then one padded data word.
        assert_eq!(body.len(), 6 * WORD_SIZE);
        assert_eq!(hex::encode(&body[..32]), word("1"));
        assert_eq!(&body[32..64], key.as_bytes());
        assert_eq!(hex::encode(&body[64..96]), word("80"));
        assert_eq!(hex::encode(&body[96..128]), word("0"));
        assert_eq!(hex::encode(&body[128..160]), word("5"));
        assert_eq!(&body[160..165], b"hello");
        assert!(body[165..].iter().all(|b| *b == 0));
    }

    #[test]
    fn empty_string_has_length_word_only() {
        let body = encode(&[Token::from("")]);
        assert_eq!(body.len(), 2 * WORD_SIZE);
        assert_eq!(hex::encode(&body[..32]), word("20"));
        assert_eq!(hex::encode(&body[32..]), word("0"));
    }

    #[test]
    fn exact_word_string_needs_no_padding() {
        let text = "a".repeat(32);
        let body = encode(&[Token::from(text.as_str())]);
        assert_eq!(body.len(), 3 * WORD_SIZE);
    }

    #[test]
    fn address_and_bool_are_left_padded() {
        let addr: Address = "0xce2830932889c7fb5e5206287c43554e673dcc88".parse().unwrap();
        let body = encode(&[Token::from(addr), Token::from(true)]);
        assert_eq!(
            hex::encode(&body[..32]),
            word("ce2830932889c7fb5e5206287c43554e673dcc88")
        );
        assert_eq!(hex::encode(&body[32..]), word("1"));
    }

    #[test]
    fn dynamic_tuple_is_referenced_by_offset() {
        let body = encode(&[Token::Tuple(vec![Token::from(7u64), Token::from("x")])]);
        // outer offset, inner head (uint, offset), inner tail (len, data)
        assert_eq!(body.len(), 5 * WORD_SIZE);
        assert_eq!(hex::encode(&body[..32]), word("20"));
        assert_eq!(hex::encode(&body[32..64]), word("7"));
        assert_eq!(hex::encode(&body[64..96]), word("40"));
        assert_eq!(hex::encode(&body[96..128]), word("1"));
    }

    #[test]
    fn capacity_estimate_matches_output() {
        let tokens = [
            Token::from(1u64),
            Token::from("some text that spans more than one word of data"),
            Token::Tuple(vec![Token::from(2u64), Token::Bytes(vec![1, 2, 3])]),
        ];
        assert_eq!(encode(&tokens).len(), encoded_len(&tokens));
    }
}
