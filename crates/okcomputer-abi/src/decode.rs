use crate::encode::WORD_SIZE;
use crate::error::{AbiError, Result};
use crate::primitives::{Address, U256};
use crate::token::{ParamType, Token};

/// Decode return data against a tuple schema.
///
/// Fails with a decode error (never partial values) when:
/// - the buffer is shorter than the schema's head,
/// - a dynamic offset points outside the buffer,
/// - a length prefix exceeds the bytes that remain,
/// - a word is not a valid encoding of its declared type.
pub fn decode_tuple(raw: &[u8], schema: &[ParamType]) -> Result<Vec<Token>> {
    let head_len: usize = schema.iter().map(ParamType::head_size).sum();
    if raw.len() < head_len {
        return Err(AbiError::Truncated {
            needed: head_len,
            available: raw.len(),
        });
    }
    decode_params(raw, 0, schema)
}

/// Argument-order convenience over [`decode_tuple`].
pub fn decode(schema: &[ParamType], raw: &[u8]) -> Result<Vec<Token>> {
    decode_tuple(raw, schema)
}

/// Decode a sequence of params whose head starts at `base`.
///
/// Offsets of dynamic params are relative to `base`.
fn decode_params(buf: &[u8], base: usize, types: &[ParamType]) -> Result<Vec<Token>> {
    let mut cursor = base;
    let mut tokens = Vec::with_capacity(types.len());

    for ty in types {
        if ty.is_dynamic() {
            let offset = U256::from_be_bytes(*word(buf, cursor)?);
            let start = offset
                .to_usize()
                .and_then(|o| base.checked_add(o))
                .filter(|start| *start <= buf.len())
                .ok_or(AbiError::OffsetOutOfBounds {
                    offset,
                    len: buf.len(),
                })?;
            tokens.push(decode_dynamic(buf, start, ty)?);
        } else {
            tokens.push(decode_static(buf, cursor, ty)?);
        }
        cursor += ty.head_size();
    }

    Ok(tokens)
}

fn decode_static(buf: &[u8], at: usize, ty: &ParamType) -> Result<Token> {
    match ty {
        ParamType::Uint(bits) => {
            let value = U256::from_be_bytes(*word(buf, at)?);
            if value.bits() > *bits {
                return Err(AbiError::ValueOutOfRange { ty: ty.to_string() });
            }
            Ok(Token::Uint(value))
        }
        ParamType::Address => {
            let w = word(buf, at)?;
            if w[..WORD_SIZE - 20].iter().any(|b| *b != 0) {
                return Err(AbiError::InvalidAddressWord);
            }
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&w[WORD_SIZE - 20..]);
            Ok(Token::Address(Address::new(bytes)))
        }
        ParamType::Bool => {
            let w = word(buf, at)?;
            if w[..WORD_SIZE - 1].iter().any(|b| *b != 0) {
                return Err(AbiError::InvalidBool);
            }
            match w[WORD_SIZE - 1] {
                0 => Ok(Token::Bool(false)),
                1 => Ok(Token::Bool(true)),
                _ => Err(AbiError::InvalidBool),
            }
        }
        ParamType::FixedBytes(len) => {
            let w = word(buf, at)?;
            Ok(Token::FixedBytes(w[..(*len).min(WORD_SIZE)].to_vec()))
        }
        ParamType::Tuple(items) => Ok(Token::Tuple(decode_params(buf, at, items)?)),
        ParamType::String | ParamType::Bytes => decode_dynamic(buf, at, ty),
    }
}

fn decode_dynamic(buf: &[u8], start: usize, ty: &ParamType) -> Result<Token> {
    match ty {
        ParamType::String => {
            let data = length_prefixed(buf, start)?;
            Ok(Token::String(String::from_utf8(data.to_vec())?))
        }
        ParamType::Bytes => Ok(Token::Bytes(length_prefixed(buf, start)?.to_vec())),
        ParamType::Tuple(items) => Ok(Token::Tuple(decode_params(buf, start, items)?)),
        _ => decode_static(buf, start, ty),
    }
}

fn length_prefixed(buf: &[u8], start: usize) -> Result<&[u8]> {
    let length = U256::from_be_bytes(*word(buf, start)?);
    let data_start = start + WORD_SIZE;
    let remaining = buf.len() - data_start;
    let len = length
        .to_usize()
        .filter(|len| *len <= remaining)
        .ok_or(AbiError::LengthOutOfBounds { length, remaining })?;
    Ok(&buf[data_start..data_start + len])
}

fn word(buf: &[u8], at: usize) -> Result<&[u8; WORD_SIZE]> {
    at.checked_add(WORD_SIZE)
        .and_then(|end| buf.get(at..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(AbiError::Truncated {
            needed: at.saturating_add(WORD_SIZE),
            available: buf.len(),
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::channel::derive_key;
    use crate::encode::encode;

    fn message_schema() -> Vec<ParamType> {
        vec![ParamType::Tuple(vec![
            ParamType::FixedBytes(32),
            ParamType::Uint(256),
            ParamType::Uint(256),
            ParamType::Address,
            ParamType::Uint(256),
            ParamType::String,
        ])]
    }

    fn message_tokens(text: &str) -> Vec<Token> {
        let sender: Address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        vec![Token::Tuple(vec![
            Token::from(derive_key("board")),
            Token::from(1399u64),
            Token::from(1_738_000_000u64),
            Token::from(sender),
            Token::from(0u64),
            Token::from(text),
        ])]
    }

    #[test]
    fn decodes_message_tuple() {
        let raw = encode(&message_tokens("hello mfers!"));
        let decoded = decode_tuple(&raw, &message_schema()).unwrap();
        assert_eq!(decoded, message_tokens("hello mfers!"));
    }

    #[test]
    fn decodes_single_string_return() {
        let raw = encode(&[Token::from("<h1>My Page</h1>")]);
        let decoded = decode(&[ParamType::String], &raw).unwrap();
        assert_eq!(decoded, vec![Token::from("<h1>My Page</h1>")]);
    }

    #[test]
    fn truncated_head_is_rejected() {
        let raw = encode(&[Token::from(1u64), Token::from(2u64)]);
        let err = decode_tuple(&raw[..40], &[ParamType::Uint(256), ParamType::Uint(256)])
            .unwrap_err();
        assert!(matches!(err, AbiError::Truncated { needed: 64, available: 40 }));
    }

    #[test]
    fn empty_response_is_rejected() {
        let err = decode_tuple(&[], &[ParamType::Address]).unwrap_err();
        assert!(matches!(err, AbiError::Truncated { .. }));
    }

    #[test]
    fn offset_past_end_is_rejected() {
        let mut raw = encode(&[Token::from("abc")]).to_vec();
        raw[31] = 0xff;
        let err = decode_tuple(&raw, &[ParamType::String]).unwrap_err();
        assert!(matches!(err, AbiError::OffsetOutOfBounds { .. }));
    }

    #[test]
    fn huge_offset_is_rejected() {
        let mut raw = encode(&[Token::from("abc")]).to_vec();
        raw[0] = 0x80;
        let err = decode_tuple(&raw, &[ParamType::String]).unwrap_err();
        assert!(matches!(err, AbiError::OffsetOutOfBounds { .. }));
    }

    #[test]
    fn offset_to_end_without_length_word_is_truncated() {
        let mut raw = encode(&[Token::from("")]).to_vec();
        raw.truncate(32);
        let err = decode_tuple(&raw, &[ParamType::String]).unwrap_err();
        assert!(matches!(err, AbiError::Truncated { .. }));
    }

    #[test]
    fn length_past_end_is_rejected() {
        let mut raw = encode(&[Token::from("abc")]).to_vec();
        raw[63] = 0x41;
        let err = decode_tuple(&raw, &[ParamType::String]).unwrap_err();
        assert!(matches!(err, AbiError::LengthOutOfBounds { .. }));
    }

    #[test]
    fn truncated_tail_of_message_is_rejected() {
        let raw = encode(&message_tokens("a longer message body that spans two words"));
        let cut = &raw[..raw.len() - 32];
        let err = decode_tuple(cut, &message_schema()).unwrap_err();
        assert!(matches!(err, AbiError::LengthOutOfBounds { .. }));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut raw = encode(&[Token::from("ab")]).to_vec();
        raw[64] = 0xff;
        let err = decode_tuple(&raw, &[ParamType::String]).unwrap_err();
        assert!(matches!(err, AbiError::InvalidUtf8(_)));
    }

    #[test]
    fn dirty_address_word_is_rejected() {
        let mut raw = [0u8; 32];
        raw[0] = 1;
        let err = decode_tuple(&raw, &[ParamType::Address]).unwrap_err();
        assert!(matches!(err, AbiError::InvalidAddressWord));
    }

    #[test]
    fn bool_word_must_be_zero_or_one() {
        let mut raw = [0u8; 32];
        raw[31] = 1;
        assert_eq!(
            decode_tuple(&raw, &[ParamType::Bool]).unwrap(),
            vec![Token::Bool(true)]
        );
        raw[31] = 2;
        assert!(matches!(
            decode_tuple(&raw, &[ParamType::Bool]),
            Err(AbiError::InvalidBool)
        ));
    }

    #[test]
    fn narrow_uint_overflow_is_rejected() {
        let raw = encode(&[Token::from(256u64)]);
        assert!(matches!(
            decode_tuple(&raw, &[ParamType::Uint(8)]),
            Err(AbiError::ValueOutOfRange { .. })
        ));
        assert!(decode_tuple(&raw, &[ParamType::Uint(16)]).is_ok());
    }

    proptest! {
        #[test]
        fn message_text_survives_encoding(text in ".{0,200}", token_id in any::<u64>()) {
            let tokens = vec![Token::Tuple(vec![
                Token::from(derive_key("gm")),
                Token::from(token_id),
                Token::from(0u64),
                Token::from(Address::ZERO),
                Token::from(0u64),
                Token::from(text.as_str()),
            ])];
            let raw = encode(&tokens);
            prop_assert_eq!(decode_tuple(&raw, &message_schema()).unwrap(), tokens);
        }
    }
}
