#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;
use okcomputer_abi::{decode_tuple, derive_key, encode, Address, ChannelKey, Token, U256};
use okcomputer_client::{Function, Message, BASE_MAINNET};
use okcomputer_transport::{Transport, TransportError};

/// In-memory stand-in for the two contracts.
///
/// Decodes incoming call data with the real schemas and answers with
/// contract-shaped return data, so requests and responses both go through
/// the codec.
#[derive(Default)]
pub struct FixtureTransport {
    channels: HashMap<ChannelKey, Vec<Message>>,
    strings: HashMap<(u64, ChannelKey), String>,
    owners: HashMap<u64, Address>,
    /// Raw response overrides by selector.
    raw: HashMap<[u8; 4], Vec<u8>>,
    failing: Option<Function>,
    calls: Mutex<Vec<Function>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(mut self, channel: &str, texts: &[&str]) -> Self {
        let key = derive_key(channel);
        let messages = texts
            .iter()
            .enumerate()
            .map(|(i, text)| fixture_message(key, i as u64, text))
            .collect();
        self.channels.insert(key, messages);
        self
    }

    pub fn with_string(mut self, token_id: u64, key_name: &str, value: &str) -> Self {
        self.strings
            .insert((token_id, derive_key(key_name)), value.to_string());
        self
    }

    pub fn with_owner(mut self, token_id: u64, owner: Address) -> Self {
        self.owners.insert(token_id, owner);
        self
    }

    pub fn with_raw_response(mut self, function: Function, raw: Vec<u8>) -> Self {
        self.raw.insert(*function.selector().as_bytes(), raw);
        self
    }

    pub fn failing_on(mut self, function: Function) -> Self {
        self.failing = Some(function);
        self
    }

    pub fn calls(&self) -> Vec<Function> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_of(&self, function: Function) -> usize {
        self.calls().iter().filter(|f| **f == function).count()
    }

    fn answer(&self, function: Function, args: Vec<Token>) -> Result<Bytes, TransportError> {
        let tokens = match function {
            Function::OwnerOf => {
                let token_id = uint(&args[0]);
                match self.owners.get(&token_id) {
                    Some(owner) => vec![Token::from(*owner)],
                    None => return Err(revert("ERC721: invalid token ID")),
                }
            }
            Function::GetMessageCount => {
                let len = self.channels.get(&key(&args[0])).map_or(0, Vec::len);
                vec![Token::from(len as u64)]
            }
            Function::GetMessage => {
                let index = uint(&args[1]) as usize;
                match self.channels.get(&key(&args[0])).and_then(|m| m.get(index)) {
                    Some(message) => message.to_tokens(),
                    None => return Err(revert("Index out of bounds")),
                }
            }
            Function::GetStringOrDefault => {
                let token_id = uint(&args[0]);
                let value = self
                    .strings
                    .get(&(token_id, key(&args[1])))
                    .cloned()
                    .unwrap_or_else(|| args[2].clone().into_string().unwrap());
                vec![Token::from(value)]
            }
            Function::HasData => {
                let token_id = uint(&args[0]);
                vec![Token::from(self.strings.contains_key(&(token_id, key(&args[1]))))]
            }
            other => panic!("{} is write-only", other.name()),
        };
        Ok(encode(&tokens))
    }
}

impl Transport for FixtureTransport {
    fn call(&self, to: &Address, data: &[u8]) -> Result<Bytes, TransportError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(2));

        let result = self.dispatch(to, data);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl FixtureTransport {
    fn dispatch(&self, to: &Address, data: &[u8]) -> Result<Bytes, TransportError> {
        let function = Function::ALL
            .into_iter()
            .find(|f| f.selector().as_bytes() == &data[..4])
            .expect("unknown selector");
        assert_eq!(
            *to,
            BASE_MAINNET.address_of(function.contract()),
            "{} sent to the wrong contract",
            function.name()
        );
        self.calls.lock().unwrap().push(function);

        if self.failing == Some(function) {
            return Err(TransportError::Rpc {
                code: -32000,
                message: "upstream unavailable".to_string(),
            });
        }
        if let Some(raw) = self.raw.get(function.selector().as_bytes()) {
            return Ok(Bytes::from(raw.clone()));
        }

        let args = decode_tuple(&data[4..], &function.inputs()).expect("call data should decode");
        self.answer(function, args)
    }
}

pub fn fixture_message(key: ChannelKey, index: u64, text: &str) -> Message {
    Message {
        index,
        channel_key: key,
        token_id: 100 + index,
        timestamp: 1_738_000_000 + index * 60,
        sender: Address::new([index as u8 + 1; 20]),
        metadata: U256::ZERO,
        text: text.to_string(),
    }
}

fn uint(token: &Token) -> u64 {
    token.clone().into_uint().unwrap().to_u64().unwrap()
}

fn key(token: &Token) -> ChannelKey {
    let bytes = token.clone().into_fixed_bytes().unwrap();
    ChannelKey::new(bytes.try_into().unwrap())
}

fn revert(message: &str) -> TransportError {
    TransportError::Reverted {
        message: message.to_string(),
        data: None,
    }
}
