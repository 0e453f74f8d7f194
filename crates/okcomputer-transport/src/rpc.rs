//! JSON-RPC 2.0 `eth_call` wire format.
//!
//! Kept separate from the HTTP client so the framing can be tested without a
//! network.

use bytes::Bytes;
use okcomputer_abi::{from_hex, to_hex, Address};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError};

/// Standard code nodes use for `execution reverted`.
pub const REVERT_ERROR_CODE: i64 = 3;

/// An `eth_call` request body.
#[derive(Debug, Serialize)]
pub struct EthCallRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: (CallObject, &'a str),
    id: u64,
}

#[derive(Debug, Serialize)]
struct CallObject {
    to: String,
    data: String,
}

impl<'a> EthCallRequest<'a> {
    pub fn new(to: &Address, data: &[u8], block_tag: &'a str, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "eth_call",
            params: (
                CallObject {
                    to: to.to_checksum(),
                    data: to_hex(data),
                },
                block_tag,
            ),
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Parse an `eth_call` response body into raw return data.
pub fn parse_eth_call_response(body: &[u8]) -> Result<Bytes> {
    let response: RpcResponse = serde_json::from_slice(body)?;

    if let Some(error) = response.error {
        return Err(classify_error(error));
    }

    let result = response
        .result
        .ok_or_else(|| TransportError::InvalidResponse("missing result".to_string()))?;
    let raw = from_hex(&result)
        .map_err(|err| TransportError::InvalidResponse(format!("result is not hex: {err}")))?;
    Ok(Bytes::from(raw))
}

fn classify_error(error: RpcErrorObject) -> TransportError {
    let reverted =
        error.code == REVERT_ERROR_CODE || error.message.to_ascii_lowercase().contains("revert");
    if !reverted {
        return TransportError::Rpc {
            code: error.code,
            message: error.message,
        };
    }

    let data = match error.data {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };
    TransportError::Reverted {
        message: error.message,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_shape() {
        let to: Address = "0xce2830932889c7fb5e5206287c43554e673dcc88".parse().unwrap();
        let request = EthCallRequest::new(&to, &[0x63, 0x52, 0x21, 0x1e], "latest", 7);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "eth_call");
        assert_eq!(value["id"], 7);
        assert_eq!(value["params"][0]["data"], "0x6352211e");
        assert_eq!(
            value["params"][0]["to"]
                .as_str()
                .unwrap()
                .to_ascii_lowercase(),
            "0xce2830932889c7fb5e5206287c43554e673dcc88"
        );
        assert_eq!(value["params"][1], "latest");
    }

    #[test]
    fn parses_result_hex() {
        let body = br#"{"jsonrpc":"2.0","id":1,"result":"0x00ff"}"#;
        assert_eq!(parse_eth_call_response(body).unwrap().as_ref(), &[0x00, 0xff]);
    }

    #[test]
    fn empty_result_is_empty_bytes() {
        let body = br#"{"jsonrpc":"2.0","id":1,"result":"0x"}"#;
        assert!(parse_eth_call_response(body).unwrap().is_empty());
    }

    #[test]
    fn missing_result_is_an_error() {
        let body = br#"{"jsonrpc":"2.0","id":1}"#;
        assert!(matches!(
            parse_eth_call_response(body),
            Err(TransportError::InvalidResponse(_))
        ));
    }

    #[test]
    fn non_hex_result_is_an_error() {
        let body = br#"{"jsonrpc":"2.0","id":1,"result":"0xnothex"}"#;
        assert!(matches!(
            parse_eth_call_response(body),
            Err(TransportError::InvalidResponse(_))
        ));
    }

    #[test]
    fn revert_is_classified() {
        let body = br#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted","data":"0x4e487b71"}}"#;
        let err = parse_eth_call_response(body).unwrap_err();
        assert!(err.is_revert());
        match err {
            TransportError::Reverted { data, .. } => assert_eq!(data.as_deref(), Some("0x4e487b71")),
            other => panic!("unexpected error: {other:?}"),
        }

        let body = br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted: index out of bounds"}}"#;
        assert!(parse_eth_call_response(body).unwrap_err().is_revert());
    }

    #[test]
    fn other_rpc_errors_are_not_reverts() {
        let body = br#"{"jsonrpc":"2.0","id":1,"error":{"code":-32005,"message":"rate limited"}}"#;
        let err = parse_eth_call_response(body).unwrap_err();
        assert!(matches!(err, TransportError::Rpc { code: -32005, .. }));
    }

    #[test]
    fn garbage_body_is_json_error() {
        assert!(matches!(
            parse_eth_call_response(b"<html>bad gateway</html>"),
            Err(TransportError::Json(_))
        ));
    }
}
