use std::sync::Arc;

use bytes::Bytes;
use okcomputer_abi::Address;

use crate::error::Result;

/// A read-only remote procedure call against a contract.
///
/// Implementations must return the raw ABI-encoded return data. Calls are
/// independent and side-effect free, so callers may issue them from several
/// threads at once.
pub trait Transport: Send + Sync {
    /// Execute `data` against the contract at `to` without a transaction.
    fn call(&self, to: &Address, data: &[u8]) -> Result<Bytes>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(&self, to: &Address, data: &[u8]) -> Result<Bytes> {
        (**self).call(to, data)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&self, to: &Address, data: &[u8]) -> Result<Bytes> {
        (**self).call(to, data)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn call(&self, to: &Address, data: &[u8]) -> Result<Bytes> {
        (**self).call(to, data)
    }
}
