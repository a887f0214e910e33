//! Transactions, event logs, and the typed records derived from them.

use chrono::{DateTime, Utc};
use primitive_types::{H256, U256};
use serde::{Deserialize, Serialize};

use crate::Address;

/// An EVM transaction as supplied by the chain data source.
///
/// Both not-yet-submitted requests and mined transactions are carried by the
/// same shape: requests have the gas/fee fields set and no block hash, mined
/// transactions have a block hash and usually logs.
///
/// `value` is a tri-state: `Some(0)` (explicit zero value) and `None` (no
/// value field at all) classify differently and must not be collapsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: Address,
    /// Absent for contract deployments.
    pub to: Option<Address>,
    pub data: Option<Vec<u8>>,
    pub value: Option<U256>,
    pub gas_limit: Option<U256>,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
    /// Present only once the transaction is mined.
    pub block_hash: Option<H256>,
    pub logs: Option<Vec<EvmLog>>,
}

impl Transaction {
    /// A not-yet-submitted request carries a gas limit and both fee fields.
    pub fn is_request(&self) -> bool {
        self.gas_limit.is_some()
            && self.max_fee_per_gas.is_some()
            && self.max_priority_fee_per_gas.is_some()
    }

    /// Whether the transaction carries non-empty call data.
    pub fn has_call_data(&self) -> bool {
        self.data.as_ref().is_some_and(|d| !d.is_empty())
    }
}

/// A raw event log emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmLog {
    /// The emitting contract.
    pub address: Address,
    /// Indexed topics; `topics[0]` is the event signature digest.
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
}

/// Block data, fetched by hash for mined transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub timestamp: DateTime<Utc>,
}

/// A fungible token movement extracted from an event log.
///
/// Amounts are in the asset's native base units; decimal normalization
/// happens later, once the contract is matched against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTransferLog {
    /// The token contract that emitted the event.
    pub contract: Address,
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

/// A recognized ERC-20 function call decoded from transaction input bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedCall {
    Transfer { to: Address, amount: U256 },
    TransferFrom { from: Address, to: Address, amount: U256 },
    Approve { spender: Address, value: U256 },
}
