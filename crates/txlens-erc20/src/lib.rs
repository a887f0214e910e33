//! Stateless EVM decoding for the txlens annotation engine.
//!
//! Two independent concerns live here: extracting typed token-transfer
//! records from event logs, and decoding a transaction's input bytes against
//! the small set of ERC-20 function signatures the engine understands.
//! Neither produces errors; anything unrecognized is skipped or `None`.

pub mod calldata;
pub mod logs;

pub use calldata::decode_erc20_call;
pub use logs::{filter_by_tracked, parse_transfer_logs};
