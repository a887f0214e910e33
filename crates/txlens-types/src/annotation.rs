//! The annotation produced for a classified transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, AssetAmount};

/// The classification of a transaction. Exactly one variant is active, and
/// the `type` tag fully determines which fields are present in serialized
/// form; fields of other variants never appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnnotationKind {
    /// A call into a contract whose intent could not be decoded further.
    ContractInteraction {
        #[serde(skip_serializing_if = "Option::is_none")]
        contract_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        logo: Option<String>,
    },
    /// No recipient was present on the transaction.
    ContractDeployment,
    /// A movement of the native currency or a fungible token.
    AssetTransfer {
        sender: Address,
        recipient: Address,
        #[serde(skip_serializing_if = "Option::is_none")]
        recipient_name: Option<String>,
        amount: AssetAmount,
        #[serde(skip_serializing_if = "Option::is_none")]
        logo: Option<String>,
    },
    /// A spending allowance granted to another account.
    AssetApproval {
        spender: Address,
        #[serde(skip_serializing_if = "Option::is_none")]
        spender_name: Option<String>,
        /// The amount the spender is authorized to use.
        amount: AssetAmount,
        #[serde(skip_serializing_if = "Option::is_none")]
        logo: Option<String>,
    },
}

/// Risk warnings attached to an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Warning {
    /// The request's worst-case cost exceeds the sender's balance.
    InsufficientFunds,
    /// A token transfer's recipient is the token contract itself.
    SendToToken,
}

/// The structured classification result for one transaction.
///
/// Built fresh per classification call and immutable once returned. Nested
/// `children` describe token transfers discovered in the transaction's logs,
/// in log order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(flatten)]
    pub kind: AnnotationKind,
    pub created_at: DateTime<Utc>,
    /// Present only once the containing block was fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Annotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Warning>>,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, created_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            created_at,
            block_timestamp: None,
            children: None,
            warnings: None,
        }
    }

    pub fn with_block_timestamp(mut self, block_timestamp: Option<DateTime<Utc>>) -> Self {
        self.block_timestamp = block_timestamp;
        self
    }

    /// Attaches the sub-annotation list, but only when it is non-empty.
    pub fn with_children(mut self, children: Vec<Annotation>) -> Self {
        if !children.is_empty() {
            self.children = Some(children);
        }
        self
    }

    /// Attaches the warning list, but only when it is non-empty.
    pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        if !warnings.is_empty() {
            self.warnings = Some(warnings);
        }
        self
    }
}
