// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::store::RecordKind;

/// Errors raised by the ledger core.
///
/// Every variant carries enough context (operation input, offending field or
/// id) for the CLI to render a message without consulting the store again.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed input, rejected before it reaches the store.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("invalid date '{0}', expected YYYY-MM-DD or an ISO-8601 timestamp")]
    InvalidDate(String),

    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// A payment larger than what is still outstanding on a contact.
    #[error(
        "payment of {payment} exceeds outstanding balance {outstanding} for contact {contact_id}"
    )]
    Overpayment {
        contact_id: i64,
        payment: Decimal,
        outstanding: Decimal,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: i64 },

    /// The backing store failed; the original error is kept as the source.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
