// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Outstanding balance and status transitions for dena-pona contacts.
//!
//! These are the only places that change `paid_amount` or `status`; the
//! ledger persists whatever they return.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Contact, ContactStatus};

/// Status implied by how much of `amount` has been paid.
pub fn derive_status(amount: Decimal, paid_amount: Decimal) -> ContactStatus {
    if paid_amount <= Decimal::ZERO {
        ContactStatus::Pending
    } else if paid_amount < amount {
        ContactStatus::Partial
    } else {
        ContactStatus::Paid
    }
}

/// Check `0 <= paid_amount <= amount` for a contact about to be stored.
pub fn check_invariant(amount: Decimal, paid_amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation("amount", "must be greater than zero"));
    }
    if paid_amount < Decimal::ZERO {
        return Err(Error::validation("paidAmount", "must not be negative"));
    }
    if paid_amount > amount {
        return Err(Error::validation(
            "paidAmount",
            format!("{} exceeds the total amount {}", paid_amount, amount),
        ));
    }
    Ok(())
}

/// Record a partial or final payment against a contact.
///
/// Fails with [`Error::Overpayment`] when the payment is larger than the
/// outstanding balance; the input contact is never modified.
pub fn apply_payment(contact: &Contact, payment: Decimal) -> Result<Contact> {
    if payment <= Decimal::ZERO {
        return Err(Error::validation("payment", "must be greater than zero"));
    }
    let outstanding = contact.outstanding();
    if payment > outstanding {
        return Err(Error::Overpayment {
            contact_id: contact.id,
            payment,
            outstanding,
        });
    }
    let mut updated = contact.clone();
    updated.paid_amount += payment;
    updated.status = derive_status(updated.amount, updated.paid_amount);
    Ok(updated)
}

/// Settle a contact in full regardless of what was paid before.
pub fn mark_fully_paid(contact: &Contact) -> Contact {
    Contact {
        paid_amount: contact.amount,
        status: ContactStatus::Paid,
        ..contact.clone()
    }
}
