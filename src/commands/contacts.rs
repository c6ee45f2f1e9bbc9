// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{ContactPatch, ContactStatus, NewContact};
use crate::store::RecordStore;
use crate::utils::{
    arg, fmt_date, id_arg, maybe_print_json, opt_arg, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let contact = ledger.create_contact(NewContact {
                name: arg(sub, "name")?.to_string(),
                phone: opt_arg(sub, "phone").map(str::to_string),
                r#type: arg(sub, "type")?.parse()?,
                amount: parse_decimal(arg(sub, "amount")?)?,
                due_date: opt_arg(sub, "due").map(parse_date).transpose()?,
            })?;
            println!(
                "Added {} contact '{}' for {} (id {})",
                contact.r#type, contact.name, contact.amount, contact.id
            );
        }
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("pay", sub)) => {
            let id = id_arg(sub, "id")?;
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let c = ledger.pay_contact(id, amount)?;
            println!(
                "Paid {} to '{}': {} of {} paid, {} outstanding ({})",
                amount,
                c.name,
                c.paid_amount,
                c.amount,
                c.outstanding(),
                c.status
            );
        }
        Some(("settle", sub)) => {
            let c = ledger.settle_contact(id_arg(sub, "id")?)?;
            println!("Marked '{}' as {}", c.name, c.status);
        }
        Some(("edit", sub)) => {
            let id = id_arg(sub, "id")?;
            let patch = ContactPatch {
                name: opt_arg(sub, "name").map(str::to_string),
                phone: opt_arg(sub, "phone").map(|p| Some(p.to_string())),
                r#type: None,
                amount: opt_arg(sub, "amount").map(parse_decimal).transpose()?,
                paid_amount: opt_arg(sub, "paid").map(parse_decimal).transpose()?,
                status: opt_arg(sub, "status")
                    .map(str::parse::<ContactStatus>)
                    .transpose()?,
                due_date: opt_arg(sub, "due")
                    .map(parse_date)
                    .transpose()?
                    .map(Some),
            };
            let c = ledger.update_contact(id, patch)?;
            println!("Updated contact {} ({})", c.id, c.status);
        }
        Some(("rm", sub)) => {
            let id = id_arg(sub, "id")?;
            ledger.delete_contact(id)?;
            println!("Removed contact {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list<S: RecordStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let mut contacts = ledger.list_contacts()?;
    if sub.get_flag("open") {
        contacts.retain(|c| c.status != ContactStatus::Paid);
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &contacts)? {
        let rows = contacts
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.r#type.to_string(),
                    c.amount.to_string(),
                    c.paid_amount.to_string(),
                    c.outstanding().to_string(),
                    c.status.to_string(),
                    c.due_date.as_ref().map(fmt_date).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Type", "Amount", "Paid", "Outstanding", "Status", "Due"],
                rows,
            )
        );
    }
    Ok(())
}
