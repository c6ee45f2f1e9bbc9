// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{NewPaymentMethod, PaymentMethod, PaymentMethodPatch};
use crate::store::RecordStore;
use crate::utils::{arg, maybe_print_json, opt_arg, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let method = ledger.create_payment_method(NewPaymentMethod {
                name: arg(sub, "name")?.to_string(),
                icon: arg(sub, "icon")?.to_string(),
                is_default: sub.get_flag("default"),
            })?;
            println!("Added payment method '{}'", method.name);
        }
        Some(("list", sub)) => {
            let methods = ledger.list_payment_methods()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &methods)? {
                let rows = methods
                    .iter()
                    .map(|m| {
                        vec![
                            m.name.clone(),
                            if m.is_default { "yes".into() } else { String::new() },
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Method", "Default"], rows));
            }
        }
        Some(("edit", sub)) => {
            let method = method_named(ledger, arg(sub, "name")?)?;
            let updated = ledger.update_payment_method(
                method.id,
                PaymentMethodPatch {
                    name: opt_arg(sub, "rename").map(str::to_string),
                    icon: opt_arg(sub, "icon").map(str::to_string),
                    is_default: sub.get_one::<bool>("default").copied(),
                },
            )?;
            println!("Updated payment method '{}'", updated.name);
        }
        Some(("rm", sub)) => {
            let method = method_named(ledger, arg(sub, "name")?)?;
            ledger.delete_payment_method(method.id)?;
            println!("Removed payment method '{}'", method.name);
        }
        _ => {}
    }
    Ok(())
}

fn method_named<S: RecordStore>(ledger: &Ledger<S>, name: &str) -> Result<PaymentMethod> {
    ledger
        .list_payment_methods()?
        .into_iter()
        .find(|m| m.name == name)
        .with_context(|| format!("Payment method '{}' not found", name))
}
