// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::models::{CategoryPatch, EntryType, NewCategory};
use crate::store::RecordStore;
use crate::utils::{arg, maybe_print_json, opt_arg, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: RecordStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let cat = ledger.create_category(NewCategory {
                name: arg(sub, "name")?.to_string(),
                icon: arg(sub, "icon")?.to_string(),
                color: arg(sub, "color")?.to_string(),
                r#type: arg(sub, "type")?.parse()?,
                is_private: sub.get_flag("private"),
            })?;
            println!("Added {} category '{}'", cat.r#type, cat.name);
        }
        Some(("list", sub)) => {
            let ty: Option<EntryType> = opt_arg(sub, "type").map(str::parse).transpose()?;
            let mut cats = ledger.list_categories()?;
            if let Some(ty) = ty {
                cats.retain(|c| c.r#type == ty);
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let rows = cats
                    .iter()
                    .map(|c| vec![c.name.clone(), c.r#type.to_string(), c.color.clone()])
                    .collect();
                println!("{}", pretty_table(&["Category", "Type", "Color"], rows));
            }
        }
        Some(("edit", sub)) => {
            let name = arg(sub, "name")?;
            let cat = ledger
                .category_named(name)?
                .with_context(|| format!("Category '{}' not found", name))?;
            let updated = ledger.update_category(
                cat.id,
                CategoryPatch {
                    name: opt_arg(sub, "rename").map(str::to_string),
                    icon: opt_arg(sub, "icon").map(str::to_string),
                    color: opt_arg(sub, "color").map(str::to_string),
                    r#type: opt_arg(sub, "type").map(str::parse).transpose()?,
                    is_private: sub.get_one::<bool>("private").copied(),
                },
            )?;
            println!("Updated category '{}'", updated.name);
        }
        Some(("rm", sub)) => {
            let name = arg(sub, "name")?;
            let cat = ledger
                .category_named(name)?
                .with_context(|| format!("Category '{}' not found", name))?;
            ledger.delete_category(cat.id)?;
            println!("Removed category '{}'", cat.name);
        }
        _ => {}
    }
    Ok(())
}
