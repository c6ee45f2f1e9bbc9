// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod contacts;
pub mod doctor;
pub mod exporter;
pub mod importer;
pub mod methods;
pub mod reports;
pub mod savings;
pub mod settings;
pub mod transactions;

use crate::ledger::Ledger;
use crate::store::RecordStore;
use anyhow::{Result, bail};

/// Dispatch a parsed command line against an initialized ledger.
pub fn dispatch<S: RecordStore>(ledger: &mut Ledger<S>, matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(ledger, sub)?,
        Some(("saving", sub)) => savings::handle(ledger, sub)?,
        Some(("contact", sub)) => contacts::handle(ledger, sub)?,
        Some(("category", sub)) => categories::handle(ledger, sub)?,
        Some(("method", sub)) => methods::handle(ledger, sub)?,
        Some(("settings", sub)) => settings::handle(ledger, sub)?,
        Some(("budget", sub)) => budgets::handle(ledger, sub)?,
        Some(("report", sub)) => reports::handle(ledger, sub)?,
        Some(("export", sub)) => exporter::handle(ledger, sub)?,
        Some(("import", sub)) => importer::handle(ledger, sub)?,
        Some(("doctor", _)) => doctor::handle(ledger)?,
        Some(("reset", sub)) => {
            if !sub.get_flag("yes") {
                bail!("Refusing to delete all data without --yes");
            }
            ledger.reset()?;
            println!("All data deleted; defaults restored");
        }
        _ => {}
    }
    Ok(())
}
