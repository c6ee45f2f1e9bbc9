// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use hisabkitab::{cli, commands, db, ledger::Ledger, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_flag("verbose"));

    if matches.subcommand().is_none() {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }

    let path = db::resolve_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let store = db::open_or_init(&path)?;
    let mut ledger = Ledger::new(store);
    ledger.init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        _ => commands::dispatch(&mut ledger, &matches)?,
    }

    ledger.into_store().close()?;
    Ok(())
}
