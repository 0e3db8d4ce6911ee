//! `gangway scan` command
//!
//! Lists the exported declarations a generate run would pick up, without
//! writing anything.

use anyhow::Result;

use crate::cli::ScanArgs;
use gangway::ops::{scan_exports, GenerateOptions};

pub fn execute(args: ScanArgs) -> Result<()> {
    let opts = GenerateOptions::new(&args.header_dir).with_header_globs(args.header);
    let exports = scan_exports(&opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&exports)?);
        return Ok(());
    }

    if exports.is_empty() {
        println!(
            "No LUA_EXPORT declarations found under {}",
            args.header_dir.display()
        );
        return Ok(());
    }

    for sig in &exports {
        let scope = match (&sig.class, &sig.namespace) {
            (Some(class), _) => format!(" [class {}]", class),
            (None, Some(ns)) => format!(" [namespace {}]", ns),
            (None, None) => String::new(),
        };
        println!("  {}{}  ({})", sig, scope, sig.source.display());
    }

    println!();
    println!("{} exported declaration(s)", exports.len());

    Ok(())
}
