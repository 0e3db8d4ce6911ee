//! `gangway generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use gangway::ops::{generate_bindings, GenerateOptions};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let opts = GenerateOptions::new(&args.header_dir)
        .with_output(args.output_dir)
        .with_header_globs(args.header);

    println!("Generating Lua wrappers...");
    println!("  Headers: {}", opts.header_dir.display());
    println!("  Output:  {}", opts.output_dir().display());
    println!();

    let report = generate_bindings(&opts)?;

    if report.generated.is_empty() {
        println!("No LUA_EXPORT declarations found; nothing was written.");
        return Ok(());
    }

    for ((module, count), path) in report.modules.iter().zip(&report.generated) {
        println!("  {} wrapper(s) for {} -> {}", count, module, path.display());
    }

    println!();
    println!(
        "Generated {} file(s), {} exported function(s)",
        report.generated.len(),
        report.export_count()
    );
    if let Some(manifest) = &report.manifest {
        println!("Manifest written to {}", manifest.display());
    }

    Ok(())
}
