//! The end-to-end generation pipeline.
//!
//! One synchronous pass: scan the header tree, group exports by source
//! file, emit one wrapper translation unit per file, then write the CMake
//! manifest listing everything generated. Scan-side failures are
//! recovered per file; a failed output write aborts the run.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::codegen;
use crate::scanner::{self, FunctionSignature};
use crate::util::fs::{ensure_dir, glob_files, normalize_path, write_string};

/// File name of the generated-sources manifest.
pub const MANIFEST_NAME: &str = "generated_files.cmake";

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root directory scanned for headers
    pub header_dir: PathBuf,
    /// Output directory override
    pub output: Option<PathBuf>,
    /// Optional glob patterns restricting which headers are scanned
    pub header_globs: Vec<String>,
}

impl GenerateOptions {
    pub fn new(header_dir: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            header_dir: header_dir.into(),
            output: None,
            header_globs: Vec::new(),
        }
    }

    /// Override the output directory.
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Restrict scanning to headers matching these glob patterns.
    pub fn with_header_globs(mut self, globs: Vec<String>) -> Self {
        self.header_globs = globs;
        self
    }

    /// Resolved output directory: the override, or a `generated`
    /// directory next to the header root.
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.header_dir.join("../generated"))
    }
}

/// Result summary of a generation run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Generated file paths, in emission order
    pub generated: Vec<PathBuf>,
    /// Manifest path, if one was written
    pub manifest: Option<PathBuf>,
    /// (module name, wrapper count) per generated file
    pub modules: Vec<(String, usize)>,
}

impl GenerateReport {
    /// Total exported declarations across all modules.
    pub fn export_count(&self) -> usize {
        self.modules.iter().map(|(_, n)| n).sum()
    }
}

/// Scan for exported declarations, honoring the optional glob restriction.
pub fn scan_exports(opts: &GenerateOptions) -> Result<Vec<FunctionSignature>> {
    if opts.header_globs.is_empty() {
        scanner::scan_tree(&opts.header_dir)
    } else {
        let files = glob_files(&opts.header_dir, &opts.header_globs)?;
        Ok(scanner::scan_headers(&files))
    }
}

/// Run the full pipeline: scan, emit per-file wrappers, write the manifest.
///
/// Finding zero exports is a successful no-op: nothing is written, not
/// even the output directory.
pub fn generate_bindings(opts: &GenerateOptions) -> Result<GenerateReport> {
    let exports = scan_exports(opts)?;

    if exports.is_empty() {
        tracing::info!(
            "no {} declarations found under {}",
            scanner::EXPORT_MARKER,
            opts.header_dir.display()
        );
        return Ok(GenerateReport::default());
    }

    let output_dir = opts.output_dir();
    ensure_dir(&output_dir)?;

    let mut report = GenerateReport::default();
    for (header, sigs) in group_by_header(exports) {
        let module = codegen::module_name(&header);
        let unit = codegen::emit_unit(&header, &output_dir, &sigs);
        let out_path = output_dir.join(format!("{module}.generated.cpp"));
        write_string(&out_path, &unit)?;

        tracing::info!(
            "generated {} Lua wrappers for {} in {}",
            sigs.len(),
            module,
            out_path.display()
        );
        report.generated.push(out_path);
        report.modules.push((module, sigs.len()));
    }

    let manifest = output_dir.join(MANIFEST_NAME);
    write_manifest(&manifest, &report.generated)?;
    report.manifest = Some(manifest);

    Ok(report)
}

/// Group signatures by source header, preserving first-seen file order
/// and declaration order within each file.
fn group_by_header(sigs: Vec<FunctionSignature>) -> Vec<(PathBuf, Vec<FunctionSignature>)> {
    let mut groups: Vec<(PathBuf, Vec<FunctionSignature>)> = Vec::new();
    for sig in sigs {
        match groups.iter().position(|(path, _)| *path == sig.source) {
            Some(idx) => groups[idx].1.push(sig),
            None => groups.push((sig.source.clone(), vec![sig])),
        }
    }
    groups
}

/// Dump the generated-file list for build-system ingestion. Paths are
/// absolute with forward slashes, which is what the consuming CMake
/// scripts expect on every platform.
fn write_manifest(path: &Path, generated: &[PathBuf]) -> Result<()> {
    let mut out = String::from("set(GENERATED_WRAPPERS\n");
    for file in generated {
        let abs = normalize_path(file).display().to_string().replace('\\', "/");
        out.push_str(&format!("    \"{abs}\"\n"));
    }
    out.push_str(")\n");
    write_string(path, &out)
}
