//! Header scanning for `// LUA_EXPORT` declarations.
//!
//! The scanner walks a header tree, tracks the enclosing class/namespace
//! per line, and extracts every declaration that follows an export marker.
//! Parse failures are logged and skipped; one malformed annotation never
//! aborts the file or the run.

pub mod errors;
pub mod scope;
pub mod signature;
pub mod split;
pub mod types;

pub use errors::ParseError;
pub use scope::ScopeTracker;
pub use types::{FunctionSignature, Param};

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use walkdir::WalkDir;

/// Marker comment flagging the next declaration for export.
pub const EXPORT_MARKER: &str = "// LUA_EXPORT";

/// File extensions recognized as C++ headers.
const HEADER_EXTENSIONS: &[&str] = &["h", "hpp"];

/// Whether a path looks like a header this tool should scan.
pub fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| HEADER_EXTENSIONS.contains(&e))
}

/// Scan a directory tree for exported declarations.
///
/// Files are visited in sorted order so output is deterministic across
/// platforms. Unreadable files are skipped with a warning.
pub fn scan_tree(root: &Path) -> Result<Vec<FunctionSignature>> {
    if !root.is_dir() {
        bail!("header directory not found: {}", root.display());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_header(entry.path()) {
            found.extend(scan_file(entry.path()));
        }
    }
    Ok(found)
}

/// Scan an explicit list of header files, in the given order.
pub fn scan_headers(files: &[PathBuf]) -> Vec<FunctionSignature> {
    files.iter().flat_map(|path| scan_file(path)).collect()
}

/// Scan one header file. Read failures (including non-UTF-8 content) are
/// logged and yield no signatures.
pub fn scan_file(path: &Path) -> Vec<FunctionSignature> {
    match std::fs::read_to_string(path) {
        Ok(content) => scan_content(&content, path),
        Err(e) => {
            tracing::warn!("skipping {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Scan header text for export markers.
///
/// The marker lookahead does not consume lines: declaration lines are
/// still seen by the scope tracker on their own turn.
pub fn scan_content(content: &str, source: &Path) -> Vec<FunctionSignature> {
    let lines: Vec<&str> = content.lines().collect();
    let mut tracker = ScopeTracker::new();
    let mut found = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        tracker = tracker.step(line);

        if !line.contains(EXPORT_MARKER) {
            continue;
        }

        let Some(raw) = collect_declaration(&lines[i + 1..]) else {
            tracing::warn!(
                "{}:{}: export marker with no following declaration",
                source.display(),
                i + 1
            );
            continue;
        };

        match signature::parse_declaration(&raw) {
            Ok(decl) => {
                let sig = FunctionSignature {
                    return_type: decl.return_type,
                    name: decl.name,
                    params: decl.params,
                    class: tracker.class().map(str::to_string),
                    namespace: tracker.namespace().map(str::to_string),
                    source: source.to_path_buf(),
                };
                tracing::debug!("found exported function: {} in {}", sig, source.display());
                found.push(sig);
            }
            Err(e) => {
                tracing::warn!("{}:{}: skipping declaration: {}", source.display(), i + 1, e);
            }
        }
    }

    found
}

/// Join the declaration lines following a marker, up to and including the
/// first line carrying a terminator or block-open token. Blank lines and
/// comment lines in between are skipped.
fn collect_declaration(rest: &[&str]) -> Option<String> {
    let mut parts = Vec::new();
    for line in rest {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        parts.push(line);
        if line.contains(';') || line.contains('{') {
            break;
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> Vec<FunctionSignature> {
        scan_content(content, Path::new("test.h"))
    }

    #[test]
    fn test_scan_class_member() {
        let sigs = scan(
            "class Calculator {\n\
             public:\n\
                 // LUA_EXPORT\n\
                 int Add(int a, int b);\n\
             };\n",
        );
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].name, "Add");
        assert_eq!(sigs[0].class.as_deref(), Some("Calculator"));
        assert_eq!(sigs[0].namespace, None);
    }

    #[test]
    fn test_scan_namespace_function() {
        let sigs = scan(
            "namespace Telemetry {\n\
                 // LUA_EXPORT\n\
                 void Log(const char* message);\n\
             }\n",
        );
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].namespace.as_deref(), Some("Telemetry"));
        assert_eq!(sigs[0].class, None);
    }

    #[test]
    fn test_scan_unscoped_function() {
        let sigs = scan("// LUA_EXPORT\nbool IsReady();\n");
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].class, None);
        assert_eq!(sigs[0].namespace, None);
    }

    #[test]
    fn test_scan_multiline_declaration() {
        let sigs = scan(
            "// LUA_EXPORT\n\
             SyncResult SyncPlayerData(const std::string& playerName,\n\
                                       long long credits,\n\
                                       long long playtime);\n",
        );
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].params.len(), 3);
        assert_eq!(sigs[0].params[1], Param::new("long long", "credits"));
    }

    #[test]
    fn test_scan_skips_comment_lines_after_marker() {
        let sigs = scan(
            "// LUA_EXPORT\n\
             // Adds two numbers.\n\
             int Add(int a, int b);\n",
        );
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].name, "Add");
    }

    #[test]
    fn test_scan_recovers_from_malformed_declaration() {
        let sigs = scan(
            "// LUA_EXPORT\n\
             not a declaration at all;\n\
             // LUA_EXPORT\n\
             int Add(int a, int b);\n",
        );
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].name, "Add");
    }

    #[test]
    fn test_scan_marker_at_end_of_file() {
        assert!(scan("// LUA_EXPORT\n").is_empty());
    }

    #[test]
    fn test_scan_inline_body() {
        let sigs = scan(
            "class TestScript {\n\
                 // LUA_EXPORT\n\
                 int SumAB(int a, int b) {\n\
                     return a + b;\n\
                 }\n\
             };\n",
        );
        assert_eq!(sigs.len(), 1);
        assert_eq!(sigs[0].to_string(), "int SumAB(int a, int b)");
        assert_eq!(sigs[0].class.as_deref(), Some("TestScript"));
    }

    #[test]
    fn test_scan_context_frozen_at_recognition() {
        let sigs = scan(
            "class First {\n\
                 // LUA_EXPORT\n\
                 void Ping();\n\
             };\n\
             class Second {\n\
                 // LUA_EXPORT\n\
                 void Pong();\n\
             };\n",
        );
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs[0].class.as_deref(), Some("First"));
        assert_eq!(sigs[1].class.as_deref(), Some("Second"));
    }

    #[test]
    fn test_is_header() {
        assert!(is_header(Path::new("a/b/script.h")));
        assert!(is_header(Path::new("script.hpp")));
        assert!(!is_header(Path::new("script.cpp")));
        assert!(!is_header(Path::new("script")));
    }
}
