//! Per-file registration table and module entry point.

use std::collections::HashSet;
use std::path::Path;

use super::classify::FunctionPlan;
use super::wrapper::wrapper_symbol;

/// Lua module name for a header: its base name with any character that is
/// not valid in a C identifier replaced by `_`.
pub fn module_name(header: &Path) -> String {
    let stem = header
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Emit the `luaL_Reg` table and `luaopen_` entry point for one module.
///
/// Only supported plans get a table entry, the same partition the wrapper
/// emitter consumed. Duplicate export names are reported; the table is
/// emitted as-is and the collision is left to the caller to resolve.
pub fn emit_registration(module: &str, plans: &[FunctionPlan<'_>]) -> String {
    let mut seen = HashSet::new();
    let mut entries: Vec<String> = Vec::new();
    for plan in plans.iter().filter(|p| p.is_supported()) {
        let name = &plan.sig.name;
        if !seen.insert(name.clone()) {
            tracing::warn!("module {}: duplicate export name `{}`", module, name);
        }
        entries.push(format!("    {{\"{}\", {}}},", name, wrapper_symbol(name)));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "static const luaL_Reg {module}_functions[] = {{\n"
    ));
    for entry in &entries {
        out.push_str(entry);
        out.push('\n');
    }
    out.push_str("    {NULL, NULL} // Sentinel\n");
    out.push_str("};\n\n");

    out.push_str("#ifdef _WIN32\n");
    out.push_str("__declspec(dllexport)\n");
    out.push_str("#endif\n");
    out.push_str(&format!("int luaopen_{module}(lua_State* L) {{\n"));
    out.push_str(&format!(
        "    luaL_register(L, \"{module}\", {module}_functions);\n"
    ));
    out.push_str("    return 1;\n");
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::classify::plan;
    use crate::scanner::{FunctionSignature, Param};

    #[test]
    fn test_module_name_sanitizes_stem() {
        assert_eq!(module_name(Path::new("src/player_ship.h")), "player_ship");
        assert_eq!(module_name(Path::new("sector-match.hpp")), "sector_match");
    }

    #[test]
    fn test_registration_table_and_entry_point() {
        let add = FunctionSignature::new("int", "Add")
            .with_param(Param::new("int", "a"))
            .with_class("Calculator");
        let sigs = vec![add];
        let plans: Vec<_> = sigs.iter().map(plan).collect();

        let out = emit_registration("calculator", &plans);
        assert!(out.contains("static const luaL_Reg calculator_functions[] = {"));
        assert!(out.contains("    {\"Add\", lua_Add},"));
        assert!(out.contains("    {NULL, NULL} // Sentinel"));
        assert!(out.contains("int luaopen_calculator(lua_State* L) {"));
        assert!(out.contains("luaL_register(L, \"calculator\", calculator_functions);"));
    }

    #[test]
    fn test_excluded_function_has_no_entry() {
        let ok = FunctionSignature::new("void", "Ping");
        let excluded = FunctionSignature::new("void", "Attach")
            .with_param(Param::new("const Session&", "session"));
        let sigs = vec![ok, excluded];
        let plans: Vec<_> = sigs.iter().map(plan).collect();

        let out = emit_registration("session", &plans);
        assert!(out.contains("{\"Ping\", lua_Ping},"));
        assert!(!out.contains("Attach"));
    }

    #[test]
    fn test_empty_module_still_has_sentinel() {
        let out = emit_registration("empty", &[]);
        assert!(out.contains("static const luaL_Reg empty_functions[] = {\n    {NULL, NULL}"));
    }
}
