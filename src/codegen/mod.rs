//! Lua wrapper code generation.
//!
//! One generated translation unit per scanned header: includes, the
//! wrapper functions, and the module registration table, all inside an
//! `extern "C"` block. The checked-argument accessors and the composite
//! push helpers come from the pre-existing `lua_bindings.h`; that header
//! is a stable collaborator and is never generated here.

pub mod classify;
pub mod module;
pub mod wrapper;

pub use classify::{classify_param, classify_return, plan, FunctionPlan, Marshal, PlanKind, ReturnKind};
pub use module::{emit_registration, module_name};
pub use wrapper::emit_wrapper;

use std::path::Path;

use crate::scanner::FunctionSignature;
use crate::util::fs::relative_path;

/// Assemble the generated translation unit for one header's exports.
pub fn emit_unit(header: &Path, output_dir: &Path, sigs: &[FunctionSignature]) -> String {
    let module = module_name(header);
    let plans: Vec<FunctionPlan<'_>> = sigs.iter().map(plan).collect();

    let include = relative_path(output_dir, header)
        .display()
        .to_string()
        .replace('\\', "/");

    let mut out = String::new();
    out.push_str(&format!("// Auto-generated Lua wrappers for {module}\n"));
    out.push_str("// Regenerate with `gangway generate`; do not edit.\n");
    out.push_str(&format!("#include \"{include}\"\n"));
    out.push_str("#include \"lua_bindings.h\"\n\n");
    out.push_str("extern \"C\" {\n");
    out.push_str("#include <lua.h>\n");
    out.push_str("#include <lauxlib.h>\n");
    out.push_str("#include <lualib.h>\n\n");
    out.push_str("// Lua wrapper functions\n\n");

    for plan in &plans {
        out.push_str(&emit_wrapper(plan));
    }

    out.push_str(&emit_registration(&module, &plans));
    out.push_str("\n} // extern \"C\"\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Param;

    #[test]
    fn test_unit_layout() {
        let sig = FunctionSignature::new("int", "Add")
            .with_param(Param::new("int", "a"))
            .with_param(Param::new("int", "b"))
            .with_class("Calculator");

        let out = emit_unit(
            Path::new("/proj/include/calculator.h"),
            Path::new("/proj/generated"),
            &[sig],
        );

        assert!(out.starts_with("// Auto-generated Lua wrappers for calculator\n"));
        assert!(out.contains("#include \"../include/calculator.h\""));
        assert!(out.contains("#include \"lua_bindings.h\""));
        assert!(out.contains("extern \"C\" {"));
        assert!(out.contains("#include <lauxlib.h>"));
        assert!(out.contains("static int lua_Add(lua_State* L) {"));
        assert!(out.contains("int luaopen_calculator(lua_State* L) {"));
        assert!(out.trim_end().ends_with("} // extern \"C\""));
    }
}
