//! Per-function Lua wrapper emission.

use crate::scanner::FunctionSignature;

use super::classify::{FunctionPlan, Marshal, PlanKind, ReturnKind};

/// C symbol name of the generated wrapper for an export.
pub fn wrapper_symbol(name: &str) -> String {
    format!("lua_{name}")
}

/// Emit the wrapper function (or skip comment) for one planned function.
pub fn emit_wrapper(plan: &FunctionPlan<'_>) -> String {
    match &plan.kind {
        PlanKind::Excluded { param, type_text } => format!(
            "// Skipped {} - no marshalling for reference parameter `{} {}`\n\n",
            plan.sig.name, type_text, param
        ),
        PlanKind::Supported { marshals, ret } => emit_supported(plan.sig, marshals, *ret),
    }
}

fn emit_supported(sig: &FunctionSignature, marshals: &[Marshal], ret: ReturnKind) -> String {
    let mut extracts: Vec<String> = Vec::new();
    let mut args: Vec<String> = Vec::new();
    // Lua argument positions are 1-based.
    let mut slot = 1usize;

    for (param, marshal) in sig.params.iter().zip(marshals) {
        let name = &param.name;
        let ty = &param.param_type;
        match marshal {
            Marshal::ConstCharPtr => {
                extracts.push(format!("    const char* {name} = luaL_checkstring(L, {slot});"));
            }
            Marshal::StdString => {
                extracts.push(format!("    std::string {name} = luaL_checkstring(L, {slot});"));
            }
            Marshal::Integer => {
                extracts.push(format!("    {ty} {name} = luaL_checkinteger(L, {slot});"));
            }
            Marshal::Boolean => {
                extracts.push(format!("    bool {name} = lua_toboolean(L, {slot});"));
            }
            Marshal::Number => {
                extracts.push(format!("    {ty} {name} = luaL_checknumber(L, {slot});"));
            }
            Marshal::ClientConfig => {
                // Four consecutive slots rebuilt into one temporary passed
                // by const reference.
                extracts.push(format!(
                    "    std::string {name}_host = luaL_checkstring(L, {slot});"
                ));
                extracts.push(format!(
                    "    int {name}_port = luaL_checkinteger(L, {});",
                    slot + 1
                ));
                extracts.push(format!(
                    "    std::string {name}_serverKey = luaL_checkstring(L, {});",
                    slot + 2
                ));
                extracts.push(format!(
                    "    bool {name}_useSSL = lua_toboolean(L, {});",
                    slot + 3
                ));
                extracts.push(format!(
                    "    ClientConfig {name}_tmp = {{{name}_host, {name}_port, {name}_serverKey, {name}_useSSL}};"
                ));
                extracts.push(format!("    const ClientConfig& {name} = {name}_tmp;"));
            }
            Marshal::Unclassified => {
                extracts.push(format!(
                    "    // TODO: no marshalling rule for parameter `{ty} {name}`"
                ));
            }
            Marshal::UnsupportedRef => {
                unreachable!("reference parameters exclude the function from emission")
            }
        }
        args.push(name.clone());
        slot += marshal.slots();
    }

    let call = dispatch(sig, &args);
    let mut body: Vec<String> = Vec::new();
    match ret {
        ReturnKind::Void => {
            body.push(format!("    {call};"));
            body.push("    return 0;".into());
        }
        ReturnKind::Integer => {
            body.push(format!("    auto result = {call};"));
            body.push("    lua_pushinteger(L, result);".into());
            body.push("    return 1;".into());
        }
        ReturnKind::Boolean => {
            body.push(format!("    auto result = {call};"));
            body.push("    lua_pushboolean(L, result);".into());
            body.push("    return 1;".into());
        }
        ReturnKind::Number => {
            body.push(format!("    auto result = {call};"));
            body.push("    lua_pushnumber(L, result);".into());
            body.push("    return 1;".into());
        }
        ReturnKind::CString => {
            body.push(format!("    auto result = {call};"));
            body.push("    lua_pushstring(L, result);".into());
            body.push("    return 1;".into());
        }
        ReturnKind::OwnedString => {
            body.push(format!("    auto result = {call};"));
            body.push("    lua_pushstring(L, result.c_str());".into());
            body.push("    return 1;".into());
        }
        ReturnKind::Auth => {
            body.push(format!("    auto result = {call};"));
            body.push("    PushAuthResult(L, result);".into());
            body.push("    return 1;".into());
        }
        ReturnKind::Sync => {
            body.push(format!("    auto result = {call};"));
            body.push("    PushSyncResult(L, result);".into());
            body.push("    return 1;".into());
        }
        ReturnKind::Unhandled => {
            body.push(format!("    auto result = {call};"));
            body.push(format!(
                "    // TODO: no conversion for return type {}",
                sig.return_type
            ));
            body.push("    return 1;".into());
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "static int {}(lua_State* L) {{\n",
        wrapper_symbol(&sig.name)
    ));
    if !extracts.is_empty() {
        out.push_str(&extracts.join("\n"));
        out.push_str("\n\n");
    }
    out.push_str(&body.join("\n"));
    out.push_str("\n}\n\n");
    out
}

/// The native call expression: class singletons dispatch through
/// `Class::Instance()`, namespace functions are qualified, free functions
/// are called as written.
fn dispatch(sig: &FunctionSignature, args: &[String]) -> String {
    let args = args.join(", ");
    if let Some(class) = &sig.class {
        format!("{}::Instance()->{}({})", class, sig.name, args)
    } else if let Some(ns) = &sig.namespace {
        format!("{}::{}({})", ns, sig.name, args)
    } else {
        format!("{}({})", sig.name, args)
    }
}
