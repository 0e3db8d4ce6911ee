//! Parameter and return-type classification.
//!
//! Classification matches closed sets of canonical type spellings exactly,
//! never by substring containment. Anything outside the sets falls into an
//! explicit `Unclassified` (placeholder) or `UnsupportedRef` (excluding)
//! variant. The supported/excluded decision is made exactly once per
//! function, in [`plan`], and both emitters consume the same result.

use crate::scanner::FunctionSignature;

/// Marshalling strategy for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marshal {
    /// Borrowed C string, read with `luaL_checkstring`
    ConstCharPtr,
    /// `std::string` value or reference, copied out of `luaL_checkstring`
    StdString,
    /// Integer-like scalar, read with `luaL_checkinteger`
    Integer,
    /// `bool`, read with `lua_toboolean`
    Boolean,
    /// `float` or `double`, read with `luaL_checknumber`
    Number,
    /// The connection-config aggregate; consumes four argument slots
    ClientConfig,
    /// Reference to a type with no marshalling rule; excludes the function
    UnsupportedRef,
    /// No rule matched; the wrapper carries a placeholder for this one
    Unclassified,
}

impl Marshal {
    /// Lua argument slots this parameter consumes.
    pub fn slots(&self) -> usize {
        match self {
            Marshal::ClientConfig => 4,
            _ => 1,
        }
    }
}

/// How a declared return type maps onto the Lua stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// Nothing pushed, wrapper returns 0
    Void,
    /// `lua_pushinteger`
    Integer,
    /// `lua_pushboolean`
    Boolean,
    /// `lua_pushnumber`
    Number,
    /// `const char*`, pushed directly
    CString,
    /// `std::string`, pushed via `.c_str()`
    OwnedString,
    /// Composite pushed through the `PushAuthResult` helper
    Auth,
    /// Composite pushed through the `PushSyncResult` helper
    Sync,
    /// No conversion rule; the wrapper carries a placeholder but still
    /// reports one pushed value
    Unhandled,
}

impl ReturnKind {
    /// Values the wrapper reports back to Lua.
    pub fn return_count(&self) -> usize {
        match self {
            ReturnKind::Void => 0,
            _ => 1,
        }
    }
}

/// Canonical integer spellings accepted for integer marshalling.
const INTEGER_TYPES: &[&str] = &[
    "int",
    "long",
    "long long",
    "short",
    "unsigned",
    "unsigned int",
    "unsigned long",
    "unsigned long long",
    "unsigned short",
    "size_t",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
];

/// Classify one parameter type. First match wins.
pub fn classify_param(type_text: &str) -> Marshal {
    let ty = canonicalize(type_text);
    if matches!(ty.as_str(), "const char*" | "char*") {
        return Marshal::ConstCharPtr;
    }
    if matches!(ty.as_str(), "std::string" | "const std::string&" | "std::string&") {
        return Marshal::StdString;
    }
    if INTEGER_TYPES.contains(&ty.as_str()) {
        return Marshal::Integer;
    }
    if ty == "bool" {
        return Marshal::Boolean;
    }
    if ty == "float" || ty == "double" {
        return Marshal::Number;
    }
    if matches!(ty.as_str(), "ClientConfig" | "const ClientConfig&" | "ClientConfig&") {
        return Marshal::ClientConfig;
    }
    // References to anything unrecognized cannot be marshalled without
    // ownership/aliasing rules; they disqualify the whole function.
    if ty.contains('&') {
        return Marshal::UnsupportedRef;
    }
    Marshal::Unclassified
}

/// Classify one declared return type.
pub fn classify_return(type_text: &str) -> ReturnKind {
    let ty = canonicalize(type_text);
    match ty.as_str() {
        "void" => ReturnKind::Void,
        t if INTEGER_TYPES.contains(&t) => ReturnKind::Integer,
        "bool" => ReturnKind::Boolean,
        "float" | "double" => ReturnKind::Number,
        "const char*" => ReturnKind::CString,
        "std::string" => ReturnKind::OwnedString,
        "AuthResult" => ReturnKind::Auth,
        "SyncResult" => ReturnKind::Sync,
        _ => ReturnKind::Unhandled,
    }
}

/// Normalize a type's spelling: collapse whitespace runs, attach `*`/`&`
/// to the type, and drop a `const` qualifier on plain value types (where
/// it cannot change the marshalling).
fn canonicalize(type_text: &str) -> String {
    let collapsed = type_text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut ty = collapsed.replace(" *", "*").replace(" &", "&");
    if !ty.contains('*') && !ty.contains('&') {
        if let Some(stripped) = ty.strip_prefix("const ") {
            ty = stripped.to_string();
        }
    }
    ty
}

/// One function's emission decision, computed once and shared by the
/// wrapper and registration emitters.
#[derive(Debug)]
pub struct FunctionPlan<'a> {
    pub sig: &'a FunctionSignature,
    pub kind: PlanKind,
}

#[derive(Debug)]
pub enum PlanKind {
    /// Emit a wrapper and a registration entry.
    Supported {
        /// Per-parameter strategies, in declaration order
        marshals: Vec<Marshal>,
        ret: ReturnKind,
    },
    /// Emit a skip comment only; the named parameter has no marshalling
    /// rule and the function is left out of the registration table.
    Excluded { param: String, type_text: String },
}

impl FunctionPlan<'_> {
    pub fn is_supported(&self) -> bool {
        matches!(self.kind, PlanKind::Supported { .. })
    }
}

/// Classify every parameter of a signature and partition it.
pub fn plan(sig: &FunctionSignature) -> FunctionPlan<'_> {
    let marshals: Vec<Marshal> = sig
        .params
        .iter()
        .map(|p| classify_param(&p.param_type))
        .collect();

    if let Some(pos) = marshals.iter().position(|m| *m == Marshal::UnsupportedRef) {
        let param = &sig.params[pos];
        return FunctionPlan {
            sig,
            kind: PlanKind::Excluded {
                param: param.name.clone(),
                type_text: param.param_type.clone(),
            },
        };
    }

    FunctionPlan {
        sig,
        kind: PlanKind::Supported {
            marshals,
            ret: classify_return(&sig.return_type),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Param;

    #[test]
    fn test_classify_string_views() {
        assert_eq!(classify_param("const char*"), Marshal::ConstCharPtr);
        assert_eq!(classify_param("const char *"), Marshal::ConstCharPtr);
        assert_eq!(classify_param("char*"), Marshal::ConstCharPtr);
    }

    #[test]
    fn test_classify_owned_strings() {
        assert_eq!(classify_param("std::string"), Marshal::StdString);
        assert_eq!(classify_param("const std::string&"), Marshal::StdString);
        assert_eq!(classify_param("const std::string &"), Marshal::StdString);
    }

    #[test]
    fn test_classify_integers() {
        assert_eq!(classify_param("int"), Marshal::Integer);
        assert_eq!(classify_param("long long"), Marshal::Integer);
        assert_eq!(classify_param("unsigned  int"), Marshal::Integer);
        assert_eq!(classify_param("const int"), Marshal::Integer);
        assert_eq!(classify_param("size_t"), Marshal::Integer);
    }

    #[test]
    fn test_classify_matches_exactly_not_by_containment() {
        // `printer` contains "int" but is not an integer type.
        assert_eq!(classify_param("printer"), Marshal::Unclassified);
        assert_eq!(classify_param("longitude"), Marshal::Unclassified);
        assert_eq!(classify_param("floater"), Marshal::Unclassified);
    }

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify_param("bool"), Marshal::Boolean);
        assert_eq!(classify_param("float"), Marshal::Number);
        assert_eq!(classify_param("double"), Marshal::Number);
    }

    #[test]
    fn test_classify_config_aggregate() {
        assert_eq!(classify_param("ClientConfig"), Marshal::ClientConfig);
        assert_eq!(classify_param("const ClientConfig&"), Marshal::ClientConfig);
        assert_eq!(Marshal::ClientConfig.slots(), 4);
    }

    #[test]
    fn test_classify_unknown_reference_is_unsupported() {
        assert_eq!(classify_param("const Session&"), Marshal::UnsupportedRef);
        assert_eq!(classify_param("std::vector<int>&"), Marshal::UnsupportedRef);
    }

    #[test]
    fn test_classify_unknown_value_is_unclassified() {
        assert_eq!(classify_param("Session"), Marshal::Unclassified);
        assert_eq!(classify_param("std::vector<int>"), Marshal::Unclassified);
    }

    #[test]
    fn test_classify_returns() {
        assert_eq!(classify_return("void"), ReturnKind::Void);
        assert_eq!(classify_return("long long"), ReturnKind::Integer);
        assert_eq!(classify_return("bool"), ReturnKind::Boolean);
        assert_eq!(classify_return("double"), ReturnKind::Number);
        assert_eq!(classify_return("const char*"), ReturnKind::CString);
        assert_eq!(classify_return("std::string"), ReturnKind::OwnedString);
        assert_eq!(classify_return("AuthResult"), ReturnKind::Auth);
        assert_eq!(classify_return("SyncResult"), ReturnKind::Sync);
        assert_eq!(classify_return("Session"), ReturnKind::Unhandled);
        assert_eq!(ReturnKind::Void.return_count(), 0);
        assert_eq!(ReturnKind::Sync.return_count(), 1);
    }

    #[test]
    fn test_plan_excludes_on_any_unsupported_reference() {
        let sig = FunctionSignature::new("void", "Attach")
            .with_param(Param::new("int", "id"))
            .with_param(Param::new("const Session&", "session"));

        let plan = plan(&sig);
        match &plan.kind {
            PlanKind::Excluded { param, type_text } => {
                assert_eq!(param, "session");
                assert_eq!(type_text, "const Session&");
            }
            other => panic!("expected exclusion, got {other:?}"),
        }
        assert!(!plan.is_supported());
    }

    #[test]
    fn test_plan_supported_keeps_parameter_order() {
        let sig = FunctionSignature::new("int", "Mix")
            .with_param(Param::new("const char*", "tag"))
            .with_param(Param::new("ClientConfig", "config"))
            .with_param(Param::new("bool", "flag"));

        match plan(&sig).kind {
            PlanKind::Supported { ref marshals, ret } => {
                assert_eq!(
                    marshals,
                    &[Marshal::ConstCharPtr, Marshal::ClientConfig, Marshal::Boolean]
                );
                assert_eq!(ret, ReturnKind::Integer);
            }
            ref other => panic!("expected supported plan, got {other:?}"),
        }
    }
}
