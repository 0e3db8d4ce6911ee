//! Declaration normalization and signature parsing.
//!
//! The input here is one raw declaration string: the lines following a
//! `// LUA_EXPORT` marker, joined up to the first terminator or block-open
//! token. It may still carry an inline body, linkage macros, and trailing
//! qualifiers; normalization strips those before the grammar is applied.

use regex::Regex;

use super::errors::ParseError;
use super::split::split_params;
use super::types::Param;

/// Structural parts of one declaration, before scope context is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeclaration {
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
}

/// Parse one raw exported declaration.
///
/// The enclosing class/namespace and the source path are attached by the
/// caller, which holds the scanner context.
pub fn parse_declaration(raw: &str) -> Result<ParsedDeclaration, ParseError> {
    let normalized = normalize(raw);

    // Optional const, optional Ns:: chain, base type, pointer markers,
    // name, parenthesized parameter list.
    let re = Regex::new(r"^((?:const\s+)?(?:\w+::)*\w+(?:\s*\*)*)\s+(\w+)\s*\((.*)\)$").unwrap();
    let caps = re.captures(&normalized).ok_or_else(|| ParseError::Signature {
        text: normalized.clone(),
    })?;

    let return_type = caps[1].trim().to_string();
    let name = caps[2].to_string();
    let params = parse_params(&name, caps[3].trim())?;

    Ok(ParsedDeclaration {
        return_type,
        name,
        params,
    })
}

/// Strip everything that is not part of the signature shape.
///
/// Order matters: inline body first, then terminator, then linkage macros,
/// then a single trailing `override`/`const` qualifier.
fn normalize(raw: &str) -> String {
    let head = match raw.find('{') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let head = head.trim().trim_end_matches(';').trim();

    // Linkage macros like GAME_API carry no signature information.
    let re_api = Regex::new(r"\b\w+_API\s+").unwrap();
    let head = re_api.replace_all(head, "");

    let re_qualifier = Regex::new(r"\s+(?:override|const)\s*$").unwrap();
    re_qualifier.replace(&head, "").trim().to_string()
}

fn parse_params(function: &str, params_str: &str) -> Result<Vec<Param>, ParseError> {
    if params_str.is_empty() || params_str == "void" {
        return Ok(Vec::new());
    }

    // Type expression, whitespace, identifier.
    let re = Regex::new(r"^(.*\S)\s+(\w+)$").unwrap();

    let mut params = Vec::new();
    for part in split_params(params_str) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        // A default-value suffix is discarded before the type/name split.
        let decl = match part.find('=') {
            Some(pos) => part[..pos].trim_end(),
            None => part,
        };
        let caps = re.captures(decl).ok_or_else(|| ParseError::Parameter {
            function: function.to_string(),
            text: part.to_string(),
        })?;
        params.push(Param::new(caps[1].trim(), &caps[2]));
    }

    Ok(params)
}
