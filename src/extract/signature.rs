//! Decomposition of `name(args)` text into a name and parameter list

use crate::extract::Diagnostics;
use crate::model::{CallableDescriptor, Parameter};
use crate::SoftParseError;
use regex::Regex;
use std::sync::LazyLock;

static SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w$.]+)\s*\((.*)\)$").unwrap());

/// A successfully decomposed callable signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

/// Parses `identifier(type name, ...)` text
///
/// Expects generics to have been stripped already: commas are split at face
/// value. Each argument is split on its last whitespace into type and name;
/// a single-token argument becomes a parameter without a name.
///
/// # Examples
///
/// ```
/// use javadoc_harvest::parse_signature;
///
/// let signature = parse_signature("put(Object key, Object value)").unwrap();
/// assert_eq!(signature.name, "put");
/// assert_eq!(signature.parameters.len(), 2);
/// assert_eq!(signature.parameters[1].name.as_deref(), Some("value"));
///
/// assert!(parse_signature("malformedNoParens").is_err());
/// ```
pub fn parse_signature(text: &str) -> Result<Signature, SoftParseError> {
    let text = text.trim();
    let malformed = || SoftParseError::Signature {
        text: text.to_string(),
    };

    let captures = SIGNATURE_RE.captures(text).ok_or_else(malformed)?;
    let name = captures[1].to_string();
    let args = captures[2].trim();

    if args.is_empty() {
        return Ok(Signature {
            name,
            parameters: Vec::new(),
        });
    }

    let parameters = args
        .split(',')
        .map(|arg| parse_parameter(arg).ok_or_else(malformed))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Signature { name, parameters })
}

fn parse_parameter(arg: &str) -> Option<Parameter> {
    let arg = arg.trim();
    if arg.is_empty() {
        return None;
    }

    match arg.rsplit_once(char::is_whitespace) {
        Some((param_type, name)) => Some(Parameter::new(param_type.trim_end(), Some(name))),
        None => Some(Parameter::new(arg, None)),
    }
}

/// Applies [`parse_signature`] to a constructor or method row
///
/// On failure the row keeps its original name, gets no `parameters`, and the
/// soft error is recorded.
pub fn decompose(mut callable: CallableDescriptor, diagnostics: &mut Diagnostics) -> CallableDescriptor {
    match parse_signature(&callable.name) {
        Ok(signature) => {
            callable.name = signature.name;
            callable.parameters = Some(signature.parameters);
        }
        Err(e) => {
            diagnostics.record(e);
            callable.parameters = None;
        }
    }
    callable
}
