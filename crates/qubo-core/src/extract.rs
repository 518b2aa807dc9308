//! Parameter extraction: inputs from the entry point signature, outputs
//! from its first return expression
//!
//! # Inputs
//!
//! The raw parameter list is split on every comma (parameter lists are flat),
//! then each fragment is split once on `=` (default value) and once on `:`
//! (type annotation).
//!
//! # Outputs
//!
//! Everything after the entry point header is the body region. Block strings
//! and line comments are stripped, the first `return` carrying an expression
//! is located, one outer pair of parentheses is removed, and the expression
//! is split on top-level commas.

use tracing::{debug, error, warn};

use crate::analyzer::{AnalyzerOptions, Diagnostic, Extraction};
use crate::parser::scanner::{
    find_keyword, logical_line_end, matching_close, split_top_level, strip_block_strings,
    strip_line_comments, strip_outer_parens,
};
use crate::parser::{self, DefHeader};
use crate::Parameter;

// ── Inputs ────────────────────────────────────────────────

/// Extract the entry point's declared input parameters
pub(crate) fn inputs(text: &str, options: &AnalyzerOptions) -> Extraction {
    let Some(header) = locate(text, options) else {
        return missing_entry_point(options);
    };

    let parameters: Vec<Parameter> = header
        .params
        .split(',')
        .filter_map(parse_input)
        .collect();

    debug!(
        entry_point = %options.entry_point,
        count = parameters.len(),
        "extracted input parameters"
    );
    Extraction::found(parameters)
}

/// `name[: type][= default]` → Parameter; `None` when the name is empty
fn parse_input(fragment: &str) -> Option<Parameter> {
    let (name_and_type, default_value) = match fragment.split_once('=') {
        Some((left, right)) => (left.trim(), Some(right.trim())),
        None => (fragment.trim(), None),
    };
    let (name, param_type) = match name_and_type.split_once(':') {
        Some((name, ty)) => (name.trim(), Some(ty.trim())),
        None => (name_and_type, None),
    };

    if name.is_empty() {
        return None;
    }

    Some(Parameter::input(
        name,
        param_type,
        default_value.filter(|value| !value.is_empty()),
    ))
}

// ── Outputs ───────────────────────────────────────────────

/// Extract the entry point's declared outputs from its first return
pub(crate) fn outputs(text: &str, options: &AnalyzerOptions) -> Extraction {
    let Some(header) = locate(text, options) else {
        return missing_entry_point(options);
    };

    let body = strip_line_comments(&strip_block_strings(&text[header.end..]));

    let Some(expression) = first_return_expression(&body) else {
        warn!(
            entry_point = %options.entry_point,
            line = header.span.line,
            "no return statement found in entry point"
        );
        return Extraction::missing(Diagnostic::missing_return(&options.entry_point));
    };

    let expression = strip_outer_parens(expression);
    let names = match dict_keys(expression) {
        Some(keys) if options.dict_keys_as_outputs => keys,
        _ => split_top_level(expression),
    };

    let parameters: Vec<Parameter> = names.into_iter().map(Parameter::output).collect();
    debug!(
        entry_point = %options.entry_point,
        count = parameters.len(),
        "extracted output parameters"
    );
    Extraction::found(parameters)
}

/// Expression of the first `return` keyword that carries one, up to the end
/// of its logical line. A bare `return` is skipped, and so is the word inside
/// a string literal.
fn first_return_expression(body: &str) -> Option<&str> {
    let mut cursor = 0;
    while let Some(start) = find_keyword(body, "return", cursor) {
        let expr_start = start + "return".len();
        let expression = body[expr_start..logical_line_end(body, expr_start)].trim();
        if !expression.is_empty() {
            return Some(expression);
        }
        cursor = expr_start;
    }
    None
}

/// Top-level keys of a `{key: value, ...}` literal, quotes removed.
///
/// `None` unless the whole expression is one dict literal.
fn dict_keys(expression: &str) -> Option<Vec<String>> {
    if !expression.starts_with('{') || matching_close(expression, 0) != Some(expression.len() - 1)
    {
        return None;
    }

    let keys = split_top_level(&expression[1..expression.len() - 1])
        .into_iter()
        .map(|entry| {
            let key = match split_top_level_colon(&entry) {
                Some(colon) => entry[..colon].trim(),
                None => entry.as_str(),
            };
            unquote(key).to_string()
        })
        .filter(|key| !key.is_empty())
        .collect();
    Some(keys)
}

/// First `:` outside brackets and strings
fn split_top_level_colon(entry: &str) -> Option<usize> {
    let bytes = entry.as_bytes();
    let mut depth: i32 = 0;
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate() {
        match (quote, b) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'(' | b'[' | b'{') => depth += 1,
            (None, b')' | b']' | b'}') => depth -= 1,
            (None, b':') if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn unquote(key: &str) -> &str {
    let key = key.trim();
    let key = key
        .strip_prefix('"')
        .or_else(|| key.strip_prefix('\''))
        .unwrap_or(key);
    key.strip_suffix('"')
        .or_else(|| key.strip_suffix('\''))
        .unwrap_or(key)
}

// ── Shared ────────────────────────────────────────────────

fn locate<'a>(text: &'a str, options: &AnalyzerOptions) -> Option<DefHeader<'a>> {
    parser::find_entry_point(text, &options.entry_point)
}

fn missing_entry_point(options: &AnalyzerOptions) -> Extraction {
    error!(entry_point = %options.entry_point, "no entry point function found");
    Extraction::missing(Diagnostic::missing_entry_point(&options.entry_point))
}
