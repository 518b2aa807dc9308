//! JavaScript/TypeScript bindings for the QUBO solver contract analyzer
//!
//! Thin wrapper around `qubo-core` compiled to WebAssembly.
//! No logic lives here. Every export delegates to `qubo-core`.
//!
//! Every function returns a JSON string. A missing entry point or return is
//! reported inside that JSON (`diagnostic` / `diagnostics`), never thrown, so
//! the upload form decides how to surface it.

use wasm_bindgen::prelude::*;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Extract the input parameters of `solve`.
///
/// @param text - solver script source
/// @returns JSON string: { parameters: Parameter[], diagnostic: Diagnostic | null }
#[wasm_bindgen(js_name = "extractInputs")]
pub fn extract_inputs(text: &str) -> Result<String, JsError> {
    to_json(&qubo_core::extract_inputs(text))
}

/// Extract the outputs named by the first return statement of `solve`.
///
/// @param text - solver script source
/// @returns JSON string: { parameters: Parameter[], diagnostic: Diagnostic | null }
#[wasm_bindgen(js_name = "extractOutputs")]
pub fn extract_outputs(text: &str) -> Result<String, JsError> {
    to_json(&qubo_core::extract_outputs(text))
}

/// Check the upload guidelines.
///
/// @param text - solver script source
/// @returns JSON string: { entryPoint, returnStatement, nestedFunctions }
#[wasm_bindgen(js_name = "validateGuidelines")]
pub fn validate_guidelines(text: &str) -> Result<String, JsError> {
    to_json(&qubo_core::validate_guidelines(text))
}

/// Full analysis of a solver script.
///
/// @param text - solver script source
/// @param entryPoint - entry point name, `solve` when omitted
/// @returns JSON string with inputs, outputs, guidelines, fingerprint and diagnostics
#[wasm_bindgen]
pub fn analyze(text: &str, entry_point: Option<String>) -> Result<String, JsError> {
    let mut options = qubo_core::AnalyzerOptions::default();
    if let Some(name) = entry_point {
        options.entry_point = name;
    }
    to_json(&qubo_core::Analyzer::new(options).analyze(text))
}
