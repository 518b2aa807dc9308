//! Solver contract analyzer: runs extraction and guideline validation over
//! one script text and accumulates diagnostics
//!
//! # Architecture
//!
//! The three analyses are independent pure functions of the same text:
//!
//! ```text
//! text ─┬─ signature ──────────────────────────────────────→ inputs
//!       ├─ body → strip strings/comments → first return → split → outputs
//!       └─ header + body scan ─────────────────────────────→ guidelines
//! ```
//!
//! Missing entry point and missing return are not errors here. They are
//! reported as [`Diagnostic`]s next to an empty parameter list, and the
//! caller decides how to surface them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::guidelines::{self, GuidelineValidation};
use crate::{extract, fingerprint, Parameter};

/// Default entry point name every solver script must define
pub const DEFAULT_ENTRY_POINT: &str = "solve";

// ── Diagnostics ───────────────────────────────────────────

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Category of analysis issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingEntryPoint,
    MissingReturn,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DiagnosticKind::MissingEntryPoint => write!(f, "entry-point"),
            DiagnosticKind::MissingReturn => write!(f, "return"),
        }
    }
}

/// A single analysis diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Entry point the analysis looked for
    pub entry_point: String,
    pub message: String,
}

impl Diagnostic {
    pub fn missing_entry_point(entry_point: &str) -> Self {
        Self::new(Severity::Error, DiagnosticKind::MissingEntryPoint, entry_point)
    }

    pub fn missing_return(entry_point: &str) -> Self {
        Self::new(Severity::Warning, DiagnosticKind::MissingReturn, entry_point)
    }

    fn new(severity: Severity, kind: DiagnosticKind, entry_point: &str) -> Self {
        let mut diagnostic = Diagnostic {
            severity,
            kind,
            entry_point: entry_point.to_string(),
            message: String::new(),
        };
        diagnostic.message = diagnostic.to_error().to_string();
        diagnostic
    }

    /// The condition as an [`Error`]
    pub fn to_error(&self) -> Error {
        let name = self.entry_point.clone();
        match self.kind {
            DiagnosticKind::MissingEntryPoint => Error::MissingEntryPoint { name },
            DiagnosticKind::MissingReturn => Error::MissingReturn { name },
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{} [{}]: {}", prefix, self.kind, self.message)
    }
}

// ── Extraction ────────────────────────────────────────────

/// Parameters extracted from a script, plus the reason the list is empty
/// when extraction could not proceed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub parameters: Vec<Parameter>,
    pub diagnostic: Option<Diagnostic>,
}

impl Extraction {
    pub(crate) fn found(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters,
            diagnostic: None,
        }
    }

    pub(crate) fn missing(diagnostic: Diagnostic) -> Self {
        Self {
            parameters: Vec::new(),
            diagnostic: Some(diagnostic),
        }
    }

    /// The parameters, or the condition that prevented extraction
    pub fn into_result(self) -> Result<Vec<Parameter>> {
        match self.diagnostic {
            None => Ok(self.parameters),
            Some(diagnostic) => Err(diagnostic.to_error()),
        }
    }
}

// ── Analyzer ──────────────────────────────────────────────

/// Analyzer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Name of the function every solver must define
    pub entry_point: String,
    /// Report the keys of a returned dict literal as the outputs instead of
    /// the literal itself
    pub dict_keys_as_outputs: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            dict_keys_as_outputs: false,
        }
    }
}

/// Stateless solver contract analyzer
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Input parameters declared by the entry point signature
    pub fn extract_inputs(&self, text: &str) -> Extraction {
        extract::inputs(text, &self.options)
    }

    /// Outputs named by the entry point's first return expression
    pub fn extract_outputs(&self, text: &str) -> Extraction {
        extract::outputs(text, &self.options)
    }

    pub fn validate_guidelines(&self, text: &str) -> GuidelineValidation {
        guidelines::validate(text, &self.options.entry_point)
    }

    /// Run every analysis over `text`.
    ///
    /// A missing entry point is reported once even though both extractions
    /// detect it.
    pub fn analyze(&self, text: &str) -> Analysis {
        let inputs = self.extract_inputs(text);
        let outputs = self.extract_outputs(text);
        let guidelines = self.validate_guidelines(text);

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        for diagnostic in [inputs.diagnostic, outputs.diagnostic]
            .into_iter()
            .flatten()
        {
            if !diagnostics.contains(&diagnostic) {
                diagnostics.push(diagnostic);
            }
        }

        Analysis {
            fingerprint: fingerprint::fingerprint(text),
            entry_point: self.options.entry_point.clone(),
            inputs: inputs.parameters,
            outputs: outputs.parameters,
            publishable: guidelines.all_passed(),
            guidelines,
            diagnostics,
        }
    }
}

/// Everything the upload form needs to know about one script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// SHA-256 of the analyzed text, used to drop a stale analysis
    pub fingerprint: String,
    pub entry_point: String,
    pub inputs: Vec<Parameter>,
    pub outputs: Vec<Parameter>,
    pub guidelines: GuidelineValidation,
    pub publishable: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// True when every guideline passes
    pub fn is_publishable(&self) -> bool {
        self.publishable
    }

    /// True when this analysis was computed from exactly `text`
    pub fn is_current_for(&self, text: &str) -> bool {
        self.fingerprint == fingerprint::fingerprint(text)
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMULATED_ANNEALING: &str = r#"# Simulated Annealing Algorithm Implementation
import numpy as np
import time

def solve(qubo_matrix, constant, initial_temperature=1000,
          cooling_rate=0.99, max_iterations=1000):
    """
    Implements Simulated Annealing for QUBO optimization.
    """
    num_vars = qubo_matrix.shape[0]
    current_solution = np.random.randint(0, 2, num_vars)
    # ... rest of implementation
    return best_solution, best_cost, costs_per_iteration, elapsed_time
"#;

    fn names(parameters: &[Parameter]) -> Vec<&str> {
        parameters.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_analyze_example_solver() {
        let analysis = Analyzer::default().analyze(SIMULATED_ANNEALING);
        assert_eq!(
            names(&analysis.inputs),
            vec![
                "qubo_matrix",
                "constant",
                "initial_temperature",
                "cooling_rate",
                "max_iterations"
            ]
        );
        assert_eq!(analysis.inputs[3].default_value.as_deref(), Some("0.99"));
        assert_eq!(
            names(&analysis.outputs),
            vec![
                "best_solution",
                "best_cost",
                "costs_per_iteration",
                "elapsed_time"
            ]
        );
        assert!(analysis.is_publishable());
        assert!(analysis.diagnostics.is_empty());
        assert_eq!(analysis.fingerprint.len(), 64);
    }

    #[test]
    fn test_missing_entry_point_reported_once() {
        let analysis = Analyzer::default().analyze("def helper(x):\n    return x\n");
        assert_eq!(analysis.errors().len(), 1);
        assert_eq!(analysis.errors()[0].kind, DiagnosticKind::MissingEntryPoint);
        assert!(analysis.warnings().is_empty());
        assert!(!analysis.is_publishable());
    }

    #[test]
    fn test_missing_return_is_warning() {
        let analysis = Analyzer::default().analyze("def solve(q):\n    print(q)\n");
        assert!(analysis.errors().is_empty());
        assert_eq!(analysis.warnings().len(), 1);
        assert_eq!(analysis.warnings()[0].kind, DiagnosticKind::MissingReturn);
        assert_eq!(names(&analysis.inputs), vec!["q"]);
        assert!(analysis.outputs.is_empty());
        assert!(!analysis.is_publishable());
    }

    #[test]
    fn test_into_result() {
        let analyzer = Analyzer::default();
        let ok = analyzer.extract_inputs("def solve(a):\n").into_result();
        assert_eq!(ok.unwrap().len(), 1);

        let missing = analyzer.extract_outputs("x = 1").into_result();
        assert_eq!(
            missing.unwrap_err(),
            Error::MissingEntryPoint {
                name: "solve".into()
            }
        );

        let no_return = analyzer
            .extract_outputs("def solve(a):\n    pass\n")
            .into_result();
        assert!(matches!(no_return, Err(Error::MissingReturn { .. })));
    }

    #[test]
    fn test_into_result_names_configured_entry_point() {
        let analyzer = Analyzer::new(AnalyzerOptions {
            entry_point: "optimize".into(),
            ..AnalyzerOptions::default()
        });
        let err = analyzer
            .extract_inputs("def solve(a):\n    return a\n")
            .into_result()
            .unwrap_err();
        assert_eq!(
            err,
            Error::MissingEntryPoint {
                name: "optimize".into()
            }
        );
        assert_eq!(err.to_string(), "No `optimize` function found in the file");
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::missing_return("solve");
        assert_eq!(
            diagnostic.to_string(),
            "warning [return]: No `return` statement found in the `solve` function"
        );
        let diagnostic = Diagnostic::missing_entry_point("solve");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.to_string().starts_with("error [entry-point]: "));
    }

    #[test]
    fn test_stale_analysis_detection() {
        let analysis = Analyzer::default().analyze(SIMULATED_ANNEALING);
        assert!(analysis.is_current_for(SIMULATED_ANNEALING));
        assert!(!analysis.is_current_for("def solve(q):\n    return q\n"));
    }

    #[test]
    fn test_analysis_json_shape() {
        let analysis = Analyzer::default().analyze("def solve(a: int = 3):\n    return a\n");
        let json: serde_json::Value = serde_json::from_str(&analysis.to_json().unwrap()).unwrap();
        assert_eq!(json["inputs"][0]["name"], "a");
        assert_eq!(json["inputs"][0]["type"], "int");
        assert_eq!(json["inputs"][0]["default_value"], "3");
        assert_eq!(json["inputs"][0]["description"], "");
        assert!(json["outputs"][0].get("default_value").is_none());
        assert_eq!(json["guidelines"]["entryPoint"], true);
        assert_eq!(json["guidelines"]["nestedFunctions"], true);
        assert_eq!(json["publishable"], true);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: AnalyzerOptions =
            serde_json::from_str(r#"{"dict_keys_as_outputs": true}"#).unwrap();
        assert_eq!(options.entry_point, "solve");
        assert!(options.dict_keys_as_outputs);
    }
}
