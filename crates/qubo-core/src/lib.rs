//! QUBO Core - Static analyzer for uploaded QUBO solver scripts
//!
//! Before a solver script can be shared, the upload form needs to know what
//! it takes, what it returns, and whether it follows the solver guidelines.
//! This crate answers all three from the script text alone; it never runs the
//! script.
//!
//! # Architecture
//!
//! ```text
//! Script Text → Parser (def headers, scanner) ─┬→ Extract → inputs / outputs
//!                                              └→ Guidelines → checklist
//!                              ↓
//!                           Analyzer → Analysis + Diagnostics + Fingerprint
//! ```
//!
//! # Guarantees
//!
//! - **Pure**: same text always produces an identical analysis
//! - **Total**: every text yields a result; nothing panics or raises
//! - **Soft failures**: a missing entry point or return is a diagnostic,
//!   never an error that aborts the caller

pub mod analyzer;
pub mod error;
mod extract;
pub mod fingerprint;
pub mod guidelines;
pub mod parser;

pub use analyzer::{
    Analysis, Analyzer, AnalyzerOptions, Diagnostic, DiagnosticKind, Extraction, Severity,
    DEFAULT_ENTRY_POINT,
};
pub use error::{Error, Result};
pub use fingerprint::fingerprint;
pub use guidelines::{GuidelineCheck, GuidelineValidation};

use serde::{Deserialize, Serialize};

/// Type reported when the source carries no annotation
pub const ANY_TYPE: &str = "any";

/// One input or output of a candidate solver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    /// Filled in later by the uploader; always empty from the analyzer
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Parameter {
    /// Input parameter; an absent or empty annotation becomes `any`
    pub fn input(name: &str, param_type: Option<&str>, default_value: Option<&str>) -> Self {
        Parameter {
            name: name.to_string(),
            param_type: param_type
                .filter(|ty| !ty.is_empty())
                .unwrap_or(ANY_TYPE)
                .to_string(),
            description: String::new(),
            default_value: default_value.map(str::to_string),
        }
    }

    /// Output parameter named by its return expression
    pub fn output(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            param_type: ANY_TYPE.to_string(),
            description: String::new(),
            default_value: None,
        }
    }
}

/// Input parameters of the `solve` entry point
pub fn extract_inputs(text: &str) -> Extraction {
    Analyzer::default().extract_inputs(text)
}

/// Outputs of the `solve` entry point's first return expression
pub fn extract_outputs(text: &str) -> Extraction {
    Analyzer::default().extract_outputs(text)
}

/// Guideline checklist for a `solve` solver
pub fn validate_guidelines(text: &str) -> GuidelineValidation {
    Analyzer::default().validate_guidelines(text)
}

/// Full analysis with default options
pub fn analyze(text: &str) -> Analysis {
    Analyzer::default().analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(extraction: &Extraction) -> Vec<&str> {
        extraction
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    // ── Signature extraction ───────────────────────────

    #[test]
    fn test_inputs_typed_and_defaulted() {
        let text = "import numpy as np\n\ndef solve(a, b: int, c: float = 1.0):\n    return a\n";
        let inputs = extract_inputs(text);
        assert_eq!(
            inputs.parameters,
            vec![
                Parameter {
                    name: "a".into(),
                    param_type: "any".into(),
                    description: String::new(),
                    default_value: None,
                },
                Parameter {
                    name: "b".into(),
                    param_type: "int".into(),
                    description: String::new(),
                    default_value: None,
                },
                Parameter {
                    name: "c".into(),
                    param_type: "float".into(),
                    description: String::new(),
                    default_value: Some("1.0".into()),
                },
            ]
        );
    }

    #[test]
    fn test_empty_signature_has_no_inputs() {
        let inputs = extract_inputs("def solve():\n    return 42\n");
        assert!(inputs.parameters.is_empty());
        assert!(inputs.diagnostic.is_none());
    }

    #[test]
    fn test_names_never_blank() {
        let inputs = extract_inputs("def solve( , a,  ,b , ):\n    return a\n");
        assert_eq!(names(&inputs), vec!["a", "b"]);
        assert!(inputs
            .parameters
            .iter()
            .all(|p| !p.name.trim().is_empty() && !p.param_type.is_empty()));
    }

    // ── Return extraction ──────────────────────────────

    #[test]
    fn test_nested_pair_is_one_output() {
        let outputs = extract_outputs("def solve(q):\n    return x, (y, z), w\n");
        assert_eq!(names(&outputs), vec!["x", "(y, z)", "w"]);
        assert!(outputs
            .parameters
            .iter()
            .all(|p| p.param_type == "any" && p.default_value.is_none()));
    }

    #[test]
    fn test_comments_and_docstrings_do_not_change_outputs() {
        let plain = "def solve(q):\n    s = q\n    return s, cost\n";
        let commented = "def solve(q):\n    # return wrong, ones\n    s = q\n    return s, cost\n";
        let documented =
            "def solve(q):\n    '''\n    return docs\n    '''\n    s = q\n    \"\"\"return more_docs\"\"\"\n    return s, cost\n";

        let expected = extract_outputs(plain);
        assert_eq!(names(&expected), vec!["s", "cost"]);
        assert_eq!(extract_outputs(commented), expected);
        assert_eq!(extract_outputs(documented), expected);
    }

    // ── Guidelines ─────────────────────────────────────

    #[test]
    fn test_guidelines_flip_on_second_definition() {
        let compliant = "def solve(q):\n    return q\n";
        assert_eq!(
            validate_guidelines(compliant),
            GuidelineValidation {
                entry_point: true,
                return_statement: true,
                nested_functions: true,
            }
        );

        let with_helper = format!("{}\ndef helper(x):\n    return x\n", compliant);
        assert!(!validate_guidelines(&with_helper).nested_functions);
    }

    // ── Boundaries ─────────────────────────────────────

    #[test]
    fn test_no_definitions_at_all() {
        let text = "x = 1\ny = [x, 2]\nprint(y)\n";
        assert!(extract_inputs(text).parameters.is_empty());
        assert!(extract_outputs(text).parameters.is_empty());
        assert_eq!(
            validate_guidelines(text),
            GuidelineValidation {
                entry_point: false,
                return_statement: false,
                nested_functions: true,
            }
        );
    }

    #[test]
    fn test_hostile_inputs_are_total() {
        for text in [
            "",
            "def",
            "def solve(",
            "def solve)",
            "def solve(a, b):\n    return ((((",
            "def solve(a):\n    return )))], x",
            "\u{0}\u{1}\u{fffd}def solve(é):\n    return 'ü, ß'",
            "def solve(a):\n    return \"unterminated, x",
            "def solve(a):\n    return x \\",
        ] {
            let analysis = analyze(text);
            assert!(analysis.inputs.iter().all(|p| !p.name.trim().is_empty()));
            assert!(analysis.outputs.iter().all(|p| !p.name.trim().is_empty()));
        }
    }

    // ── Scaling ────────────────────────────────────────

    fn solver_with_helpers(helpers: usize) -> String {
        let mut text = String::from("def solve(q):\n    return q\n");
        for i in 0..helpers {
            text.push_str(&format!("def helper_{}(x, y=1):\n    return x\n", i));
        }
        text
    }

    /// Best of three runs, to damp scheduler noise
    fn fastest_analysis(text: &str) -> std::time::Duration {
        (0..3)
            .map(|_| {
                let start = std::time::Instant::now();
                let analysis = analyze(text);
                assert!(!analysis.guidelines.nested_functions);
                start.elapsed()
            })
            .min()
            .unwrap()
    }

    #[test]
    fn test_analysis_time_grows_linearly() {
        let small = fastest_analysis(&solver_with_helpers(10_000));
        let large = fastest_analysis(&solver_with_helpers(80_000));
        // 8x the input; quadratic behavior would cost about 64x
        assert!(
            large < small * 32,
            "8x input took {:?} vs {:?}",
            large,
            small
        );
    }

    // ── Determinism proof ──────────────────────────────

    #[test]
    fn test_determinism_100_iterations() {
        let text = "def solve(q, n: int = 3):\n    \"\"\"doc\"\"\"\n    return q, [n, {'a': (1, 2)}]\n";
        let first = analyze(text);
        for i in 0..100 {
            let result = analyze(text);
            assert_eq!(first, result, "Non-determinism at iteration {}", i);
        }
    }

    #[test]
    fn test_parameter_serialization() {
        let parameter = Parameter::input("c", Some("float"), Some("1.0"));
        let json = serde_json::to_string(&parameter).unwrap();
        let deserialized: Parameter = serde_json::from_str(&json).unwrap();
        assert_eq!(parameter, deserialized);
        assert!(json.contains("\"type\":\"float\""));
    }
}
