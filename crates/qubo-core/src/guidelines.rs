//! Guideline validation: the three-point structural check that gates
//! whether a solver may be shared
//!
//! 1. **Entry point**: a block-opening `def solve(...)` header exists
//! 2. **Return statement**: the keyword `return` appears from that header on
//! 3. **Nested functions**: no second definition header appears from that
//!    header on (nested or sibling, both count)
//!
//! Total: every input yields a verdict, nothing is ever raised.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::scanner::contains_word;
use crate::parser::{definitions, find_entry_block};

/// Guideline checklist, keyed the way the upload form renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineValidation {
    pub entry_point: bool,
    pub return_statement: bool,
    /// True means no violation was found
    pub nested_functions: bool,
}

impl Default for GuidelineValidation {
    fn default() -> Self {
        Self {
            entry_point: false,
            return_statement: false,
            nested_functions: true,
        }
    }
}

impl GuidelineValidation {
    /// All three checks pass; the share action is gated on this
    pub fn all_passed(&self) -> bool {
        self.entry_point && self.return_statement && self.nested_functions
    }

    /// Checklist items in display order, with their verdicts
    pub fn checks(&self) -> [(GuidelineCheck, bool); 3] {
        [
            (GuidelineCheck::EntryPoint, self.entry_point),
            (GuidelineCheck::ReturnStatement, self.return_statement),
            (GuidelineCheck::NestedFunctions, self.nested_functions),
        ]
    }

    pub fn failed_checks(&self) -> Vec<GuidelineCheck> {
        self.checks()
            .into_iter()
            .filter(|(_, passed)| !passed)
            .map(|(check, _)| check)
            .collect()
    }
}

/// One item of the guideline checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuidelineCheck {
    EntryPoint,
    ReturnStatement,
    NestedFunctions,
}

impl GuidelineCheck {
    pub fn key(&self) -> &'static str {
        match self {
            GuidelineCheck::EntryPoint => "entryPoint",
            GuidelineCheck::ReturnStatement => "returnStatement",
            GuidelineCheck::NestedFunctions => "nestedFunctions",
        }
    }

    /// Human-readable requirement, as shown next to the checkbox
    pub fn requirement(&self, entry_point: &str) -> String {
        match self {
            GuidelineCheck::EntryPoint => {
                format!("Defines a `{}` function as the main entry point", entry_point)
            }
            GuidelineCheck::ReturnStatement => {
                format!("`{}` returns its results with a return statement", entry_point)
            }
            GuidelineCheck::NestedFunctions => format!(
                "No other function definitions after `{}` (nested or top-level)",
                entry_point
            ),
        }
    }
}

impl std::fmt::Display for GuidelineCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Run the checklist against `text` with entry point `entry_point`
pub(crate) fn validate(text: &str, entry_point: &str) -> GuidelineValidation {
    let mut validation = GuidelineValidation::default();

    let Some(header) = find_entry_block(text, entry_point) else {
        debug!(entry_point, "guidelines: no entry point");
        return validation;
    };
    validation.entry_point = true;

    let region = &text[header.start..];
    validation.return_statement = contains_word(region, "return");

    let defined = definitions(region).filter(|h| h.opens_block).count();
    if defined > 1 {
        validation.nested_functions = false;
    }

    debug!(
        entry_point,
        return_statement = validation.return_statement,
        definitions = defined,
        "guidelines checked"
    );
    validation
}
