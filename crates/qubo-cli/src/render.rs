//! Human and JSON rendering of analyzer results

use colored::Colorize;
use qubo_core::{Analysis, Diagnostic, Extraction, GuidelineValidation, Parameter, Severity};
use serde_json::json;

/// Stdout writer that honors `--quiet`
pub struct Printer {
    quiet: bool,
}

impl Printer {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn line(&self, text: impl std::fmt::Display) {
        if !self.quiet {
            println!("{}", text);
        }
    }

    pub fn json(&self, value: &serde_json::Value) -> anyhow::Result<()> {
        if !self.quiet {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }
}

/// Diagnostics always go to stderr
pub fn diagnostics<'a>(items: impl IntoIterator<Item = &'a Diagnostic>) {
    for diagnostic in items {
        let line = diagnostic.to_string();
        match diagnostic.severity {
            Severity::Error => eprintln!("{}", line.red()),
            Severity::Warning => eprintln!("{}", line.yellow()),
        }
    }
}

pub fn extraction_json(entry_point: &str, extraction: &Extraction) -> serde_json::Value {
    json!({
        "entry_point": entry_point,
        "parameters": extraction.parameters,
        "diagnostic": extraction.diagnostic,
    })
}

pub fn parameters(printer: &Printer, title: &str, parameters: &[Parameter]) {
    printer.line(format!("{} ({})", title.bold(), parameters.len()));
    if parameters.is_empty() {
        printer.line("  (none)".dimmed());
        return;
    }

    let name_width = parameters.iter().map(|p| p.name.len()).max().unwrap_or(0);
    let type_width = parameters
        .iter()
        .map(|p| p.param_type.len())
        .max()
        .unwrap_or(0);

    for parameter in parameters {
        let mut row = format!(
            "  {:<name_width$}  {:<type_width$}",
            parameter.name,
            parameter.param_type,
            name_width = name_width,
            type_width = type_width
        );
        if let Some(ref default) = parameter.default_value {
            row.push_str(&format!("  = {}", default));
        }
        printer.line(row.trim_end());
    }
}

pub fn validation_json(entry_point: &str, validation: &GuidelineValidation) -> serde_json::Value {
    let failed: Vec<&str> = validation
        .failed_checks()
        .iter()
        .map(|check| check.key())
        .collect();
    json!({
        "valid": validation.all_passed(),
        "entry_point": entry_point,
        "guidelines": validation,
        "failed": failed,
    })
}

pub fn checklist(printer: &Printer, entry_point: &str, validation: &GuidelineValidation) {
    printer.line("guidelines".bold());
    for (check, passed) in validation.checks() {
        let mark = if passed {
            "✓".green()
        } else {
            "✗".red()
        };
        printer.line(format!("  {} {}", mark, check.requirement(entry_point)));
    }
}

pub fn verdict(printer: &Printer, publishable: bool) {
    if publishable {
        printer.line("✓ ready to share".green().bold());
    } else {
        printer.line("✗ not ready to share".red().bold());
    }
}

pub fn analysis(printer: &Printer, analysis: &Analysis) {
    printer.line(format!("{} {}", "fingerprint".bold(), analysis.fingerprint));
    parameters(printer, "inputs", &analysis.inputs);
    parameters(printer, "outputs", &analysis.outputs);
    checklist(printer, &analysis.entry_point, &analysis.guidelines);
    verdict(printer, analysis.is_publishable());
}
