// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use crate::{error::diagnostic::Diagnostic, fragment::Fragment};

pub trait DiagnosticRenderer {
	fn render(&self, diagnostic: &Diagnostic) -> String;
}

pub struct DefaultRenderer;

impl DiagnosticRenderer for DefaultRenderer {
	fn render(&self, d: &Diagnostic) -> String {
		let mut output = String::new();
		render_into(&mut output, d, 0);
		output
	}
}

fn render_into(output: &mut String, d: &Diagnostic, depth: usize) {
	let indent = "  ".repeat(depth);
	let _ = writeln!(output, "{}error[{}]: {}", indent, d.code, d.message);

	if let Some(statement) = &d.statement {
		let _ = writeln!(output, "{}  statement: {}", indent, statement);
	}

	if let Fragment::Statement {
		text,
		line,
		column,
	} = &d.fragment
	{
		let line_number_width = line.0.to_string().len().max(2);
		let _ = writeln!(output, "{} {:>width$} │ {}", indent, line.0, text, width = line_number_width);
		let _ = writeln!(
			output,
			"{} {:>width$} │ {}{}",
			indent,
			"",
			" ".repeat(column.0 as usize),
			"^".repeat(text.chars().count().max(1)),
			width = line_number_width
		);
		if let Some(label) = &d.label {
			let _ = writeln!(output, "{} {:>width$} = {}", indent, "", label, width = line_number_width);
		}
	} else if let Fragment::Internal {
		text,
	} = &d.fragment
	{
		let _ = writeln!(output, "{}  at `{}`", indent, text);
	}

	if let Some(col) = &d.column {
		let _ = writeln!(output, "\n{}note: column `{}` is of type `{}`", indent, col.name, col.domain);
	}

	if let Some(help) = &d.help {
		let _ = writeln!(output, "\n{}help: {}", indent, help);
	}

	for note in &d.notes {
		let _ = writeln!(output, "\n{}note: {}", indent, note);
	}

	if let Some(cause) = &d.cause {
		let _ = writeln!(output, "\n{}caused by:", indent);
		render_into(output, cause, depth + 1);
	}
}

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		DefaultRenderer.render(diagnostic)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::Domain;

	fn diagnostic() -> Diagnostic {
		Diagnostic {
			code: "CAST_001".to_string(),
			statement: None,
			message: "cannot cast NUMERIC to SET".to_string(),
			column: None,
			fragment: Fragment::statement("1.5", 1, 12),
			label: Some("invalid cast".to_string()),
			help: None,
			notes: vec!["numeric values never convert to collections".to_string()],
			cause: None,
		}
	}

	#[test]
	fn test_render_header_and_caret() {
		let out = DefaultRenderer::render_string(&diagnostic());
		assert!(out.starts_with("error[CAST_001]: cannot cast NUMERIC to SET"));
		assert!(out.contains("│ 1.5"));
		assert!(out.contains("^^^"));
		assert!(out.contains("= invalid cast"));
		assert!(out.contains("note: numeric values never convert to collections"));
	}

	#[test]
	fn test_render_column_and_cause() {
		let mut d = diagnostic().with_column("price", Domain::numeric(10, 2));
		d.cause = Some(Box::new(Diagnostic {
			code: "COERCE_001".to_string(),
			message: "overflow".to_string(),
			fragment: Fragment::None,
			..diagnostic()
		}));
		let out = DefaultRenderer::render_string(&d);
		assert!(out.contains("column `price` is of type `NUMERIC(10,2)`"));
		assert!(out.contains("caused by:"));
		assert!(out.contains("  error[COERCE_001]: overflow"));
	}
}
