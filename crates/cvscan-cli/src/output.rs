use std::io::Write;

use cvscan_core::{ParsedDocument, ValidationResult};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

const NOT_FOUND: &str = "(not found)";

fn print_header(w: &mut dyn Write, label: &str, color: ColorMode) -> std::io::Result<()> {
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.dimmed())?;
        writeln!(w, "{}", label.bold())?;
        writeln!(w, "{}", sep.dimmed())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "{}", label)?;
        writeln!(w, "{}", sep)?;
    }
    Ok(())
}

fn print_field(
    w: &mut dyn Write,
    name: &str,
    value: Option<&str>,
    color: ColorMode,
) -> std::io::Result<()> {
    let label = format!("{:<11}", format!("{name}:"));
    match (value, color.enabled()) {
        (Some(v), true) => writeln!(w, "{} {}", label.bold(), v.cyan()),
        (Some(v), false) => writeln!(w, "{} {}", label, v),
        (None, true) => writeln!(w, "{} {}", label.bold(), NOT_FOUND.dimmed()),
        (None, false) => writeln!(w, "{} {}", label, NOT_FOUND),
    }
}

/// Print the extracted fields of one parsed CV.
pub fn print_document(
    w: &mut dyn Write,
    label: &str,
    doc: &ParsedDocument,
    show_full_text: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    print_header(w, label, color)?;

    let skills = doc.skills.as_ref().map(|s| s.join(", "));
    print_field(w, "Name", doc.full_name.as_deref(), color)?;
    print_field(w, "Email", doc.email.as_deref(), color)?;
    print_field(w, "Phone", doc.phone.as_deref(), color)?;
    print_field(w, "Address", doc.address.as_deref(), color)?;
    print_field(w, "University", doc.university.as_deref(), color)?;
    print_field(w, "Education", doc.education.as_deref(), color)?;
    print_field(w, "Experience", doc.experience.as_deref(), color)?;
    print_field(w, "Skills", skills.as_deref(), color)?;

    if show_full_text {
        writeln!(w)?;
        if color.enabled() {
            writeln!(w, "{}", "Full text:".bold())?;
        } else {
            writeln!(w, "Full text:")?;
        }
        for line in doc.full_text.lines() {
            writeln!(w, "  {}", line)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Print a file that could not be read, validated or decoded.
pub fn print_failure(
    w: &mut dyn Write,
    label: &str,
    message: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}: {}", "FAILED".red().bold(), label, message)?;
    } else {
        writeln!(w, "FAILED {}: {}", label, message)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print one validator verdict.
pub fn print_validation(
    w: &mut dyn Write,
    label: &str,
    result: &ValidationResult,
    color: ColorMode,
) -> std::io::Result<()> {
    match (&result.error, color.enabled()) {
        (None, true) => writeln!(w, "{} {}", "OK".green(), label),
        (None, false) => writeln!(w, "OK {}", label),
        (Some(error), true) => writeln!(w, "{} {}: {}", "REJECTED".red(), label, error),
        (Some(error), false) => writeln!(w, "REJECTED {}: {}", label, error),
    }
}

pub fn print_warning(w: &mut dyn Write, message: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "WARNING:".yellow(), message)
    } else {
        writeln!(w, "WARNING: {}", message)
    }
}

/// Print the batch summary line.
pub fn print_summary(
    w: &mut dyn Write,
    parsed: usize,
    failed: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        write!(w, "{} parsed", parsed.to_string().green())?;
        if failed > 0 {
            write!(w, ", {} failed", failed.to_string().red())?;
        }
    } else {
        write!(w, "{} parsed", parsed)?;
        if failed > 0 {
            write!(w, ", {} failed", failed)?;
        }
    }
    writeln!(w)?;
    Ok(())
}
