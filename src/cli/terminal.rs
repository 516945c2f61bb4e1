//! Styling for `reqfilter` reports.
//!
//! Every helper falls back to the plain text when stdout is not a colour
//! terminal, so piped output stays free of escape codes.

use owo_colors::{OwoColorize, colors::css};
use requisitions::Grade;

/// Whether stdout accepts ANSI colours.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Renders a risk grade coloured by band: `A` green, `B` amber, `C` red.
pub fn grade(grade: Grade) -> String {
    let code = grade.code();
    if !supports_color() {
        return code.to_string();
    }
    if grade <= Grade::A7 {
        code.fg::<css::Green>().to_string()
    } else if grade <= Grade::B7 {
        code.fg::<css::Orange>().to_string()
    } else {
        code.fg::<css::Red>().to_string()
    }
}

/// Report styles for plain text.
pub trait Colorize {
    /// Selection totals and loaded-filter counts, in green.
    fn success(&self) -> String;
    /// Empty selections and empty filter sets, in amber.
    fn warning(&self) -> String;
    /// Table headers and unconstrained filters, dimmed.
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_text_keeps_its_content() {
        for code in [Grade::A1, Grade::B4, Grade::C7] {
            assert!(grade(code).contains(code.code()));
        }
        assert!("2 filters loaded".success().contains("2 filters loaded"));
        assert!(String::from("ID").dim().contains("ID"));
    }
}
