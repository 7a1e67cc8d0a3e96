//! Colour coding for the day columns.
//!
//! Rules are installed as worksheet conditional formats keyed on the cell
//! text, so a cell edited by hand later is re-coloured by the spreadsheet
//! application itself.

use rust_xlsxwriter::{Color, ConditionalFormatFormula, Format, Worksheet, XlsxError};

/// Fill for in-stock cells.
pub const POSITIVE_FILL: u32 = 0x00C6_EFCE;
/// Fill for out-of-stock cells.
pub const NEGATIVE_FILL: u32 = 0x00FF_C7CE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTone {
    Positive,
    Negative,
}

/// Decides which day cells are highlighted and installs the matching rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusFormatter;

impl StatusFormatter {
    /// Tone a cell with `value` is shown in, if any.
    ///
    /// Matching is case-insensitive but otherwise exact, like the installed
    /// `LOWER(..)` rules: `sí`/`si` are positive, `no` negative, anything
    /// else (blank, padded text, diagnostic badges) stays unstyled.
    #[must_use]
    pub fn classify(value: &str) -> Option<CellTone> {
        match value.to_lowercase().as_str() {
            "sí" | "si" => Some(CellTone::Positive),
            "no" => Some(CellTone::Negative),
            _ => None,
        }
    }

    /// Spreadsheet formula evaluated against the top-left cell of a rule's
    /// range, e.g. `D2`. The reference is relative, so the rule follows
    /// every row below it.
    #[must_use]
    pub fn rule_formula(tone: CellTone, anchor: &str) -> String {
        match tone {
            CellTone::Positive => format!(r#"OR(LOWER({anchor})="si",LOWER({anchor})="sí")"#),
            CellTone::Negative => format!(r#"LOWER({anchor})="no""#),
        }
    }

    /// Installs both rules on one column over rows `first_row..=last_row`
    /// (zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`XlsxError`] if the range is outside the worksheet limits.
    pub fn apply_to_column(
        worksheet: &mut Worksheet,
        column: u16,
        first_row: u32,
        last_row: u32,
    ) -> Result<(), XlsxError> {
        let anchor = format!("{}{}", column_name(column), first_row + 1);

        for tone in [CellTone::Positive, CellTone::Negative] {
            let fill = match tone {
                CellTone::Positive => POSITIVE_FILL,
                CellTone::Negative => NEGATIVE_FILL,
            };
            let rule = ConditionalFormatFormula::new()
                .set_rule(Self::rule_formula(tone, &anchor).as_str())
                .set_format(Format::new().set_background_color(Color::RGB(fill)));
            worksheet.add_conditional_format(first_row, column, last_row, column, &rule)?;
        }
        Ok(())
    }
}

/// Zero-based column index to its A1 letters (`0` → `A`, `26` → `AA`).
pub(crate) fn column_name(column: u16) -> String {
    let mut n = u32::from(column) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
