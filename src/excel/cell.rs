/// A single cell value as read from the source workbook.
///
/// Values keep their original type so the extracted sheet round-trips with
/// numbers as numbers, booleans as booleans and formulas as formulas instead
/// of flattening everything to display text.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date-time value.
    DateTime(f64),
    /// ISO 8601 date-time string (xlsx 1904/strict variants).
    DateTimeIso(String),
    /// ISO 8601 duration string.
    DurationIso(String),
    /// Formula text without the leading `=`.
    Formula(String),
    /// Error literal such as `#DIV/0!` or `#N/A`.
    Error(String),
}
