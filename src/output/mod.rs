mod csv;
mod json;
mod text;

use crate::bench::BenchRow;
use crate::config::{FilterKind, OutputFormat};

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

/// Renders benchmark rows, one line per tap count
pub trait Formatter: Send {
    fn format(&self, row: &BenchRow) -> String;

    fn header(&self) -> Option<String> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, kind: FilterKind, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(kind, verbose)),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
