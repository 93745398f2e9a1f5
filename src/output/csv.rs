use super::Formatter;
use crate::bench::{BenchRow, VARIANTS};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, row: &BenchRow) -> String {
        let mut fields = vec![row.taps.to_string()];
        fields.extend(
            row.timings
                .iter()
                .map(|t| t.as_ref().map(|t| format!("{:.9}", t.mean)).unwrap_or_default()),
        );
        fields.join(",")
    }

    fn header(&self) -> Option<String> {
        let mut fields = vec!["taps".to_string()];
        fields.extend(VARIANTS.iter().map(|v| v.column()));
        Some(fields.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_header_and_empty_cells() {
        let formatter = CsvFormatter;
        assert_eq!(
            formatter.header().unwrap(),
            "taps,simd_f,scalar_f,g_simd_f,g_scalar_f,simd_d,scalar_d,g_simd_d,g_scalar_d"
        );
        let row = BenchRow {
            taps: 300,
            timings: vec![None; 8],
        };
        assert_eq!(formatter.format(&row), "300,,,,,,,,");
    }
}
