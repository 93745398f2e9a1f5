use super::Formatter;
use crate::bench::BenchRow;

/// One JSON object per line
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, row: &BenchRow) -> String {
        serde_json::to_string(row).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::TimingSummary;

    #[test]
    fn test_json_row() {
        let row = BenchRow {
            taps: 4,
            timings: vec![
                Some(TimingSummary {
                    count: 1,
                    mean: 0.5,
                    std_dev: 0.0,
                    min: 0.5,
                    max: 0.5,
                }),
                None,
            ],
        };
        let value: serde_json::Value = serde_json::from_str(&JsonFormatter.format(&row)).unwrap();
        assert_eq!(value["taps"], 4);
        assert_eq!(value["timings"][0]["mean"], 0.5);
        assert!(value["timings"][1].is_null());
    }
}
