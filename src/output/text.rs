use super::Formatter;
use crate::bench::{BenchRow, VARIANTS};
use crate::config::FilterKind;

pub struct TextFormatter {
    kind: FilterKind,
    verbose: bool,
}

impl TextFormatter {
    pub fn new(kind: FilterKind, verbose: bool) -> Self {
        Self { kind, verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, row: &BenchRow) -> String {
        if self.verbose {
            let lines: Vec<String> = VARIANTS
                .iter()
                .zip(&row.timings)
                .map(|(variant, timing)| {
                    let label = variant.label(self.kind, row.taps);
                    match timing {
                        Some(t) => format!(
                            "{:<28} {:.6} s (sd {:.6}, min {:.6}, max {:.6}, n={})",
                            label, t.mean, t.std_dev, t.min, t.max, t.count
                        ),
                        None => format!("{:<28} -", label),
                    }
                })
                .collect();
            lines.join("\n")
        } else {
            let columns: Vec<String> = row
                .timings
                .iter()
                .map(|t| t.as_ref().map_or("-".to_string(), |t| format!("{:.6}", t.mean)))
                .collect();
            format!("{} {}", row.taps, columns.join(" "))
        }
    }
}
