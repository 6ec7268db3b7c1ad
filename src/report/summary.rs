//! Run summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one preprocessing run, filled in step by step and displayed
/// at the end.
#[derive(Debug, Default)]
pub struct PipelineSummary {
    pub tables_loaded: usize,
    pub load_failures: Vec<(String, String)>,
    pub orders_rows: usize,
    pub joined_rows: usize,
    pub dropped_ids: Vec<String>,
    pub dropped_degenerate: Vec<String>,
    pub dropped_correlation: Vec<String>,
    pub one_hot_columns_added: usize,
    pub label_encoded_columns: usize,
    pub class_counts_before: (usize, usize),
    pub final_rows: usize,
    pub final_columns: usize,
}

impl PipelineSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_id_drops(&mut self, columns: Vec<String>) {
        self.dropped_ids = columns;
    }

    pub fn add_degenerate_drops(&mut self, columns: Vec<String>) {
        self.dropped_degenerate = columns;
    }

    pub fn add_correlation_drops(&mut self, columns: Vec<String>) {
        self.dropped_correlation = columns;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Tables loaded"),
            Cell::new(self.tables_loaded).fg(if self.load_failures.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🧾 Order rows"),
            Cell::new(self.orders_rows),
        ]);
        table.add_row(vec![
            Cell::new("🔀 Joined rows"),
            Cell::new(self.joined_rows),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (identifiers)"),
            Cell::new(self.dropped_ids.len() + self.dropped_degenerate.len()),
        ]);
        table.add_row(vec![
            Cell::new("🔗 Dropped (correlation)"),
            Cell::new(self.dropped_correlation.len()).fg(if self.dropped_correlation.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("🏷️  One-hot columns added"),
            Cell::new(self.one_hot_columns_added),
        ]);
        table.add_row(vec![
            Cell::new("🔢 Label-encoded columns"),
            Cell::new(self.label_encoded_columns),
        ]);
        table.add_row(vec![
            Cell::new("⚖️  Classes before balance"),
            Cell::new(format!(
                "{} delivered / {} canceled",
                self.class_counts_before.0, self.class_counts_before.1
            )),
        ]);
        table.add_row(vec![
            Cell::new("✅ Final shape"),
            Cell::new(format!("{} x {}", self.final_rows, self.final_columns))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.load_failures.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Tables that failed to load").yellow(),
                style(format!("({})", self.load_failures.len())).dim()
            );
            for (name, message) in &self.load_failures {
                println!("        {} {}: {}", style("•").dim(), name, message);
            }
        }

        let dropped: Vec<(&str, &Vec<String>)> = vec![
            ("Identifier columns", &self.dropped_ids),
            ("Degenerate columns", &self.dropped_degenerate),
            ("High correlation", &self.dropped_correlation),
        ];

        if dropped.iter().any(|(_, cols)| !cols.is_empty()) {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("DROPPED COLUMNS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            for (label, cols) in dropped {
                if cols.is_empty() {
                    continue;
                }
                println!();
                println!(
                    "      {} {}:",
                    style(label).yellow(),
                    style(format!("({})", cols.len())).dim()
                );
                for col in cols {
                    println!("        {} {}", style("•").dim(), col);
                }
            }
        }
    }
}
