//! Text reports for single submissions and the history view

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::history::HistorySnapshot;
use crate::models::{Category, EmissionRecord, SubmissionInput};

const BAR_WIDTH: usize = 40;
const SLUG_CHARS: usize = 10;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/\\]").expect("valid slug pattern"));

/// Horizontal bar for `value` scaled against `max`; negatives draw nothing
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.clamp(1, BAR_WIDTH))
}

/// Report for one calculated submission
#[derive(Debug)]
pub struct SubmissionReport<'a> {
    pub input: &'a SubmissionInput,
    pub record: &'a EmissionRecord,
}

impl<'a> SubmissionReport<'a> {
    pub fn new(input: &'a SubmissionInput, record: &'a EmissionRecord) -> Self {
        Self { input, record }
    }

    pub fn energy_spend(&self) -> f64 {
        self.input.avg_electric_bill + self.input.avg_gas_bill
    }
}

impl std::fmt::Display for SubmissionReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Carbon Footprint Summary for {} ===", self.input.company_name)?;
        writeln!(f, "Total carbon impact: {:.2}", self.record.carbon_footprint())?;
        writeln!(f, "Energy consumption:  EUR {:.2}", self.energy_spend())?;
        writeln!(f, "Transportation:      {} km", self.input.annual_travel_kms)?;
        writeln!(
            f,
            "Waste management:    {} kg (Recycled: {}%)",
            self.input.monthly_waste_generated, self.input.recycled_waste_percent
        )?;
        writeln!(f)?;

        let max = Category::ALL
            .iter()
            .map(|c| self.record.value(*c))
            .fold(0.0_f64, f64::max);
        for category in Category::ALL {
            let value = self.record.value(category);
            writeln!(
                f,
                "  {:<16} {:>12.2} {}",
                category.label(),
                value,
                bar(value, max)
            )?;
        }
        Ok(())
    }
}

/// File stem for a downloadable report: lowercase, no whitespace or separators
pub fn report_slug(company_name: &str) -> String {
    let lowered = company_name.to_lowercase();
    UNSAFE_FILENAME_CHARS
        .replace_all(&lowered, "_")
        .chars()
        .take(SLUG_CHARS)
        .collect()
}

/// Write the rendered report into `dir` and return its path
pub fn write_report(dir: &Path, report: &SubmissionReport<'_>) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    let path = dir.join(format!("{}_report.txt", report_slug(&report.input.company_name)));
    fs::write(&path, report.to_string())
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(path)
}

/// Table view of the history snapshot
pub struct HistoryReport<'a>(pub &'a HistorySnapshot);

impl std::fmt::Display for HistoryReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.0;
        writeln!(f, "=== Historic Company Data ===")?;
        if snapshot.is_empty() {
            writeln!(f, "No submissions yet.")?;
            return Ok(());
        }

        writeln!(
            f,
            "{:<24} {:>14} {:>16} {:>16} {:>16}",
            "Company", "Energy Usage", "Waste Generated", "Business Travel", "Footprint"
        )?;
        writeln!(f, "{}", "-".repeat(90))?;
        for entry in &snapshot.entries {
            let r = &entry.record;
            writeln!(
                f,
                "{:<24} {:>14.2} {:>16.2} {:>16.2} {:>16.2}",
                r.name, r.energy_usage, r.waste_generated, r.business_travel, entry.carbon_footprint
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Per company:")?;
        let totals = snapshot.company_totals();
        let max = totals
            .iter()
            .map(|t| t.carbon_footprint)
            .fold(0.0_f64, f64::max);
        for total in &totals {
            writeln!(
                f,
                "  {:<24} {:>3}x {:>14.2} {}",
                total.name,
                total.submissions,
                total.carbon_footprint,
                bar(total.carbon_footprint, max)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Category ranges:")?;
        for category in Category::ALL {
            let range = snapshot.range(category);
            writeln!(
                f,
                "  {:<16} {:>14.2} .. {:<14.2}",
                category.label(),
                range.min,
                range.max
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Normalized comparison (0 = lowest, 1 = highest):")?;
        writeln!(
            f,
            "  {:<24} {:>8} {:>8} {:>8}",
            "Company", "Energy", "Waste", "Travel"
        )?;
        for (entry, norm) in snapshot.entries.iter().zip(snapshot.normalized_series()) {
            writeln!(
                f,
                "  {:<24} {:>8.2} {:>8.2} {:>8.2}",
                entry.record.name, norm[0], norm[1], norm[2]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::aggregate;
    use tempfile::tempdir;

    fn acme_input() -> SubmissionInput {
        SubmissionInput {
            company_name: "Acme Widgets Ltd".to_string(),
            avg_electric_bill: 1000.0,
            avg_gas_bill: 200.0,
            avg_transport_cost: 300.0,
            monthly_waste_generated: 50.0,
            recycled_waste_percent: 20.0,
            annual_travel_kms: 10000.0,
            fuel_efficiency: 8.0,
        }
    }

    fn acme_record() -> EmissionRecord {
        EmissionRecord {
            name: "Acme Widgets Ltd".to_string(),
            energy_usage: 8370.72,
            waste_generated: 322.0,
            business_travel: 2887.5,
        }
    }

    #[test]
    fn slug_matches_download_naming() {
        assert_eq!(report_slug("Acme Widgets Ltd"), "acme_widge");
        assert_eq!(report_slug("A/B"), "a_b");
        assert_eq!(report_slug("x"), "x");
    }

    #[test]
    fn bar_scales_and_skips_negatives() {
        assert_eq!(bar(10.0, 10.0).len(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).len(), BAR_WIDTH / 2);
        assert_eq!(bar(0.001, 10.0).len(), 1);
        assert!(bar(-3.0, 10.0).is_empty());
        assert!(bar(3.0, 0.0).is_empty());
    }

    #[test]
    fn submission_report_lists_figures() {
        let input = acme_input();
        let record = acme_record();
        let text = SubmissionReport::new(&input, &record).to_string();
        assert!(text.contains("Carbon Footprint Summary for Acme Widgets Ltd"));
        assert!(text.contains("Total carbon impact: 11580.22"));
        assert!(text.contains("EUR 1200.00"));
        assert!(text.contains("50 kg (Recycled: 20%)"));
        assert!(text.contains("Energy Usage"));
    }

    #[test]
    fn write_report_creates_file() {
        let dir = tempdir().expect("tempdir");
        let input = acme_input();
        let record = acme_record();
        let report = SubmissionReport::new(&input, &record);

        let path = write_report(&dir.path().join("reports"), &report).expect("write");
        assert_eq!(path.file_name().unwrap(), "acme_widge_report.txt");
        assert_eq!(fs::read_to_string(&path).unwrap(), report.to_string());
    }

    #[test]
    fn history_report_handles_empty_and_populated() {
        let empty = aggregate(&[]);
        assert!(HistoryReport(&empty).to_string().contains("No submissions yet."));

        let snapshot = aggregate(&[acme_record(), acme_record()]);
        let text = HistoryReport(&snapshot).to_string();
        assert!(text.contains("Per company:"));
        assert!(text.contains("2x"));
        assert!(text.contains("Normalized comparison"));
    }
}
