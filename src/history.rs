//! Aggregation over the full submission history

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, EmissionRecord};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub record: EmissionRecord,
    pub carbon_footprint: f64,
}

/// Min and max of one category across all entries
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct CategoryRange {
    pub min: f64,
    pub max: f64,
}

impl CategoryRange {
    /// Position of `value` within the range, 0.0 when the range is degenerate
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            0.0
        } else {
            (value - self.min) / span
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanyTotal {
    pub name: String,
    pub submissions: usize,
    pub carbon_footprint: f64,
}

/// Derived view of the history; recomputed on every read, never stored
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HistorySnapshot {
    pub entries: Vec<HistoryEntry>,
    pub energy_usage: CategoryRange,
    pub waste_generated: CategoryRange,
    pub business_travel: CategoryRange,
}

impl HistorySnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn range(&self, category: Category) -> CategoryRange {
        match category {
            Category::EnergyUsage => self.energy_usage,
            Category::WasteGenerated => self.waste_generated,
            Category::BusinessTravel => self.business_travel,
        }
    }

    /// Category values of one entry scaled to 0..=1 against the whole history
    pub fn normalized(&self, index: usize) -> Option<[f64; 3]> {
        let record = &self.entries.get(index)?.record;
        Some(Category::ALL.map(|c| self.range(c).normalize(record.value(c))))
    }

    pub fn normalized_series(&self) -> Vec<[f64; 3]> {
        (0..self.entries.len())
            .filter_map(|i| self.normalized(i))
            .collect()
    }

    /// Totals per company name, in order of first appearance
    pub fn company_totals(&self) -> Vec<CompanyTotal> {
        let mut totals: Vec<CompanyTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            let name = entry.record.name.as_str();
            let slot = *index.entry(name).or_insert_with(|| {
                totals.push(CompanyTotal {
                    name: name.to_string(),
                    submissions: 0,
                    carbon_footprint: 0.0,
                });
                totals.len() - 1
            });
            let total = &mut totals[slot];
            total.submissions += 1;
            total.carbon_footprint += entry.carbon_footprint;
        }
        totals
    }
}

fn range_of(records: &[EmissionRecord], category: Category) -> CategoryRange {
    let mut values = records.iter().map(|r| r.value(category));
    let Some(first) = values.next() else {
        return CategoryRange::default();
    };
    values.fold(CategoryRange { min: first, max: first }, |acc, v| CategoryRange {
        min: acc.min.min(v),
        max: acc.max.max(v),
    })
}

/// Build the history snapshot; entry order follows input order
pub fn aggregate(records: &[EmissionRecord]) -> HistorySnapshot {
    let entries = records
        .iter()
        .map(|record| HistoryEntry {
            carbon_footprint: record.carbon_footprint(),
            record: record.clone(),
        })
        .collect();

    HistorySnapshot {
        entries,
        energy_usage: range_of(records, Category::EnergyUsage),
        waste_generated: range_of(records, Category::WasteGenerated),
        business_travel: range_of(records, Category::BusinessTravel),
    }
}
