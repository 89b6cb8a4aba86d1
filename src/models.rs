//! Data models for submissions and emission records

use serde::{Deserialize, Serialize};

/// Company figures as typed in by the user, before validation
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub company_name: String,
    pub avg_electric_bill: String,
    pub avg_gas_bill: String,
    pub avg_transport_cost: String,
    pub monthly_waste_generated: String,
    pub recycled_waste_percent: String,
    pub annual_travel_kms: String,
    pub fuel_efficiency: String,
}

/// Validated company figures
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInput {
    pub company_name: String,
    pub avg_electric_bill: f64,      // EUR per month
    pub avg_gas_bill: f64,           // EUR per month
    pub avg_transport_cost: f64,     // EUR per month
    pub monthly_waste_generated: f64, // kg
    pub recycled_waste_percent: f64, // 0..=100
    pub annual_travel_kms: f64,
    pub fuel_efficiency: f64, // L/100 km, never zero
}

/// One persisted row of the history file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Energy Usage")]
    pub energy_usage: f64,
    #[serde(rename = "Waste Generated")]
    pub waste_generated: f64,
    #[serde(rename = "Business Travel")]
    pub business_travel: f64,
}

impl EmissionRecord {
    pub fn value(&self, category: Category) -> f64 {
        match category {
            Category::EnergyUsage => self.energy_usage,
            Category::WasteGenerated => self.waste_generated,
            Category::BusinessTravel => self.business_travel,
        }
    }

    /// Sum of the three category values
    pub fn carbon_footprint(&self) -> f64 {
        self.energy_usage + self.waste_generated + self.business_travel
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    EnergyUsage,
    WasteGenerated,
    BusinessTravel,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::EnergyUsage,
        Category::WasteGenerated,
        Category::BusinessTravel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::EnergyUsage => "Energy Usage",
            Category::WasteGenerated => "Waste Generated",
            Category::BusinessTravel => "Business Travel",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carbon_footprint_sums_categories() {
        let record = EmissionRecord {
            name: "Acme".to_string(),
            energy_usage: 10.0,
            waste_generated: -2.5,
            business_travel: 4.0,
        };
        assert_eq!(record.carbon_footprint(), 11.5);
        let total: f64 = Category::ALL.iter().map(|c| record.value(*c)).sum();
        assert_eq!(total, record.carbon_footprint());
    }

    #[test]
    fn category_labels_match_csv_header() {
        let labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Energy Usage", "Waste Generated", "Business Travel"]);
    }
}
