//! Synthetic company data for trying out the history view

use std::ops::Range;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::calculator::{self, CalcError};
use crate::models::{EmissionRecord, SubmissionInput};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySize {
    Small,
    Medium,
    Large,
}

/// Input ranges for one company size; upper bounds are exclusive
struct SizeProfile {
    electric_bill: Range<u32>,
    gas_bill: Range<u32>,
    transport_cost: Range<u32>,
    monthly_waste: Range<u32>,
    recycled_percent: Range<u32>,
    travel_kms: Range<u32>,
    fuel_efficiency: Range<u32>,
}

impl CompanySize {
    pub const ALL: [CompanySize; 3] = [CompanySize::Small, CompanySize::Medium, CompanySize::Large];

    fn profile(self) -> SizeProfile {
        match self {
            CompanySize::Small => SizeProfile {
                electric_bill: 500..1000,
                gas_bill: 10..100,
                transport_cost: 500..1500,
                monthly_waste: 100..500,
                recycled_percent: 20..40,
                travel_kms: 10_000..50_000,
                fuel_efficiency: 5..7,
            },
            CompanySize::Medium => SizeProfile {
                electric_bill: 2000..5000,
                gas_bill: 500..2000,
                transport_cost: 2000..5000,
                monthly_waste: 500..2000,
                recycled_percent: 30..50,
                travel_kms: 50_000..100_000,
                fuel_efficiency: 7..9,
            },
            CompanySize::Large => SizeProfile {
                electric_bill: 10_000..50_000,
                gas_bill: 2_000..10_000,
                transport_cost: 10_000..50_000,
                monthly_waste: 2000..10_000,
                recycled_percent: 40..60,
                travel_kms: 100_000..200_000,
                fuel_efficiency: 9..15,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Draw one company's figures. Bypasses validation: large companies exceed its caps.
pub fn random_submission<R: Rng>(rng: &mut R, name: String, size: CompanySize) -> SubmissionInput {
    let p = size.profile();
    let mut draw = |range: Range<u32>| f64::from(rng.gen_range(range));
    SubmissionInput {
        company_name: name,
        avg_electric_bill: draw(p.electric_bill),
        avg_gas_bill: draw(p.gas_bill),
        avg_transport_cost: draw(p.transport_cost),
        monthly_waste_generated: draw(p.monthly_waste),
        recycled_waste_percent: draw(p.recycled_percent),
        annual_travel_kms: draw(p.travel_kms),
        fuel_efficiency: draw(p.fuel_efficiency),
    }
}

/// Generate `count` companies named "Company 1".."Company N"
pub fn generate<R: Rng>(rng: &mut R, count: usize) -> Result<Vec<EmissionRecord>, CalcError> {
    (1..=count)
        .map(|i| {
            let size = *CompanySize::ALL.choose(rng).unwrap_or(&CompanySize::Small);
            let input = random_submission(rng, format!("Company {i}"), size);
            calculator::compute_emissions(&input)
        })
        .collect()
}

/// Generate companies and append them to `store`
pub fn seed_store(
    store: &RecordStore,
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<EmissionRecord>, SeedError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let records = generate(&mut rng, count)?;
    for record in &records {
        store.append(record)?;
    }
    info!(count, path = %store.path().display(), "seeded history");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn within(value: f64, range: Range<u32>) -> bool {
        value >= f64::from(range.start) && value < f64::from(range.end)
    }

    #[test]
    fn submissions_stay_within_size_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in CompanySize::ALL {
            for _ in 0..50 {
                let input = random_submission(&mut rng, "X".to_string(), size);
                let p = size.profile();
                assert!(within(input.avg_electric_bill, p.electric_bill));
                assert!(within(input.avg_gas_bill, p.gas_bill));
                assert!(within(input.avg_transport_cost, p.transport_cost));
                assert!(within(input.monthly_waste_generated, p.monthly_waste));
                assert!(within(input.recycled_waste_percent, p.recycled_percent));
                assert!(within(input.annual_travel_kms, p.travel_kms));
                assert!(within(input.fuel_efficiency, p.fuel_efficiency));
            }
        }
    }

    #[test]
    fn generate_names_companies_in_sequence() {
        let mut rng = StdRng::seed_from_u64(1);
        let records = generate(&mut rng, 3).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Company 1", "Company 2", "Company 3"]);
    }

    #[test]
    fn same_seed_same_records() {
        let a = generate(&mut StdRng::seed_from_u64(42), 5).unwrap();
        let b = generate(&mut StdRng::seed_from_u64(42), 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seed_store_appends_everything() {
        let dir = tempdir().expect("tempdir");
        let store = RecordStore::new(dir.path().join("dummy_data.csv"));

        let records = seed_store(&store, 4, Some(3)).expect("seed");
        assert_eq!(store.load_all().expect("load"), records);
    }
}
