//! Emission calculator logic

use thiserror::Error;

use crate::models::{EmissionRecord, SubmissionInput};

const MONTHS_PER_YEAR: f64 = 12.0;

const ELECTRICITY_FACTOR: f64 = 0.0005;
const GAS_FACTOR: f64 = 0.0053;
const TRANSPORT_FACTOR: f64 = 2.32;
const WASTE_FACTOR: f64 = 0.57;
const TRAVEL_FACTOR: f64 = 2.31;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("fuel efficiency must not be zero")]
    DivisionByZero,
}

/// Calculate the three emission categories for one submission
///
/// Values are kept at full precision; rounding is left to the report.
/// Waste can go negative when the recycled percentage exceeds the waste term.
pub fn compute_emissions(input: &SubmissionInput) -> Result<EmissionRecord, CalcError> {
    if input.fuel_efficiency == 0.0 {
        return Err(CalcError::DivisionByZero);
    }

    let energy_usage = input.avg_electric_bill * MONTHS_PER_YEAR * ELECTRICITY_FACTOR
        + input.avg_gas_bill * MONTHS_PER_YEAR * GAS_FACTOR
        + input.avg_transport_cost * MONTHS_PER_YEAR * TRANSPORT_FACTOR;

    let waste_generated =
        input.monthly_waste_generated * MONTHS_PER_YEAR * WASTE_FACTOR - input.recycled_waste_percent;

    let business_travel = input.annual_travel_kms * (1.0 / input.fuel_efficiency) * TRAVEL_FACTOR;

    Ok(EmissionRecord {
        name: input.company_name.clone(),
        energy_usage,
        waste_generated,
        business_travel,
    })
}
