//! Input validation for company submissions

use thiserror::Error;

use crate::models::{RawSubmission, SubmissionInput};

const MAX_NAME_CHARS: usize = 100;
const MAX_ELECTRIC_BILL: f64 = 10_000.0;
const MAX_MONTHLY_WASTE: f64 = 1_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Company name cannot be empty or just whitespace!")]
    EmptyCompanyName,
    #[error("Company name is too long (maximum 100 characters)!")]
    CompanyNameTooLong,
    #[error("{0} must be a valid number!")]
    NotANumber(&'static str),
    #[error("{0} must be a positive number greater than zero!")]
    NotPositive(&'static str),
    #[error("Electricity bill seems unrealistically high. Please check the amount!")]
    UnrealisticElectricBill,
    #[error("Monthly waste generation seems extremely high. Please verify!")]
    UnrealisticWaste,
    #[error("Recycled waste percentage must be between 0 and 100!")]
    RecycledPercentOutOfRange,
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber(field)),
    }
}

fn parse_positive(field: &'static str, text: &str) -> Result<f64, ValidationError> {
    let value = parse_number(field, text)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(value)
}

/// Check a raw submission and convert it into typed calculator input
///
/// The first failing check is reported; nothing is corrected.
pub fn validate(raw: &RawSubmission) -> Result<SubmissionInput, ValidationError> {
    let name = &raw.company_name;
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyCompanyName);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::CompanyNameTooLong);
    }

    let avg_electric_bill = parse_positive("Electricity Bill", &raw.avg_electric_bill)?;
    if avg_electric_bill > MAX_ELECTRIC_BILL {
        return Err(ValidationError::UnrealisticElectricBill);
    }
    let avg_gas_bill = parse_positive("Gas Bill", &raw.avg_gas_bill)?;
    let avg_transport_cost = parse_positive("Transport Cost", &raw.avg_transport_cost)?;
    let monthly_waste_generated = parse_positive("Monthly Waste", &raw.monthly_waste_generated)?;
    if monthly_waste_generated > MAX_MONTHLY_WASTE {
        return Err(ValidationError::UnrealisticWaste);
    }
    let annual_travel_kms = parse_positive("Annual Travel Distance", &raw.annual_travel_kms)?;
    let fuel_efficiency = parse_positive("Fuel Efficiency", &raw.fuel_efficiency)?;

    let recycled_waste_percent =
        parse_number("Recycled waste percentage", &raw.recycled_waste_percent)?;
    if !(0.0..=100.0).contains(&recycled_waste_percent) {
        return Err(ValidationError::RecycledPercentOutOfRange);
    }

    Ok(SubmissionInput {
        company_name: name.clone(),
        avg_electric_bill,
        avg_gas_bill,
        avg_transport_cost,
        monthly_waste_generated,
        recycled_waste_percent,
        annual_travel_kms,
        fuel_efficiency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> RawSubmission {
        RawSubmission {
            company_name: "Acme".to_string(),
            avg_electric_bill: "1000".to_string(),
            avg_gas_bill: "200".to_string(),
            avg_transport_cost: "300".to_string(),
            monthly_waste_generated: "50".to_string(),
            recycled_waste_percent: "20".to_string(),
            annual_travel_kms: "10000".to_string(),
            fuel_efficiency: "8".to_string(),
        }
    }

    #[test]
    fn accepts_valid_submission() {
        let input = validate(&acme()).unwrap();
        assert_eq!(input.company_name, "Acme");
        assert_eq!(input.avg_electric_bill, 1000.0);
        assert_eq!(input.recycled_waste_percent, 20.0);
        assert_eq!(input.fuel_efficiency, 8.0);
    }

    #[test]
    fn rejects_blank_and_long_names() {
        let blank = RawSubmission { company_name: "   ".to_string(), ..acme() };
        assert_eq!(validate(&blank), Err(ValidationError::EmptyCompanyName));

        let long = RawSubmission { company_name: "x".repeat(101), ..acme() };
        assert_eq!(validate(&long), Err(ValidationError::CompanyNameTooLong));

        let limit = RawSubmission { company_name: "é".repeat(100), ..acme() };
        assert!(validate(&limit).is_ok());
    }

    #[test]
    fn rejects_zero_fuel_efficiency() {
        let raw = RawSubmission { fuel_efficiency: "0".to_string(), ..acme() };
        assert_eq!(
            validate(&raw),
            Err(ValidationError::NotPositive("Fuel Efficiency"))
        );
    }

    #[test]
    fn rejects_recycled_percent_out_of_range() {
        let raw = RawSubmission { recycled_waste_percent: "150".to_string(), ..acme() };
        assert_eq!(validate(&raw), Err(ValidationError::RecycledPercentOutOfRange));

        let raw = RawSubmission { recycled_waste_percent: "-1".to_string(), ..acme() };
        assert_eq!(validate(&raw), Err(ValidationError::RecycledPercentOutOfRange));

        let raw = RawSubmission { recycled_waste_percent: "0".to_string(), ..acme() };
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let raw = RawSubmission { avg_gas_bill: "lots".to_string(), ..acme() };
        assert_eq!(validate(&raw), Err(ValidationError::NotANumber("Gas Bill")));

        let raw = RawSubmission { annual_travel_kms: "NaN".to_string(), ..acme() };
        assert_eq!(
            validate(&raw),
            Err(ValidationError::NotANumber("Annual Travel Distance"))
        );
    }

    #[test]
    fn rejects_unrealistic_amounts() {
        let raw = RawSubmission { avg_electric_bill: "10000.5".to_string(), ..acme() };
        assert_eq!(validate(&raw), Err(ValidationError::UnrealisticElectricBill));

        let raw = RawSubmission { monthly_waste_generated: "1001".to_string(), ..acme() };
        assert_eq!(validate(&raw), Err(ValidationError::UnrealisticWaste));
    }

    #[test]
    fn first_failure_wins() {
        let raw = RawSubmission {
            avg_electric_bill: "-5".to_string(),
            fuel_efficiency: "0".to_string(),
            ..acme()
        };
        let err = validate(&raw).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive("Electricity Bill"));
        assert_eq!(
            err.to_string(),
            "Electricity Bill must be a positive number greater than zero!"
        );
    }
}
