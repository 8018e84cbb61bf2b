use napi::Result as NapiResult;
use napi_derive::napi;

use loan_amortization_core::amortization::chart::balance_chart;
use loan_amortization_core::amortization::controller::{FieldUpdate, LoanForm};
use loan_amortization_core::amortization::report::{amortize, calculate_payment};
use loan_amortization_core::amortization::schedule::build_schedule_for;
use loan_amortization_core::amortization::LoanInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_loan(input_json: &str) -> NapiResult<LoanInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Core computations
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_payment(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = calculate_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare `[{Period, Interest, Principal, Balance}, ...]` rows for a data table.
#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let schedule = build_schedule_for(&input).map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[napi]
pub fn amortize_loan(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = amortize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Plotly figure (`{data, layout}`) for the balance graph.
#[napi]
pub fn balance_figure(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let schedule = build_schedule_for(&input).map_err(to_napi_error)?;
    let chart = balance_chart(&schedule, input.frequency, input.term_years);
    serde_json::to_string(&chart.to_figure()).map_err(to_napi_error)
}

/// Apply one text edit (`"rate 0.045"`, `"clear term"`) to a serialized
/// form and return the updated form. Callers re-run `amortize_loan` on it.
#[napi]
pub fn apply_form_update(form_json: String, update: String) -> NapiResult<String> {
    let mut form: LoanForm = if form_json.trim().is_empty() {
        LoanForm::dashboard_defaults()
    } else {
        serde_json::from_str(&form_json).map_err(to_napi_error)?
    };
    form.apply(FieldUpdate::parse(&update).map_err(to_napi_error)?);
    serde_json::to_string(&form).map_err(to_napi_error)
}
