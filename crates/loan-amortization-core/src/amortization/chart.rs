//! Balance-over-time line series for the amortization graph.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::frequency::RepaymentFrequency;
use super::schedule::Schedule;
use crate::types::Money;

pub const CHART_TITLE: &str = "Loan Amortization Graph";
pub const BALANCE_AXIS_LABEL: &str = "Loan Balance";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChartPoint {
    pub period: u32,
    pub balance: Money,
}

/// A single-series line chart of remaining balance against period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChart {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub points: Vec<ChartPoint>,
}

/// e.g. "Number of Monthly Payment Periods = 20 years"
pub fn period_axis_label(frequency: RepaymentFrequency, term_years: u32) -> String {
    format!("Number of {frequency} Payment Periods = {term_years} years")
}

pub fn balance_chart(
    schedule: &Schedule,
    frequency: RepaymentFrequency,
    term_years: u32,
) -> BalanceChart {
    let points = schedule
        .iter()
        .map(|row| ChartPoint {
            period: row.period,
            balance: row.balance,
        })
        .collect();

    BalanceChart {
        title: CHART_TITLE.to_string(),
        x_axis_label: period_axis_label(frequency, term_years),
        y_axis_label: BALANCE_AXIS_LABEL.to_string(),
        points,
    }
}

impl BalanceChart {
    /// Plotly-style figure: one `{x, y}` trace plus a layout carrying the
    /// title and axis titles. Balances are emitted as strings to keep
    /// decimal precision.
    pub fn to_figure(&self) -> Value {
        let x: Vec<u32> = self.points.iter().map(|p| p.period).collect();
        let y: Vec<String> = self.points.iter().map(|p| p.balance.to_string()).collect();

        json!({
            "data": [{ "x": x, "y": y }],
            "layout": {
                "title": { "text": self.title, "xanchor": "center" },
                "xaxis": { "title": { "text": self.x_axis_label } },
                "yaxis": { "title": { "text": self.y_axis_label } },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::build_schedule;
    use rust_decimal_macros::dec;

    #[test]
    fn test_axis_label() {
        assert_eq!(
            period_axis_label(RepaymentFrequency::Fortnightly, 25),
            "Number of Fortnightly Payment Periods = 25 years"
        );
    }

    #[test]
    fn test_chart_has_one_point_per_row() {
        let schedule =
            build_schedule(dec!(5000), dec!(0.12), 1, RepaymentFrequency::Weekly).unwrap();
        let chart = balance_chart(&schedule, RepaymentFrequency::Weekly, 1);
        assert_eq!(chart.points.len(), 53);
        assert_eq!(chart.points[0], ChartPoint { period: 0, balance: dec!(5000) });
        assert_eq!(chart.points[1].balance, dec!(4909.39));
        assert_eq!(chart.title, "Loan Amortization Graph");
        assert_eq!(chart.y_axis_label, "Loan Balance");
    }

    #[test]
    fn test_figure_layout() {
        let schedule =
            build_schedule(dec!(12000), dec!(0), 1, RepaymentFrequency::Monthly).unwrap();
        let figure = balance_chart(&schedule, RepaymentFrequency::Monthly, 1).to_figure();
        assert_eq!(figure["layout"]["title"]["text"], "Loan Amortization Graph");
        assert_eq!(
            figure["layout"]["xaxis"]["title"]["text"],
            "Number of Monthly Payment Periods = 1 years"
        );
        assert_eq!(figure["data"][0]["x"].as_array().unwrap().len(), 13);
        assert_eq!(figure["data"][0]["y"][12], "0.00");
    }
}
