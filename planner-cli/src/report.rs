use std::fmt;

use planner_core::{IncomeBreakdown, TaxCalculation};
use serde::Serialize;

use crate::utils::{format_currency, format_percentage};

/// Text rendering of one household's [`TaxCalculation`].
#[derive(Debug, Clone, Copy)]
pub struct TaxReport<'a> {
    pub label: Option<&'a str>,
    pub calculation: &'a TaxCalculation,
}

impl<'a> TaxReport<'a> {
    pub fn new(calculation: &'a TaxCalculation) -> Self {
        Self {
            label: None,
            calculation,
        }
    }

    pub fn with_label(
        mut self,
        label: Option<&'a str>,
    ) -> Self {
        self.label = label;
        self
    }
}

impl fmt::Display for TaxReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let c = self.calculation;
        let title = match self.label {
            Some(label) => format!("Tax Calculation Results: {label}"),
            None => "Tax Calculation Results".to_string(),
        };

        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(title.len()))?;

        let rows = [
            ("Total Income", format_currency(c.total_income)),
            ("Total Deductions", format_currency(c.total_deductions)),
            ("Taxable Income", format_currency(c.taxable_income)),
            ("Federal Tax", format_currency(c.federal_tax)),
            ("State Tax", format_currency(c.state_tax)),
            ("Total Tax", format_currency(c.total_tax())),
            ("Effective Tax Rate", format_percentage(c.effective_tax_rate)),
            ("Take-Home Income", format_currency(c.take_home_income)),
        ];
        for (name, value) in &rows {
            writeln!(f, "{name:<20}{value:>16}")?;
        }

        let breakdown = c.income_breakdown();
        writeln!(f)?;
        writeln!(f, "Income Breakdown")?;
        writeln!(f, "{:<20}{:>16}", "Federal Tax", format_percentage(breakdown.federal_share))?;
        writeln!(f, "{:<20}{:>16}", "State Tax", format_percentage(breakdown.state_share))?;
        writeln!(f, "{:<20}{:>16}", "Take-Home", format_percentage(breakdown.take_home_share))
    }
}

/// Machine-readable form of a report, for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household: Option<&'a str>,
    pub calculation: &'a TaxCalculation,
    pub income_breakdown: IncomeBreakdown,
}

impl<'a> From<TaxReport<'a>> for JsonReport<'a> {
    fn from(report: TaxReport<'a>) -> Self {
        Self {
            household: report.label,
            calculation: report.calculation,
            income_breakdown: report.calculation.income_breakdown(),
        }
    }
}
