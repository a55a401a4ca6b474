//! Report documents built from calculation results.
//!
//! A [`Report`] is the content a drawing backend lays out: a title, the
//! input data, the results and a disclaimer. Values are already formatted
//! for display.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    BeneficiaryShare, DeathInput, DeathResult, IppInput, IppResult, ItaInput, ItaResult,
    PeriodInput, ReferenceSalaryInput,
};

use super::format::{
    format_currency, format_date, format_date_time, format_percentage, rate_label,
};

/// Title of the section listing the inputs.
pub const INPUT_SECTION_TITLE: &str = "Input data";

/// Title of the section listing the results.
pub const RESULTS_SECTION_TITLE: &str = "Results";

/// Disclaimer printed at the foot of every report.
pub const DISCLAIMER: &str =
    "This document is indicative only and does not constitute a contractual commitment.";

/// The calculator a report was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Temporary absolute incapacity (ITA).
    TemporaryIncapacity,
    /// Partial permanent incapacity (IPP).
    PermanentIncapacity,
    /// Death pension.
    DeathPension,
}

impl ReportKind {
    /// Returns the report title.
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::TemporaryIncapacity => "ITA - Temporary Absolute Incapacity",
            ReportKind::PermanentIncapacity => "IPP Pension - Partial Permanent Incapacity",
            ReportKind::DeathPension => "Death Pension",
        }
    }

    /// Returns a file name stem for exported documents.
    pub fn file_stem(self) -> &'static str {
        match self {
            ReportKind::TemporaryIncapacity => "ita",
            ReportKind::PermanentIncapacity => "ipp-pension",
            ReportKind::DeathPension => "death-pension",
        }
    }
}

/// One labelled value in a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Row label.
    pub label: String,
    /// Formatted value.
    pub value: String,
    /// Whether the row is emphasized (reference remuneration and totals).
    pub highlight: bool,
}

impl ReportRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            highlight: false,
        }
    }

    fn highlighted(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            highlight: true,
            ..Self::new(label, value)
        }
    }
}

/// A titled group of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section title.
    pub title: String,
    /// Rows in display order.
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    /// Finds a row by its label.
    pub fn row(&self, label: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}

/// A report document for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Unique report identifier.
    pub id: Uuid,
    /// The calculator the report comes from.
    pub kind: ReportKind,
    /// Document title.
    pub title: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Claimant name, when one was entered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimant_name: Option<String>,
    /// Input and result sections, in display order.
    pub sections: Vec<ReportSection>,
    /// Footer disclaimer.
    pub disclaimer: String,
}

impl Report {
    fn new(kind: ReportKind, claimant_name: &str, sections: Vec<ReportSection>) -> Self {
        let claimant_name = claimant_name.trim();
        Self {
            id: Uuid::new_v4(),
            kind,
            title: kind.title().to_string(),
            generated_at: Utc::now(),
            claimant_name: (!claimant_name.is_empty()).then(|| claimant_name.to_string()),
            sections,
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Finds a section by its title.
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.title == title)
    }

    /// Returns the input data section.
    pub fn inputs(&self) -> Option<&ReportSection> {
        self.section(INPUT_SECTION_TITLE)
    }

    /// Returns the results section.
    pub fn results(&self) -> Option<&ReportSection> {
        self.section(RESULTS_SECTION_TITLE)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Date/Time: {}", format_date_time(self.generated_at))?;
        if let Some(name) = &self.claimant_name {
            writeln!(f, "Claimant: {}", name)?;
        }
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            for row in &section.rows {
                let marker = if row.highlight { "*" } else { " " };
                writeln!(f, "{} {:<40} {:>20}", marker, row.label, row.value)?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.disclaimer)
    }
}

fn salary_rows(section: &mut ReportSection, salary: &ReferenceSalaryInput) {
    section.push(ReportRow::new(
        "Monthly base salary",
        format_currency(salary.base_salary_monthly),
    ));
    section.push(ReportRow::new(
        "Monthly fixed allowance",
        format_currency(salary.fixed_allowance_monthly),
    ));
    section.push(ReportRow::new(
        "Payments per year",
        salary.payments_per_year.to_string(),
    ));
}

fn reference_row(reference_annual: Decimal) -> ReportRow {
    ReportRow::highlighted("Reference remuneration", format_currency(reference_annual))
}

fn period_value(period: &PeriodInput) -> String {
    format!("{} to {}", format_date(period.start), format_date(period.end))
}

fn days_value(days: u32) -> String {
    format!("{} days", days)
}

fn presence(present: bool) -> &'static str {
    if present { "Yes" } else { "No" }
}

fn spouse_presence(present: bool, at_retirement_age: bool) -> &'static str {
    match (present, at_retirement_age) {
        (true, true) => "Yes (retirement age)",
        (true, false) => "Yes",
        (false, _) => "No",
    }
}

fn share_row(section: &mut ReportSection, label: String, share: &BeneficiaryShare) {
    if share.is_granted() {
        section.push(ReportRow::new(label, format_currency(share.amount)));
    }
}

/// Builds the temporary incapacity report.
///
/// Periods appear only when a start date was entered; day and indemnity rows
/// only when the period counts at least one day.
pub fn ita_report(input: &ItaInput, result: &ItaResult) -> Report {
    let mut inputs = ReportSection::new(INPUT_SECTION_TITLE);
    salary_rows(&mut inputs, &input.salary);
    if input.hospitalization.start.is_some() {
        inputs.push(ReportRow::new(
            "Hospitalization period",
            period_value(&input.hospitalization),
        ));
    }
    if input.outpatient.start.is_some() {
        inputs.push(ReportRow::new("Outpatient period", period_value(&input.outpatient)));
    }

    let mut results = ReportSection::new(RESULTS_SECTION_TITLE);
    results.push(reference_row(result.reference_annual));
    results.push(ReportRow::new(
        "Daily remuneration",
        format_currency(result.daily_remuneration),
    ));
    if result.hospitalization_days > 0 {
        results.push(ReportRow::new(
            "Hospitalization days",
            days_value(result.hospitalization_days),
        ));
        results.push(ReportRow::new(
            "Hospitalization indemnity",
            format_currency(result.hospitalization_indemnity),
        ));
    }
    if result.outpatient_days > 0 {
        results.push(ReportRow::new("Outpatient days", days_value(result.outpatient_days)));
        results.push(ReportRow::new(
            format!("Outpatient indemnity ({})", rate_label(result.outpatient_rate)),
            format_currency(result.outpatient_indemnity),
        ));
    }
    results.push(ReportRow::highlighted("Total days", days_value(result.total_days)));
    results.push(ReportRow::highlighted(
        "Total ITA indemnity",
        format_currency(result.total_indemnity),
    ));

    Report::new(ReportKind::TemporaryIncapacity, "", vec![inputs, results])
}

/// Builds the partial permanent incapacity report.
pub fn ipp_report(input: &IppInput, result: &IppResult) -> Report {
    let mut inputs = ReportSection::new(INPUT_SECTION_TITLE);
    salary_rows(&mut inputs, &input.salary);
    inputs.push(ReportRow::new("Decree factor", format_percentage(result.decree_factor)));
    inputs.push(ReportRow::new("Medical IPP", format_percentage(result.medical_ipp)));

    let mut results = ReportSection::new(RESULTS_SECTION_TITLE);
    results.push(reference_row(result.reference_annual));
    results.push(ReportRow::new(
        "Formula",
        format!(
            "{} × {} × {}",
            format_currency(result.reference_annual),
            result.decree_factor.normalize(),
            result.medical_ipp.normalize()
        ),
    ));
    results.push(ReportRow::highlighted(
        "Monthly IPP pension",
        format_currency(result.monthly_pension),
    ));

    Report::new(
        ReportKind::PermanentIncapacity,
        &input.claimant_name,
        vec![inputs, results],
    )
}

/// Builds the death pension report.
///
/// Beneficiary rows appear only for categories that draw a share, labelled
/// with the rate applied.
pub fn death_report(input: &DeathInput, result: &DeathResult) -> Report {
    let beneficiaries = &input.beneficiaries;
    let death_multiplier = beneficiaries.death_subsidy_multiplier.value();
    let funeral_multiplier = beneficiaries.funeral_subsidy_multiplier.value();

    let mut inputs = ReportSection::new(INPUT_SECTION_TITLE);
    salary_rows(&mut inputs, &input.salary);
    inputs.push(ReportRow::new(
        "Spouse",
        spouse_presence(beneficiaries.has_spouse, beneficiaries.spouse_at_retirement_age),
    ));
    inputs.push(ReportRow::new(
        "Former spouse",
        spouse_presence(
            beneficiaries.has_former_spouse,
            beneficiaries.former_spouse_at_retirement_age,
        ),
    ));
    inputs.push(ReportRow::new(
        "Number of children",
        beneficiaries.number_of_children.to_string(),
    ));
    inputs.push(ReportRow::new("Father", presence(beneficiaries.has_father)));
    inputs.push(ReportRow::new("Mother", presence(beneficiaries.has_mother)));
    inputs.push(ReportRow::new(
        "Death subsidy multiplier",
        format!("×{}", death_multiplier),
    ));
    inputs.push(ReportRow::new(
        "Funeral subsidy multiplier",
        format!("×{}", funeral_multiplier),
    ));

    let mut results = ReportSection::new(RESULTS_SECTION_TITLE);
    results.push(reference_row(result.reference_annual));
    share_row(
        &mut results,
        format!("Spouse ({})", rate_label(result.spouse.rate)),
        &result.spouse,
    );
    share_row(
        &mut results,
        format!("Former spouse ({})", rate_label(result.former_spouse.rate)),
        &result.former_spouse,
    );
    share_row(
        &mut results,
        format!("Children ({})", beneficiaries.number_of_children),
        &result.children,
    );
    share_row(
        &mut results,
        format!("Father ({})", rate_label(result.father.rate)),
        &result.father,
    );
    share_row(
        &mut results,
        format!("Mother ({})", rate_label(result.mother.rate)),
        &result.mother,
    );
    results.push(ReportRow::highlighted(
        "Monthly pension total",
        format_currency(result.monthly_pension_total),
    ));
    results.push(ReportRow::new(
        format!("Death subsidy (×{})", death_multiplier),
        format_currency(result.death_subsidy),
    ));
    results.push(ReportRow::new(
        format!("Funeral subsidy (×{})", funeral_multiplier),
        format_currency(result.funeral_subsidy),
    ));
    results.push(ReportRow::highlighted(
        "Total indemnity",
        format_currency(result.total_indemnity),
    ));

    Report::new(
        ReportKind::DeathPension,
        &input.claimant_name,
        vec![inputs, results],
    )
}
