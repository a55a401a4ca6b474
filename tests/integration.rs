//! End-to-end tests for the compensation engine.
//!
//! This suite drives the public API the way an application would:
//! - Factor store backed by a JSON file
//! - Temporary incapacity (ITA) scenarios
//! - Partial permanent incapacity (IPP) scenarios
//! - Death pension scenarios
//! - Reports built from results

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use compensation_engine::calculation::{
    calculate_death_pension, calculate_permanent_incapacity, calculate_temporary_incapacity,
    compute_reference_annual,
};
use compensation_engine::config::{
    DEFAULT_ADMIN_SECRET, DEFAULT_FACTORS_SLOT, FactorConfiguration, FactorKey, FactorRepository,
    FactorStore, JsonFileFactorRepository,
};
use compensation_engine::error::EngineError;
use compensation_engine::models::{
    DeathBeneficiaries, DeathInput, FuneralSubsidyMultiplier, INVALID_DAY_COUNT, IppInput,
    ItaInput, MAX_MONTHLY_AMOUNT, PeriodInput, ReferenceSalaryInput, parse_amount_text,
};
use compensation_engine::report::{death_report, ipp_report, ita_report};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn temp_storage() -> PathBuf {
    std::env::temp_dir()
        .join("compensation-engine-integration")
        .join(format!("{}.json", Uuid::new_v4()))
}

fn admin_store(path: &Path) -> FactorStore<JsonFileFactorRepository> {
    let mut store = FactorStore::open(JsonFileFactorRepository::new(path)).unwrap();
    assert!(store.authenticate(DEFAULT_ADMIN_SECRET));
    store
}

/// Base 100000, allowance 20000, 13 payments: reference 130000.
fn standard_salary() -> ReferenceSalaryInput {
    ReferenceSalaryInput::new(decimal("100000"), decimal("20000"), 13)
}

fn ita_input(hospitalization: PeriodInput, outpatient: PeriodInput) -> ItaInput {
    ItaInput {
        salary: standard_salary(),
        hospitalization,
        outpatient,
    }
}

// =============================================================================
// SECTION 1: Reference Remuneration
// =============================================================================

#[test]
fn test_reference_remuneration_thirteen_payments() {
    assert_eq!(
        compute_reference_annual(decimal("100000"), decimal("20000"), 13),
        decimal("130000")
    );
    assert_eq!(standard_salary().reference_annual(), decimal("130000"));
}

#[test]
fn test_reference_from_typed_amounts() {
    let salary = ReferenceSalaryInput::new(
        parse_amount_text("100.000 Kz"),
        parse_amount_text("20 000"),
        13,
    );
    assert_eq!(salary.reference_annual(), decimal("130000"));
}

/// An amount too long for any field saturates at entry and every calculator
/// still produces a result from it.
#[test]
fn test_oversized_typed_amount_is_capped_for_every_calculator() {
    let oversized = parse_amount_text(&"9".repeat(29));
    let salary = ReferenceSalaryInput::new(oversized, oversized, 12);
    let factors = FactorConfiguration::default();

    assert_eq!(oversized, MAX_MONTHLY_AMOUNT);
    let reference = MAX_MONTHLY_AMOUNT * Decimal::TWO;
    assert_eq!(salary.reference_annual(), reference);

    let ipp = calculate_permanent_incapacity(
        &IppInput::from_factors(salary.clone(), &factors).with_medical_points(100),
    );
    assert_eq!(ipp.reference_annual, reference);
    assert_eq!(ipp.monthly_pension, reference * decimal("0.7"));

    let death = calculate_death_pension(
        &DeathInput {
            claimant_name: String::new(),
            salary: salary.clone(),
            beneficiaries: DeathBeneficiaries {
                has_spouse: true,
                number_of_children: 3,
                has_father: true,
                has_mother: true,
                ..DeathBeneficiaries::from_factors(&factors)
            },
        },
        &factors,
    );
    assert_eq!(death.reference_annual, reference);
    assert!(death.total_indemnity > reference);

    let ita = calculate_temporary_incapacity(
        &ItaInput {
            salary,
            hospitalization: PeriodInput::between(date(1900, 1, 1), date(2099, 12, 31)),
            outpatient: PeriodInput::default(),
        },
        &factors,
    )
    .unwrap();
    assert_eq!(ita.reference_annual, reference);
    assert!(ita.total_indemnity > reference);
}

// =============================================================================
// SECTION 2: Temporary Incapacity (ITA)
// =============================================================================

#[test]
fn test_ita_thirty_hospitalization_days() {
    let input = ita_input(
        PeriodInput::between(date(2024, 3, 1), date(2024, 3, 30)),
        PeriodInput::default(),
    );

    let result = calculate_temporary_incapacity(&input, &FactorConfiguration::default()).unwrap();

    assert_eq!(result.daily_remuneration, decimal("4333.33"));
    assert_eq!(result.hospitalization_days, 30);
    assert_eq!(result.hospitalization_indemnity, decimal("130000.00"));
}

#[test]
fn test_ita_forty_five_hospitalization_days() {
    // 30 × 4333.33... × 1.0 + 15 × 4333.33... × 0.75
    let input = ita_input(
        PeriodInput::between(date(2024, 3, 1), date(2024, 4, 14)),
        PeriodInput::default(),
    );

    let result = calculate_temporary_incapacity(&input, &FactorConfiguration::default()).unwrap();

    assert_eq!(result.hospitalization_days, 45);
    assert_eq!(result.hospitalization_indemnity, decimal("178750.00"));
    assert_eq!(result.total_indemnity, decimal("178750.00"));
}

#[test]
fn test_ita_reversed_period_blocks_calculation() {
    let hospitalization = PeriodInput::between(date(2024, 2, 10), date(2024, 2, 1));
    let input = ita_input(hospitalization, PeriodInput::default());

    assert_eq!(hospitalization.day_count(), INVALID_DAY_COUNT);
    let validation = input.validation();
    assert!(validation.hospitalization_invalid);
    assert!(!validation.outpatient_invalid);
    assert!(!validation.can_calculate());

    match calculate_temporary_incapacity(&input, &FactorConfiguration::default()) {
        Err(EngineError::InvalidPeriod { period, start, end }) => {
            assert_eq!(period, "hospitalization");
            assert_eq!(start, date(2024, 2, 10));
            assert_eq!(end, date(2024, 2, 1));
        }
        other => panic!("Expected InvalidPeriod, got {:?}", other),
    }
}

#[test]
fn test_ita_without_periods_is_zero() {
    let input = ita_input(PeriodInput::default(), PeriodInput::default());

    let result = calculate_temporary_incapacity(&input, &FactorConfiguration::default()).unwrap();

    assert_eq!(result.total_days, 0);
    assert_eq!(result.total_indemnity, Decimal::ZERO);
}

// =============================================================================
// SECTION 3: Partial Permanent Incapacity (IPP)
// =============================================================================

#[test]
fn test_ipp_statutory_pension() {
    let input = IppInput::from_factors(standard_salary(), &FactorConfiguration::default())
        .with_medical_points(50);

    let result = calculate_permanent_incapacity(&input);

    assert_eq!(result.reference_annual, decimal("130000"));
    assert_eq!(result.monthly_pension, decimal("45500"));
}

#[test]
fn test_ipp_entry_clamps_rates() {
    let input = IppInput::from_factors(standard_salary(), &FactorConfiguration::default())
        .with_decree_factor(decimal("1.8"))
        .with_medical_points(250);

    let result = calculate_permanent_incapacity(&input);

    assert_eq!(result.decree_factor, Decimal::ONE);
    assert_eq!(result.medical_ipp, Decimal::ONE);
    assert_eq!(result.monthly_pension, decimal("130000"));
}

// =============================================================================
// SECTION 4: Death Pension
// =============================================================================

#[test]
fn test_death_additivity_ignores_multipliers() {
    let factors = FactorConfiguration::default();
    let beneficiaries = DeathBeneficiaries {
        has_spouse: true,
        number_of_children: 2,
        has_mother: true,
        ..DeathBeneficiaries::from_factors(&factors)
    };
    let salary = ReferenceSalaryInput::new(decimal("100000"), Decimal::ZERO, 12);

    let baseline = calculate_death_pension(
        &DeathInput {
            claimant_name: String::new(),
            salary: salary.clone(),
            beneficiaries: beneficiaries.clone(),
        },
        &factors,
    );
    let alternative = calculate_death_pension(
        &DeathInput {
            claimant_name: String::new(),
            salary,
            beneficiaries: DeathBeneficiaries {
                funeral_subsidy_multiplier: FuneralSubsidyMultiplier::Four,
                ..beneficiaries
            },
        },
        &factors,
    );

    assert_eq!(baseline.monthly_pension_total, decimal("80000"));
    assert_eq!(alternative.monthly_pension_total, decimal("80000"));
    assert_eq!(baseline.funeral_subsidy, decimal("200000"));
    assert_eq!(alternative.funeral_subsidy, decimal("400000"));
}

#[test]
fn test_death_children_tiers() {
    let factors = FactorConfiguration::default();
    let with_children = |count: u32| {
        calculate_death_pension(
            &DeathInput {
                claimant_name: String::new(),
                salary: ReferenceSalaryInput::new(decimal("100000"), Decimal::ZERO, 12),
                beneficiaries: DeathBeneficiaries {
                    number_of_children: count,
                    ..DeathBeneficiaries::default()
                },
            },
            &factors,
        )
    };

    assert_eq!(with_children(2).children.amount, decimal("40000"));
    assert_eq!(with_children(3).children, with_children(10).children);
}

// =============================================================================
// SECTION 5: Factor Store
// =============================================================================

#[test]
fn test_store_update_is_persisted_and_reloaded() {
    let path = temp_storage();

    let mut store = admin_store(&path);
    let stored = store.update(FactorKey::PensionParent, decimal("0.15")).unwrap();
    assert_eq!(stored, decimal("0.15"));
    assert_eq!(store.get().pension_parent, decimal("0.15"));

    let reopened = FactorStore::open(JsonFileFactorRepository::new(&path)).unwrap();
    assert_eq!(reopened.get().pension_parent, decimal("0.15"));
    assert_eq!(reopened.get().pension_spouse, decimal("0.3"));
    assert!(!reopened.is_admin());

    fs::remove_file(path).ok();
}

#[test]
fn test_store_update_changes_next_calculation() {
    let path = temp_storage();
    let mut store = admin_store(&path);
    let input = IppInput::from_factors(standard_salary(), store.get()).with_medical_points(50);
    assert_eq!(calculate_permanent_incapacity(&input).monthly_pension, decimal("45500"));

    store.update_by_name("ippDecretoDefault", decimal("0.8")).unwrap();

    let input = IppInput::from_factors(standard_salary(), store.get()).with_medical_points(50);
    assert_eq!(calculate_permanent_incapacity(&input).monthly_pension, decimal("52000"));

    fs::remove_file(path).ok();
}

#[test]
fn test_store_reset_clears_slot() {
    let path = temp_storage();
    let mut store = admin_store(&path);
    store.update(FactorKey::ItaOutpatientRate, decimal("0.7")).unwrap();
    assert!(store.repository().load().unwrap().is_some());

    store.reset().unwrap();

    assert_eq!(store.get(), &FactorConfiguration::default());
    assert!(store.repository().load().unwrap().is_none());
    let reopened = FactorStore::open(JsonFileFactorRepository::new(&path)).unwrap();
    assert_eq!(reopened.get(), &FactorConfiguration::default());

    fs::remove_file(path).ok();
}

#[test]
fn test_store_rejects_wrong_secret() {
    let path = temp_storage();
    let mut store = FactorStore::open(JsonFileFactorRepository::new(&path)).unwrap();

    assert!(!store.authenticate("admin2026"));
    assert!(matches!(
        store.update(FactorKey::PensionParent, decimal("0.2")),
        Err(EngineError::AdminRequired)
    ));
    assert!(!path.exists());
}

#[test]
fn test_store_clamps_at_editing_boundary() {
    let path = temp_storage();
    let mut store = admin_store(&path);

    assert_eq!(
        store.update(FactorKey::PensionSpouse, decimal("1.4")).unwrap(),
        Decimal::ONE
    );
    assert_eq!(
        store.update(FactorKey::ItaDailyDivisor, decimal("0")).unwrap(),
        Decimal::ONE
    );
    assert_eq!(store.get().ita_daily_divisor.get(), 1);

    fs::remove_file(path).ok();
}

#[test]
fn test_store_tolerates_partial_persisted_document() {
    let path = temp_storage();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        json!({
            DEFAULT_FACTORS_SLOT: {
                "itaAmbulatorio": 0.6,
                "legacyKey": 3,
                "pensaoPais": "not a number"
            }
        })
        .to_string(),
    )
    .unwrap();

    let store = FactorStore::open(JsonFileFactorRepository::new(&path)).unwrap();

    assert_eq!(store.get().ita_outpatient_rate, decimal("0.6"));
    assert_eq!(store.get().pension_parent, decimal("0.1"));
    assert_eq!(store.get().ita_hospitalization_day_limit, 30);

    fs::remove_file(path).ok();
}

#[test]
fn test_store_ignores_corrupt_file() {
    let path = temp_storage();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();

    let mut store = FactorStore::open(JsonFileFactorRepository::new(&path)).unwrap();
    assert_eq!(store.get(), &FactorConfiguration::default());

    assert!(store.authenticate(DEFAULT_ADMIN_SECRET));
    store.update(FactorKey::PensionOneChild, decimal("0.25")).unwrap();
    let reopened = FactorStore::open(JsonFileFactorRepository::new(&path)).unwrap();
    assert_eq!(reopened.get().pension_one_child, decimal("0.25"));

    fs::remove_file(path).ok();
}

// =============================================================================
// SECTION 6: Idempotence
// =============================================================================

#[test]
fn test_identical_inputs_give_identical_results() {
    let factors = FactorConfiguration::default();

    let ita = ita_input(
        PeriodInput::between(date(2024, 1, 1), date(2024, 2, 15)),
        PeriodInput::between(date(2024, 2, 16), date(2024, 3, 1)),
    );
    assert_eq!(
        calculate_temporary_incapacity(&ita, &factors).unwrap(),
        calculate_temporary_incapacity(&ita, &factors).unwrap()
    );

    let ipp = IppInput::from_factors(standard_salary(), &factors).with_medical_points(35);
    assert_eq!(
        calculate_permanent_incapacity(&ipp),
        calculate_permanent_incapacity(&ipp)
    );

    let death = DeathInput {
        claimant_name: String::new(),
        salary: standard_salary(),
        beneficiaries: DeathBeneficiaries {
            has_former_spouse: true,
            has_father: true,
            number_of_children: 1,
            ..DeathBeneficiaries::default()
        },
    };
    assert_eq!(
        calculate_death_pension(&death, &factors),
        calculate_death_pension(&death, &factors)
    );
}

// =============================================================================
// SECTION 7: Reports
// =============================================================================

#[test]
fn test_reports_from_results() {
    let factors = FactorConfiguration::default();

    let ita = ita_input(
        PeriodInput::between(date(2024, 3, 1), date(2024, 3, 30)),
        PeriodInput::between(date(2024, 3, 31), date(2024, 4, 9)),
    );
    let ita_result = calculate_temporary_incapacity(&ita, &factors).unwrap();
    let report = ita_report(&ita, &ita_result);
    let results = report.results().unwrap();
    assert_eq!(results.row("Total days").unwrap().value, "40 days");
    assert_eq!(
        results.row("Total ITA indemnity").unwrap().value,
        "158 167 Kz"
    );

    let ipp = IppInput::from_factors(standard_salary(), &factors)
        .with_claimant_name("Maria Silva")
        .with_medical_points(50);
    let report = ipp_report(&ipp, &calculate_permanent_incapacity(&ipp));
    assert_eq!(report.claimant_name.as_deref(), Some("Maria Silva"));

    let death = DeathInput::from_factors(standard_salary(), &factors);
    let report = death_report(&death, &calculate_death_pension(&death, &factors));
    assert_eq!(
        report.results().unwrap().row("Total indemnity").unwrap().value,
        "1 040 000 Kz"
    );
}
