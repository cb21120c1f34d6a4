//! Re-identification risk measures
//!
//! Prosecutor-model risk computed from the sizes of the equivalence classes
//! induced by the quasi-identifier columns: a record's re-identification
//! probability under the prosecutor attack is the reciprocal of its class
//! size. Measures are keyed by the domain's conventional snake_case names.

use std::collections::BTreeMap;
use std::collections::HashMap;

/// Measure key: highest per-record prosecutor risk in the dataset
pub const HIGHEST_PROSECUTOR_RISK: &str = "highest_prosecutor_risk";

/// Measure key: fraction of records carrying the highest prosecutor risk
pub const RECORDS_AFFECTED_BY_HIGHEST_PROSECUTOR_RISK: &str =
    "records_affected_by_highest_prosecutor_risk";

/// Measure key: lowest per-record prosecutor risk in the dataset
pub const LOWEST_PROSECUTOR_RISK: &str = "lowest_prosecutor_risk";

/// Measure key: fraction of records carrying the lowest prosecutor risk
pub const RECORDS_AFFECTED_BY_LOWEST_PROSECUTOR_RISK: &str =
    "records_affected_by_lowest_prosecutor_risk";

/// Measure key: average per-record prosecutor risk
pub const AVERAGE_PROSECUTOR_RISK: &str = "average_prosecutor_risk";

/// Measure key: fraction of records unique on their quasi-identifiers
pub const SAMPLE_UNIQUES: &str = "sample_uniques";

/// Measure key: fraction of records suppressed to reach compliance
pub const SUPPRESSED_RECORDS_RATIO: &str = "suppressed_records_ratio";

/// Sizes of the equivalence classes induced by the given columns
///
/// Rows sharing the same projection onto `quasi_columns` fall into the same
/// class. With no quasi-identifier columns every row shares one class.
pub fn equivalence_class_sizes(rows: &[Vec<String>], quasi_columns: &[usize]) -> Vec<usize> {
    let mut classes: HashMap<Vec<&str>, usize> = HashMap::new();
    for row in rows {
        let key: Vec<&str> = quasi_columns
            .iter()
            .filter_map(|&column| row.get(column).map(String::as_str))
            .collect();
        *classes.entry(key).or_insert(0) += 1;
    }
    classes.into_values().collect()
}

/// Named prosecutor-risk measures for a generalized dataset
///
/// `class_sizes` describes the kept (non-suppressed) records; `suppressed`
/// counts records removed to reach compliance. Record fractions are relative
/// to the total record count, kept plus suppressed. An empty dataset yields
/// all-zero measures.
pub fn prosecutor_risk_measures(class_sizes: &[usize], suppressed: usize) -> BTreeMap<String, f64> {
    let kept: usize = class_sizes.iter().sum();
    let total = kept + suppressed;
    let mut measures = BTreeMap::new();

    let (highest, lowest, affected_highest, affected_lowest, uniques) = if class_sizes.is_empty() {
        (0.0, 0.0, 0, 0, 0)
    } else {
        let min = *class_sizes.iter().min().unwrap_or(&0);
        let max = *class_sizes.iter().max().unwrap_or(&0);
        let affected_min: usize = class_sizes.iter().filter(|&&s| s == min).sum();
        let affected_max: usize = class_sizes.iter().filter(|&&s| s == max).sum();
        let uniques: usize = class_sizes.iter().filter(|&&s| s == 1).sum();
        (
            1.0 / min as f64,
            1.0 / max as f64,
            affected_min,
            affected_max,
            uniques,
        )
    };

    let ratio = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };
    let average = if kept == 0 {
        0.0
    } else {
        class_sizes.len() as f64 / kept as f64
    };

    measures.insert(HIGHEST_PROSECUTOR_RISK.to_string(), highest);
    measures.insert(
        RECORDS_AFFECTED_BY_HIGHEST_PROSECUTOR_RISK.to_string(),
        ratio(affected_highest),
    );
    measures.insert(LOWEST_PROSECUTOR_RISK.to_string(), lowest);
    measures.insert(
        RECORDS_AFFECTED_BY_LOWEST_PROSECUTOR_RISK.to_string(),
        ratio(affected_lowest),
    );
    measures.insert(AVERAGE_PROSECUTOR_RISK.to_string(), average);
    measures.insert(SAMPLE_UNIQUES.to_string(), ratio(uniques));
    measures.insert(SUPPRESSED_RECORDS_RATIO.to_string(), ratio(suppressed));

    measures
}
