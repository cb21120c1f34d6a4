//! Shared test fixtures: a small demographic dataset with gender and zipcode
//! quasi-identifiers, plus request builders for the rejection scenarios.

#![allow(dead_code)]

use cloak::domain::{AnonymizationRequest, Attribute, AttributeType, PrivacyModel};

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Header plus eleven records: age, gender, zipcode
pub fn age_gender_zipcode_data() -> Vec<Vec<String>> {
    vec![
        strings(&["age", "gender", "zipcode"]),
        strings(&["34", "male", "47677"]),
        strings(&["45", "female", "47678"]),
        strings(&["66", "male", "47602"]),
        strings(&["70", "female", "47909"]),
        strings(&["34", "female", "47905"]),
        strings(&["70", "male", "47673"]),
        strings(&["45", "male", "47607"]),
        strings(&["66", "female", "47906"]),
        strings(&["28", "male", "47605"]),
        strings(&["29", "female", "47673"]),
        strings(&["62", "male", "47607"]),
    ]
}

/// Two-level gender hierarchy: value, then fully suppressed
pub fn gender_hierarchy() -> Vec<Vec<String>> {
    vec![strings(&["male", "*"]), strings(&["female", "*"])]
}

/// Two-level zipcode hierarchy: value, then three-digit prefix
pub fn zipcode_hierarchy() -> Vec<Vec<String>> {
    [
        "47677", "47678", "47602", "47909", "47905", "47673", "47607", "47906", "47605",
    ]
    .iter()
    .map(|zipcode| vec![zipcode.to_string(), format!("{}**", &zipcode[..3])])
    .collect()
}

/// Well-formed request: identifying age, quasi-identifying gender and
/// zipcode with hierarchies, one k-anonymity model with k=2
pub fn request_with_two_quasi() -> AnonymizationRequest {
    AnonymizationRequest {
        data: age_gender_zipcode_data(),
        attributes: vec![
            Attribute::new("age", AttributeType::IdentifyingAttribute),
            Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute)
                .with_hierarchy(gender_hierarchy()),
            Attribute::new("zipcode", AttributeType::QuasiIdentifyingAttribute)
                .with_hierarchy(zipcode_hierarchy()),
        ],
        privacy_models: vec![PrivacyModel::KAnonymity { k: 2 }],
    }
}

pub fn request_without_data() -> AnonymizationRequest {
    let mut request = request_with_two_quasi();
    request.data.clear();
    request
}

pub fn request_without_attributes() -> AnonymizationRequest {
    let mut request = request_with_two_quasi();
    request.attributes.clear();
    request
}

pub fn request_without_privacy_models() -> AnonymizationRequest {
    let mut request = request_with_two_quasi();
    request.privacy_models.clear();
    request
}

/// Three attributes declared quasi-identifying while only two carry hierarchies
pub fn request_with_three_quasi_two_hierarchies() -> AnonymizationRequest {
    let mut request = request_with_two_quasi();
    request.attributes[0] = Attribute::new("age", AttributeType::QuasiIdentifyingAttribute);
    request
}

/// The dataset after anonymization: age suppressed, gender kept at level 0,
/// zipcode generalized to its three-digit prefix
pub fn expected_generalized_data() -> Vec<Vec<String>> {
    vec![
        strings(&["age", "gender", "zipcode"]),
        strings(&["*", "male", "476**"]),
        strings(&["*", "female", "476**"]),
        strings(&["*", "male", "476**"]),
        strings(&["*", "female", "479**"]),
        strings(&["*", "female", "479**"]),
        strings(&["*", "male", "476**"]),
        strings(&["*", "male", "476**"]),
        strings(&["*", "female", "479**"]),
        strings(&["*", "male", "476**"]),
        strings(&["*", "female", "476**"]),
        strings(&["*", "male", "476**"]),
    ]
}
