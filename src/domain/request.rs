//! Anonymization request model
//!
//! Wire-facing types for the inbound anonymize operation. Field names follow
//! the JSON contract (camelCase) via serde renames; attribute roles and
//! privacy model names are serialized SCREAMING_SNAKE_CASE.

use serde::{Deserialize, Serialize};

/// Role of a dataset column in the declared privacy policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeType {
    /// Directly identifying (name, national id); suppressed wholesale by the engine
    IdentifyingAttribute,
    /// Re-identifying in combination with others; generalized via its hierarchy
    QuasiIdentifyingAttribute,
    /// Sensitive payload (diagnosis, salary); left untouched, guarded by privacy models
    SensitiveAttribute,
    /// Neither identifying nor sensitive; passed through unchanged
    InsensitiveAttribute,
}

/// Declared role and optional generalization hierarchy for one dataset column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Column name, matching the dataset header
    pub field: String,

    /// Role of the column in the privacy policy
    pub attribute_type_model: AttributeType,

    /// Generalization hierarchy table: one row per distinct source value,
    /// columns ordered most-specific (level 0, the value itself) to
    /// most-general. Required for quasi-identifying attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Vec<Vec<String>>>,
}

impl Attribute {
    /// Create an attribute declaration without a hierarchy
    pub fn new(field: impl Into<String>, attribute_type_model: AttributeType) -> Self {
        Self {
            field: field.into(),
            attribute_type_model,
            hierarchy: None,
        }
    }

    /// Attach a generalization hierarchy
    pub fn with_hierarchy(mut self, hierarchy: Vec<Vec<String>>) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Whether this attribute is declared quasi-identifying
    pub fn is_quasi_identifying(&self) -> bool {
        self.attribute_type_model == AttributeType::QuasiIdentifyingAttribute
    }

    /// Whether this attribute carries a usable (non-empty, no empty rows) hierarchy
    pub fn has_usable_hierarchy(&self) -> bool {
        match &self.hierarchy {
            Some(rows) => !rows.is_empty() && rows.iter().all(|row| !row.is_empty()),
            None => false,
        }
    }
}

/// Privacy model constraint, passed through to the engine
///
/// Opaque to the pipeline beyond its name and parameter set; the engine
/// decides satisfaction, the metrics echo the applied models back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "privacyModel")]
pub enum PrivacyModel {
    /// Every quasi-identifier combination must be shared by at least k records
    #[serde(rename = "KANONYMITY")]
    KAnonymity { k: u32 },

    /// Every equivalence class must contain at least l distinct values of the
    /// named sensitive column
    #[serde(rename = "LDIVERSITY", rename_all = "camelCase")]
    LDiversity { l: u32, column_name: String },
}

impl PrivacyModel {
    /// Wire name of the model
    pub fn name(&self) -> &'static str {
        match self {
            Self::KAnonymity { .. } => "KANONYMITY",
            Self::LDiversity { .. } => "LDIVERSITY",
        }
    }
}

/// Inbound anonymization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizationRequest {
    /// Dataset rows; the first row is the header
    pub data: Vec<Vec<String>>,

    /// One declaration per dataset column, in column order
    pub attributes: Vec<Attribute>,

    /// Privacy model constraints the solution must satisfy
    #[serde(default)]
    pub privacy_models: Vec<PrivacyModel>,
}

impl AnonymizationRequest {
    /// The header row, if any data is present
    pub fn header(&self) -> Option<&[String]> {
        self.data.first().map(|row| row.as_slice())
    }

    /// Number of records, excluding the header row
    pub fn record_count(&self) -> usize {
        self.data.len().saturating_sub(1)
    }

    /// Attributes declared quasi-identifying, in column order
    pub fn quasi_identifying(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_quasi_identifying())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gender_attribute() -> Attribute {
        Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute).with_hierarchy(vec![
            vec!["male".to_string(), "*".to_string()],
            vec!["female".to_string(), "*".to_string()],
        ])
    }

    #[test]
    fn test_attribute_type_wire_names() {
        let json = serde_json::to_string(&AttributeType::QuasiIdentifyingAttribute).unwrap();
        assert_eq!(json, "\"QUASI_IDENTIFYING_ATTRIBUTE\"");
        let json = serde_json::to_string(&AttributeType::InsensitiveAttribute).unwrap();
        assert_eq!(json, "\"INSENSITIVE_ATTRIBUTE\"");
    }

    #[test]
    fn test_attribute_serde_roundtrip_field_names() {
        let json = serde_json::to_string(&gender_attribute()).unwrap();
        assert!(json.contains("\"attributeTypeModel\""));
        assert!(json.contains("\"hierarchy\""));
    }

    #[test]
    fn test_attribute_without_hierarchy_omits_key() {
        let attr = Attribute::new("age", AttributeType::IdentifyingAttribute);
        let json = serde_json::to_string(&attr).unwrap();
        assert!(!json.contains("hierarchy"));
    }

    #[test]
    fn test_usable_hierarchy() {
        assert!(gender_attribute().has_usable_hierarchy());

        let no_hierarchy = Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute);
        assert!(!no_hierarchy.has_usable_hierarchy());

        let empty = Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute)
            .with_hierarchy(vec![]);
        assert!(!empty.has_usable_hierarchy());

        let empty_row = Attribute::new("gender", AttributeType::QuasiIdentifyingAttribute)
            .with_hierarchy(vec![vec![]]);
        assert!(!empty_row.has_usable_hierarchy());
    }

    #[test]
    fn test_privacy_model_tagged_serde() {
        let model = PrivacyModel::KAnonymity { k: 2 };
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, "{\"privacyModel\":\"KANONYMITY\",\"k\":2}");

        let parsed: PrivacyModel =
            serde_json::from_str("{\"privacyModel\":\"LDIVERSITY\",\"l\":3,\"columnName\":\"diagnosis\"}")
                .unwrap();
        assert_eq!(
            parsed,
            PrivacyModel::LDiversity {
                l: 3,
                column_name: "diagnosis".to_string()
            }
        );
    }

    #[test]
    fn test_request_missing_privacy_models_defaults_empty() {
        let request: AnonymizationRequest = serde_json::from_str(
            r#"{"data":[["gender"],["male"]],"attributes":[{"field":"gender","attributeTypeModel":"QUASI_IDENTIFYING_ATTRIBUTE"}]}"#,
        )
        .unwrap();
        assert!(request.privacy_models.is_empty());
        assert_eq!(request.record_count(), 1);
    }

    #[test]
    fn test_quasi_identifying_iterator() {
        let request = AnonymizationRequest {
            data: vec![vec!["age".to_string(), "gender".to_string()]],
            attributes: vec![
                Attribute::new("age", AttributeType::IdentifyingAttribute),
                gender_attribute(),
            ],
            privacy_models: vec![PrivacyModel::KAnonymity { k: 2 }],
        };
        let quasi: Vec<_> = request.quasi_identifying().collect();
        assert_eq!(quasi.len(), 1);
        assert_eq!(quasi[0].field, "gender");
    }
}
