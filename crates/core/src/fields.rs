use serde::{Deserialize, Serialize};

/// The fields pulled out of one recognized document.
///
/// Serializes to a flat JSON object whose keys are the display labels
/// (`"ID Type"`, `"Last Name"`, …). A field that did not match is absent
/// from the output — never present with an empty value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentFields {
    #[serde(rename = "ID Type", skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
    #[serde(rename = "Last Name", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "First Name", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Nationality", skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(rename = "Passport Number", skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(rename = "DL Number", skip_serializing_if = "Option::is_none")]
    pub dl_number: Option<String>,
    #[serde(rename = "Gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "DOB", skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(rename = "Place of Birth", skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    #[serde(rename = "Date of Issue", skip_serializing_if = "Option::is_none")]
    pub date_of_issue: Option<String>,
    #[serde(rename = "Expiry Date", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(rename = "Address Line 1", skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(rename = "Address Line 2", skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
}

impl DocumentFields {
    /// Matched entries as `(label, value)` pairs, in the fixed vocabulary
    /// order used for rendering.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("ID Type", &self.id_type),
            ("Last Name", &self.last_name),
            ("First Name", &self.first_name),
            ("Name", &self.name),
            ("Nationality", &self.nationality),
            ("Passport Number", &self.passport_number),
            ("DL Number", &self.dl_number),
            ("Gender", &self.gender),
            ("DOB", &self.dob),
            ("Place of Birth", &self.place_of_birth),
            ("Date of Issue", &self.date_of_issue),
            ("Expiry Date", &self.expiry_date),
            ("Address Line 1", &self.address_line_1),
            ("Address Line 2", &self.address_line_2),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
    }

    /// Number of fields that matched.
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// True when no rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_flat_object_with_display_labels() {
        let fields = DocumentFields {
            id_type: Some("PASSPORT".into()),
            last_name: Some("SMITH".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["ID Type"], "PASSPORT");
        assert_eq!(json["Last Name"], "SMITH");
        // Unmatched fields must not appear at all.
        assert!(json.get("Gender").is_none());
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn entries_follow_vocabulary_order() {
        let fields = DocumentFields {
            gender: Some("M".into()),
            id_type: Some("LICENSE".into()),
            dl_number: Some("W123456".into()),
            ..Default::default()
        };
        let labels: Vec<&str> = fields.entries().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["ID Type", "DL Number", "Gender"]);
    }

    #[test]
    fn empty_mapping_reports_empty() {
        let fields = DocumentFields::default();
        assert!(fields.is_empty());
        assert_eq!(fields.len(), 0);
        assert_eq!(serde_json::to_string(&fields).unwrap(), "{}");
    }
}
