use crate::autocomplete::CommittedCriteria;
use serde::{Deserialize, Serialize};

/// Colors offered by the color select. Empty selection means "any".
pub(crate) const COLORS: [&str; 10] = [
    "Black", "White", "Silver", "Gray", "Red", "Blue", "Green", "Yellow", "Orange", "Brown",
];

/// Longest advanced query shown verbatim in the search summary.
pub(crate) const QUERY_PREVIEW_CHARS: usize = 100;

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SearchMode {
    #[default]
    Simple,
    Advanced,
}

/// Everything sent to `/api/search` besides the media itself.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SearchCriteria {
    pub make: String,
    pub model: String,
    pub color: String,
    #[serde(rename = "licensePlate")]
    pub license_plate: String,
    /// Free-text description (advanced mode only).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query: String,
}

impl SearchCriteria {
    /// Simple mode: committed make/model, never the draft text in the inputs.
    pub fn simple(committed: &CommittedCriteria, color: &str, license_plate: &str) -> Self {
        Self {
            make: committed.make.clone(),
            model: committed.model.clone(),
            color: color.to_string(),
            license_plate: license_plate.trim().to_string(),
            query: String::new(),
        }
    }

    /// Advanced mode keeps the structured fields (the backend builds its
    /// prompt from them) and adds the description as `query`.
    pub fn advanced(
        committed: &CommittedCriteria,
        color: &str,
        license_plate: &str,
        description: &str,
    ) -> Self {
        Self {
            query: description.trim().to_string(),
            ..Self::simple(committed, color, license_plate)
        }
    }

    /// Multipart text fields, in the order the backend documents them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("make", self.make.clone()),
            ("model", self.model.clone()),
            ("color", self.color.clone()),
            ("licensePlate", self.license_plate.clone()),
        ];
        if !self.query.is_empty() {
            fields.push(("query", self.query.clone()));
        }
        fields
    }

    /// "Searching for:" chips: color, make, model, plate, skipping blanks.
    pub fn summary_chips(&self) -> Vec<String> {
        let mut chips: Vec<String> = [&self.color, &self.make, &self.model]
            .into_iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect();
        if !self.license_plate.is_empty() {
            chips.push(format!("Plate: {}", self.license_plate));
        }
        chips
    }
}

/// Shortens an advanced query for display: at most [`QUERY_PREVIEW_CHARS`]
/// characters, with "..." appended when cut.
pub(crate) fn query_preview(text: &str) -> String {
    match text.char_indices().nth(QUERY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// A selected media file, read into memory for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MediaUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Browsers report an empty type for some containers (`.mkv`, some `.mov`),
/// so only a known non-media type is refused.
pub(crate) fn is_uploadable_mime(mime: &str) -> bool {
    mime.is_empty() || MediaKind::from_mime(mime).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed(make: &str, model: &str) -> CommittedCriteria {
        CommittedCriteria {
            make: make.to_string(),
            model: model.to_string(),
        }
    }

    #[test]
    fn test_simple_criteria_uses_committed_values() {
        let c = SearchCriteria::simple(&committed("Toyota", "Camry"), "Silver", "  ABC 123 ");
        assert_eq!(c.make, "Toyota");
        assert_eq!(c.model, "Camry");
        assert_eq!(c.license_plate, "ABC 123");
        assert!(c.query.is_empty());
    }

    #[test]
    fn test_advanced_criteria_keeps_structured_fields() {
        let c = SearchCriteria::advanced(
            &committed("Ford", "F-150"),
            "Red",
            "",
            " red pickup near the gate ",
        );
        assert_eq!(c.make, "Ford");
        assert_eq!(c.model, "F-150");
        assert_eq!(c.color, "Red");
        assert_eq!(c.query, "red pickup near the gate");
    }

    #[test]
    fn test_form_fields_match_backend_names() {
        let c = SearchCriteria {
            make: "Ford".to_string(),
            color: "Red".to_string(),
            ..SearchCriteria::default()
        };
        let names: Vec<&str> = c.form_fields().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["make", "model", "color", "licensePlate"]);

        let adv = SearchCriteria::advanced(&committed("", ""), "", "", "white van");
        let fields = adv.form_fields();
        assert_eq!(fields.last().map(|(n, v)| (*n, v.as_str())), Some(("query", "white van")));
    }

    #[test]
    fn test_criteria_serialization_uses_camel_case_plate() {
        let c = SearchCriteria {
            license_plate: "XYZ".to_string(),
            ..SearchCriteria::default()
        };
        let v = serde_json::to_value(c).expect("should serialize");
        assert_eq!(v["licensePlate"], "XYZ");
        assert!(v.get("query").is_none());
    }

    #[test]
    fn test_summary_chips_order_and_plate_label() {
        let c = SearchCriteria::simple(&committed("Toyota", ""), "Silver", "ABC 123");
        assert_eq!(c.summary_chips(), vec!["Silver", "Toyota", "Plate: ABC 123"]);

        assert!(SearchCriteria::default().summary_chips().is_empty());
    }

    #[test]
    fn test_query_preview_cuts_after_100_chars() {
        let short = "a".repeat(99);
        assert_eq!(query_preview(&short), short);

        let exact = "b".repeat(100);
        assert_eq!(query_preview(&exact), exact);

        let long = format!("{}c", "b".repeat(100));
        assert_eq!(query_preview(&long), format!("{}...", "b".repeat(100)));
    }

    #[test]
    fn test_query_preview_counts_chars_not_bytes() {
        let text = "é".repeat(101);
        assert_eq!(query_preview(&text), format!("{}...", "é".repeat(100)));
    }

    #[test]
    fn test_uploadable_mime() {
        assert!(is_uploadable_mime(""));
        assert!(is_uploadable_mime("video/mp4"));
        assert!(is_uploadable_mime("image/png"));
        assert!(!is_uploadable_mime("application/pdf"));
        assert_eq!(MediaKind::from_mime("video/quicktime"), Some(MediaKind::Video));
        assert_eq!(SearchMode::Advanced.to_string(), "advanced");
    }
}
