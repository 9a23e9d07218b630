//! Known category labels with curated display forms.

use std::collections::BTreeMap;

/// Curated translations of the most common donation categories.
pub const BUILTIN_LABELS: [(&str, &str); 15] = [
    ("أيتام خارج الدولة", "Orphans Outside the Country"),
    ("سقيا الماء", "Water Supply"),
    ("ادعم طفلا", "Support a Child"),
    ("أمل جديد", "New Hope"),
    ("كفالة يتيم", "Orphan Sponsorship"),
    ("صدقة جارية", "Ongoing Charity"),
    ("بناء مسجد", "Mosque Construction"),
    ("زكاة المال", "Zakat al-Mal"),
    ("إفطار صائم", "Breaking Fast for Fasting Person"),
    ("كسوة العيد", "Eid Clothing"),
    ("علاج مريض", "Patient Treatment"),
    ("بناء بئر", "Well Construction"),
    ("مساعدة عائلة", "Family Assistance"),
    ("تعليم طالب", "Student Education"),
    ("دعم مشروع", "Project Support"),
];

/// Label table consulted before any external call. Keys are exact source labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLabels {
    entries: BTreeMap<String, String>,
}

impl StaticLabels {
    /// The curated table.
    pub fn builtin() -> Self {
        let entries = BUILTIN_LABELS
            .iter()
            .map(|(source, display)| ((*source).to_string(), (*display).to_string()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn insert(&mut self, source: impl Into<String>, display: impl Into<String>) {
        self.entries.insert(source.into(), display.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge a JSON object of `"source": "display"` pairs, replacing existing
    /// entries. Pairs with an empty side are ignored. Returns the number merged.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let overrides: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut merged = 0;
        for (source, display) in overrides {
            if source.is_empty() || display.trim().is_empty() {
                continue;
            }
            self.entries.insert(source, display);
            merged += 1;
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table() {
        let labels = StaticLabels::builtin();
        assert_eq!(labels.len(), 15);
        assert_eq!(labels.get("سقيا الماء"), Some("Water Supply"));
        assert_eq!(labels.get("كفالة يتيم"), Some("Orphan Sponsorship"));
        assert_eq!(labels.get(" سقيا الماء"), None);
    }

    #[test]
    fn json_overrides_replace_and_extend() {
        let mut labels = StaticLabels::builtin();
        let merged = labels
            .extend_from_json(r#"{"سقيا الماء": "Water Wells", "وقف": "Endowment", "": "x"}"#)
            .unwrap();
        assert_eq!(merged, 2);
        assert_eq!(labels.get("سقيا الماء"), Some("Water Wells"));
        assert_eq!(labels.get("وقف"), Some("Endowment"));
        assert_eq!(labels.len(), 16);
    }

    #[test]
    fn json_overrides_must_be_an_object_of_strings() {
        let mut labels = StaticLabels::default();
        assert!(labels.extend_from_json("[1, 2]").is_err());
        assert!(labels.is_empty());
    }
}
