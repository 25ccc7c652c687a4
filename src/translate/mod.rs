//! Category and subcategory label translation.
//!
//! A [`Translator`] owns an immutable lookup table built once at startup and
//! is passed to whatever needs translated labels. Lookups trim the input and
//! match exactly; labels without an entry come back unchanged.

mod table;

use crate::models::CodedRecord;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Label lookup from the source vocabulary to the target vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    table: HashMap<String, String>,
}

impl Translator {
    /// Create a translator from `(source, target)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table = entries
            .into_iter()
            .map(|(source, target)| (source.into().trim().to_string(), target.into()))
            .collect();

        Self { table }
    }

    /// The built-in Portuguese to English table.
    pub fn builtin() -> Self {
        Self::from_entries(table::builtin_entries())
    }

    /// Layer extra entries on top, replacing built-in targets on conflict.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (source, target) in overrides {
            debug!("Translation override: {:?} -> {:?}", source, target);
            self.table.insert(source.trim().to_string(), target.clone());
        }
        self
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Translate one label, returning the input untouched when there is no entry.
    pub fn translate<'a>(&self, label: &'a str) -> Cow<'a, str> {
        match self.table.get(label.trim()) {
            Some(target) => Cow::Owned(target.clone()),
            None => Cow::Borrowed(label),
        }
    }

    fn translate_field(&self, field: &Option<String>) -> Option<String> {
        field
            .as_deref()
            .map(|label| self.translate(label).into_owned())
    }

    /// Copy of `record` with its category and subcategory labels translated.
    pub fn translate_record(&self, record: &CodedRecord) -> CodedRecord {
        CodedRecord {
            category_rq1: self.translate_field(&record.category_rq1),
            category_rq2: self.translate_field(&record.category_rq2),
            subcategory: self.translate_field(&record.subcategory),
            ..record.clone()
        }
    }

    pub fn translate_records(&self, records: &[CodedRecord]) -> Vec<CodedRecord> {
        records.iter().map(|r| self.translate_record(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let translator = Translator::builtin();
        assert_eq!(translator.translate("Facilitação"), "Facilitation");
        assert_eq!(translator.translate("Desafios de Foco"), "Focus Challenges");
        assert!(!translator.is_empty());
    }

    #[test]
    fn test_near_duplicates_share_target() {
        let translator = Translator::builtin();
        assert_eq!(
            translator.translate("Desafios Tecnologicos"),
            translator.translate("Desafios Tecnológicos")
        );
    }

    #[test]
    fn test_input_is_trimmed_before_lookup() {
        let translator = Translator::builtin();
        assert_eq!(translator.translate("  Mediação \t"), "Mediation");
    }

    #[test]
    fn test_unknown_label_returned_unchanged() {
        let translator = Translator::builtin();

        for label in ["Unmapped", "  padded unknown ", "", "facilitação"] {
            let translated = translator.translate(label);
            assert!(matches!(translated, Cow::Borrowed(_)));
            assert_eq!(translated, label);
        }
    }

    #[test]
    fn test_overrides_replace_builtin() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Facilitação ".to_string(), "Facilitating".to_string());
        overrides.insert("Novo".to_string(), "New".to_string());

        let translator = Translator::builtin().with_overrides(&overrides);
        assert_eq!(translator.translate("Facilitação"), "Facilitating");
        assert_eq!(translator.translate("Novo"), "New");
        assert_eq!(translator.len(), Translator::builtin().len() + 1);
    }

    #[test]
    fn test_translate_record() {
        let translator = Translator::from_entries([("Cat", "Category"), ("Sub", "Subcategory")]);
        let record = CodedRecord {
            article: Some("Cat".to_string()),
            category_rq1: Some(" Cat".to_string()),
            category_rq2: None,
            subcategory: Some("Sub".to_string()),
            ..Default::default()
        };

        let translated = translator.translate_record(&record);
        assert_eq!(translated.category_rq1.as_deref(), Some("Category"));
        assert_eq!(translated.category_rq2, None);
        assert_eq!(translated.subcategory.as_deref(), Some("Subcategory"));
        assert_eq!(translated.article.as_deref(), Some("Cat"));
    }
}
