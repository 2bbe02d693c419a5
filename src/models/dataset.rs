// file: src/models/dataset.rs
// description: transient in-memory email table and its final two-column projection
// reference: internal data structures

use crate::models::email::ParsedEmail;
use serde::{Deserialize, Serialize};

/// One row of the working table. Derived columns stay `None` until their
/// stage has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRow {
    pub source_path: String,
    pub sender: Option<String>,
    pub body: String,
    pub cleaned_body: Option<String>,
    pub anonymized_body: Option<String>,
}

impl From<ParsedEmail> for EmailRow {
    fn from(email: ParsedEmail) -> Self {
        Self {
            source_path: email.source_path,
            sender: email.sender,
            body: email.body,
            cleaned_body: None,
            anonymized_body: None,
        }
    }
}

/// Final output row written to the Parquet file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub sender: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct EmailTable {
    rows: Vec<EmailRow>,
}

impl EmailTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, email: ParsedEmail) {
        self.rows.push(EmailRow::from(email));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[EmailRow] {
        &self.rows
    }

    /// Fills `cleaned_body` from `body`.
    pub fn derive_cleaned<F>(&mut self, mut clean: F)
    where
        F: FnMut(&str) -> String,
    {
        for row in &mut self.rows {
            row.cleaned_body = Some(clean(&row.body));
        }
    }

    /// Fills `anonymized_body` from `cleaned_body`. Rows that were never
    /// cleaned are treated as having an empty cleaned body.
    pub fn derive_anonymized<F>(&mut self, mut anonymize: F)
    where
        F: FnMut(&str) -> String,
    {
        for row in &mut self.rows {
            let cleaned = row.cleaned_body.as_deref().unwrap_or("");
            row.anonymized_body = Some(anonymize(cleaned));
        }
    }

    /// Projects to `{sender, text}` and drops rows whose text is blank.
    pub fn into_dataset(self) -> Vec<DatasetRow> {
        self.rows
            .into_iter()
            .filter_map(|row| {
                let text = row.anonymized_body.unwrap_or_default();
                if text.trim().is_empty() {
                    None
                } else {
                    Some(DatasetRow {
                        sender: row.sender,
                        text,
                    })
                }
            })
            .collect()
    }
}

impl FromIterator<ParsedEmail> for EmailTable {
    fn from_iter<I: IntoIterator<Item = ParsedEmail>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(EmailRow::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn email(path: &str, sender: Option<&str>, body: &str) -> ParsedEmail {
        ParsedEmail::new(
            path.to_string(),
            sender.map(str::to_string),
            body.to_string(),
        )
    }

    #[test]
    fn test_derived_columns_are_filled_in_order() {
        let mut table: EmailTable = vec![
            email("a", Some("a@enron.com"), "  hello  "),
            email("b", None, "world"),
        ]
        .into_iter()
        .collect();

        table.derive_cleaned(|body| body.trim().to_string());
        table.derive_anonymized(|text| text.to_uppercase());

        let rows = table.rows();
        assert_eq!(rows[0].cleaned_body.as_deref(), Some("hello"));
        assert_eq!(rows[0].anonymized_body.as_deref(), Some("HELLO"));
        assert_eq!(rows[1].anonymized_body.as_deref(), Some("WORLD"));
    }

    #[test]
    fn test_into_dataset_drops_blank_rows() {
        let mut table = EmailTable::new();
        table.push(email("a", Some("a@enron.com"), "keep me"));
        table.push(email("b", Some("b@enron.com"), "   "));
        table.push(email("c", None, "\n\t\n"));
        table.push(email("d", None, "also kept"));

        table.derive_cleaned(|body| body.to_string());
        table.derive_anonymized(|text| text.to_string());

        let dataset = table.into_dataset();
        assert_eq!(
            dataset,
            vec![
                DatasetRow {
                    sender: Some("a@enron.com".to_string()),
                    text: "keep me".to_string(),
                },
                DatasetRow {
                    sender: None,
                    text: "also kept".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_unprocessed_rows_are_dropped() {
        let mut table = EmailTable::new();
        table.push(email("a", None, "never cleaned"));
        assert_eq!(table.len(), 1);
        assert!(table.into_dataset().is_empty());
    }
}
