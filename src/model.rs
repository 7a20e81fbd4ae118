//! Typed view of the extraction API's JSON response.
//!
//! ```text
//! { "data": { "string_data": { "vendor_name": "…", … },
//!             "table_data":  { "Description": ["…", …], … } } }
//! ```
//!
//! Both inner objects are decoded into insertion-ordered maps, so the order
//! of fields in the summary and of columns in the table is the order the API
//! sent them in.
//!
//! Values are expected to be strings. Numbers and booleans are accepted and
//! kept as their JSON text, `null` becomes an empty string; nested arrays or
//! objects where a scalar belongs are rejected.

use crate::error::IcrError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields every extraction is expected to carry, in display order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "vendor_name",
    "invoice_no",
    "customer_name",
    "customer_address",
    "invoice_date",
    "invoice_total_amount",
];

/// Top-level response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub data: ExtractionData,
}

/// The `data` object of the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionData {
    pub string_data: StringData,
    pub table_data: TableData,
}

/// Decode a response body.
pub fn decode_response(body: &str) -> Result<ExtractionResponse, IcrError> {
    Ok(serde_json::from_str(body)?)
}

// ── StringData ───────────────────────────────────────────────────────────

/// Ordered mapping of field name → scalar text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct StringData(IndexMap<String, String>);

impl StringData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checked lookup of a field that must be present.
    pub fn require(&self, key: &str) -> Result<&str, IcrError> {
        self.get(key).ok_or_else(|| IcrError::KeyMissing {
            key: key.to_string(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<IndexMap<String, Value>> for StringData {
    type Error = String;

    fn try_from(raw: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(key, value)| {
                let text = scalar_text(&value).ok_or_else(|| {
                    format!("string_data.{key} must be a scalar, got {}", kind(&value))
                })?;
                Ok((key, text))
            })
            .collect::<Result<IndexMap<_, _>, String>>()
            .map(Self)
    }
}

// ── TableData ────────────────────────────────────────────────────────────

/// Ordered mapping of column name → cells. Columns may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct TableData(IndexMap<String, Vec<String>>);

impl TableData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn column_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when at least two columns differ in length.
    pub fn is_ragged(&self) -> bool {
        let mut lens = self.0.values().map(Vec::len);
        match lens.next() {
            Some(first) => lens.any(|l| l != first),
            None => false,
        }
    }
}

impl<K, C, S> FromIterator<(K, C)> for TableData
where
    K: Into<String>,
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, cells)| (k.into(), cells.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

impl TryFrom<IndexMap<String, Value>> for TableData {
    type Error = String;

    fn try_from(raw: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut columns = IndexMap::with_capacity(raw.len());
        for (name, value) in raw {
            let items = match value {
                Value::Array(items) => items,
                other => {
                    return Err(format!(
                        "table_data.{name} must be an array, got {}",
                        kind(&other)
                    ))
                }
            };
            let cells = items
                .iter()
                .enumerate()
                .map(|(row, cell)| {
                    scalar_text(cell).ok_or_else(|| {
                        format!("table_data.{name}[{row}] must be a scalar, got {}", kind(cell))
                    })
                })
                .collect::<Result<Vec<_>, String>>()?;
            columns.insert(name, cells);
        }
        Ok(Self(columns))
    }
}

// ── InvoiceSummary ───────────────────────────────────────────────────────

/// The six required invoice fields, looked up up-front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub vendor_name: String,
    pub invoice_no: String,
    pub customer_name: String,
    pub customer_address: String,
    pub invoice_date: String,
    pub invoice_amount: String,
}

impl InvoiceSummary {
    /// Read every field in [`REQUIRED_FIELDS`]; the first one absent fails
    /// with [`IcrError::KeyMissing`].
    pub fn from_string_data(data: &StringData) -> Result<Self, IcrError> {
        Ok(Self {
            vendor_name: data.require("vendor_name")?.to_string(),
            invoice_no: data.require("invoice_no")?.to_string(),
            customer_name: data.require("customer_name")?.to_string(),
            customer_address: data.require("customer_address")?.to_string(),
            invoice_date: data.require("invoice_date")?.to_string(),
            invoice_amount: data.require("invoice_total_amount")?.to_string(),
        })
    }

    /// Human labels paired with their values, in display order.
    pub fn labelled_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Vendor Name", self.vendor_name.as_str()),
            ("Invoice No.", self.invoice_no.as_str()),
            ("Customer Name", self.customer_name.as_str()),
            ("Customer Address", self.customer_address.as_str()),
            ("Invoice Date", self.invoice_date.as_str()),
            ("Invoice Amount", self.invoice_amount.as_str()),
        ]
    }

    /// Plain-text block, one `Label: value` per line.
    pub fn to_label_text(&self) -> String {
        self.labelled_fields()
            .iter()
            .map(|(label, value)| format!("{label}: {value}\n"))
            .collect()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "data": {
            "string_data": {
                "vendor_name": "Acme",
                "invoice_no": "INV-7",
                "customer_name": "Globex",
                "customer_address": "1 Main St",
                "invoice_date": "2024-01-31",
                "invoice_total_amount": "99.50",
                "po_number": "PO-1"
            },
            "table_data": {
                "Item": ["Bolt", "Nut"],
                "Qty": ["4"]
            }
        }
    }"#;

    #[test]
    fn decodes_in_document_order() {
        let resp = decode_response(BODY).unwrap();
        let keys: Vec<&str> = resp.data.string_data.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "vendor_name",
                "invoice_no",
                "customer_name",
                "customer_address",
                "invoice_date",
                "invoice_total_amount",
                "po_number"
            ]
        );
        let cols: Vec<&str> = resp.data.table_data.columns().map(|(k, _)| k).collect();
        assert_eq!(cols, vec!["Item", "Qty"]);
        assert!(resp.data.table_data.is_ragged());
    }

    #[test]
    fn column_order_is_not_alphabetical() {
        let body = r#"{"data":{"string_data":{},"table_data":{"Z":["1"],"A":["2"],"M":["3"]}}}"#;
        let resp = decode_response(body).unwrap();
        let cols: Vec<&str> = resp.data.table_data.columns().map(|(k, _)| k).collect();
        assert_eq!(cols, vec!["Z", "A", "M"]);
    }

    #[test]
    fn scalars_are_coerced() {
        let body = r#"{"data":{"string_data":{"total":12.5,"paid":true,"note":null},
                       "table_data":{"Qty":[1, "2", null]}}}"#;
        let resp = decode_response(body).unwrap();
        let s = &resp.data.string_data;
        assert_eq!(s.get("total"), Some("12.5"));
        assert_eq!(s.get("paid"), Some("true"));
        assert_eq!(s.get("note"), Some(""));
        assert_eq!(
            resp.data.table_data.column("Qty").unwrap(),
            &["1".to_string(), "2".to_string(), String::new()]
        );
    }

    #[test]
    fn nested_value_is_malformed() {
        let body = r#"{"data":{"string_data":{"vendor_name":{"x":1}},"table_data":{}}}"#;
        let err = decode_response(body).unwrap_err();
        assert!(matches!(err, IcrError::MalformedResponse(ref m) if m.contains("vendor_name")));
    }

    #[test]
    fn non_array_column_is_malformed() {
        let body = r#"{"data":{"string_data":{},"table_data":{"Item":"Bolt"}}}"#;
        let err = decode_response(body).unwrap_err();
        assert!(matches!(err, IcrError::MalformedResponse(ref m) if m.contains("table_data.Item")));
    }

    #[test]
    fn missing_data_is_malformed() {
        assert!(matches!(
            decode_response(r#"{"status":"ok"}"#),
            Err(IcrError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_response(r#"{"data":{"string_data":{}}}"#),
            Err(IcrError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_response("<html>502</html>"),
            Err(IcrError::MalformedResponse(_))
        ));
    }

    #[test]
    fn require_reports_the_missing_key() {
        let data: StringData = [("vendor_name", "Acme")].into_iter().collect();
        assert_eq!(data.require("vendor_name").unwrap(), "Acme");
        let err = data.require("invoice_no").unwrap_err();
        assert!(matches!(err, IcrError::KeyMissing { ref key } if key == "invoice_no"));
    }

    #[test]
    fn summary_from_full_response() {
        let resp = decode_response(BODY).unwrap();
        let summary = InvoiceSummary::from_string_data(&resp.data.string_data).unwrap();
        assert_eq!(summary.vendor_name, "Acme");
        assert_eq!(summary.invoice_amount, "99.50");
        assert_eq!(
            summary.to_label_text(),
            "Vendor Name: Acme\n\
             Invoice No.: INV-7\n\
             Customer Name: Globex\n\
             Customer Address: 1 Main St\n\
             Invoice Date: 2024-01-31\n\
             Invoice Amount: 99.50\n"
        );
    }

    #[test]
    fn summary_fails_on_first_missing_field() {
        let data: StringData = [("vendor_name", "Acme"), ("customer_name", "Globex")]
            .into_iter()
            .collect();
        let err = InvoiceSummary::from_string_data(&data).unwrap_err();
        assert!(matches!(err, IcrError::KeyMissing { ref key } if key == "invoice_no"));
    }

    #[test]
    fn equal_columns_are_not_ragged() {
        let t: TableData = [("A", vec!["1", "2"]), ("B", vec!["x", "y"])]
            .into_iter()
            .collect();
        assert!(!t.is_ragged());
        assert!(!TableData::new().is_ragged());
    }
}
