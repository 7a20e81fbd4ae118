//! HTML rendering of an extraction result.
//!
//! Produces one self-contained HTML fragment (inline styles, one `<style>`
//! block for the table, one `<script>` for the editable table) that the
//! display side can drop into a page as-is.
//!
//! Every piece of text taken from the response is entity-escaped before it
//! is inserted; field names and cells come from an OCR engine and may well
//! contain `<` or `&`.

use crate::config::RenderOptions;
use crate::error::IcrError;
use crate::model::{InvoiceSummary, StringData, TableData};
use crate::pipeline::normalize::{normalize, NormalizedTable};
use std::fmt::Write as _;

/// `id` of the rendered `<table>`; the table styles are scoped to it.
pub const TABLE_ID: &str = "icr-table";

/// `id` of the element wrapping the table, made editable on load.
pub const TABLE_CONTAINER_ID: &str = "table-container";

/// Render each field as a labelled paragraph, in insertion order.
///
/// Unknown keys are rendered like the required ones.
pub fn render_summary(data: &StringData) -> String {
    let mut html = String::new();
    for (key, value) in data.iter() {
        let _ = write!(
            html,
            "<p style='margin: 0; color: #000;'>\
             <span style='display: inline-block; padding: 5px; margin-bottom: 5px; \
             background-color: #007BFF; border-radius: 10px;'>\
             <strong style='color: #000;'>{}:</strong></span> {}</p>",
            escape_html(key),
            escape_html(value)
        );
    }
    html
}

/// Render a normalised table with its fixed styling.
///
/// Header row = column names, one body row per row index.
pub fn render_table(table: &NormalizedTable) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<style type=\"text/css\">\n\
         #{id} {{ border: 1px solid black; border-collapse: collapse; }}\n\
         #{id} th, #{id} td {{ background-color: #212529; color: white; \
         border: 1px solid black; padding: 4px 8px; }}\n\
         </style>\n",
        id = TABLE_ID
    );
    let _ = writeln!(html, "<table id=\"{TABLE_ID}\">");

    html.push_str("  <thead>\n    <tr>\n");
    for name in table.column_names() {
        let _ = writeln!(html, "      <th>{}</th>", escape_html(name));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in table.rows() {
        html.push_str("    <tr>\n");
        for cell in row {
            let _ = writeln!(html, "      <td>{}</td>", escape_html(cell));
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>\n");
    html
}

/// Check the required fields, normalise `table` and compose the full result
/// page.
///
/// # Errors
/// [`IcrError::KeyMissing`] for the first required field absent from
/// `fields`; otherwise [`IcrError::EmptyTable`] when `table` has no columns.
pub fn render_document(
    fields: &StringData,
    table: &TableData,
    options: &RenderOptions,
) -> Result<String, IcrError> {
    InvoiceSummary::from_string_data(fields)?;
    let normalized = normalize(table)?;
    Ok(compose_document(fields, &normalized, options))
}

/// Compose the result page from an already normalised table.
pub fn compose_document(
    fields: &StringData,
    table: &NormalizedTable,
    options: &RenderOptions,
) -> String {
    let summary = render_summary(fields);
    let table_html = render_table(table);
    let editable_script = if options.editable_table {
        format!(
            "\n    <script>\n        \
             var tableContainer = document.getElementById('{TABLE_CONTAINER_ID}');\n        \
             tableContainer.contentEditable = true;\n    \
             </script>"
        )
    } else {
        String::new()
    };

    format!(
        r#"<div style="font-family: 'Courier New', monospace; margin: 20px; padding: 20px; border: 2px solid #ddd; border-radius: 10px; background-color: #fff; color: #000;">
    <div style="text-align: center; margin-bottom: 20px;">
        <div style="background-color: #fff; padding: 10px; border-radius: 10px; display: inline-block;">
            <img src="{image}" alt="Header Image" style="width: 200px; height: auto;">
        </div>
        <h2 style="color: #000;">{title}</h2>
    </div>
    <h2 style="text-align: center; color: #000;">Extracted Information</h2>
    <div style='overflow-y: auto; max-height: 200px;'>{summary}</div>
    <h2 style='text-align: center; color: #000;'>Table Data</h2>
    <div id='{container}' style='overflow-x: auto; overflow-y: auto; max-height: 300px;'>{table_html}</div>
    <form method="post" action="{action}">
        <button type="submit">Submit</button>
    </form>{editable_script}
</div>
"#,
        image = escape_html(&options.header_image_url),
        title = escape_html(&options.title),
        container = TABLE_CONTAINER_ID,
        action = escape_html(&options.submit_action),
    )
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> StringData {
        pairs.iter().copied().collect()
    }

    fn invoice_fields() -> StringData {
        fields(&[
            ("vendor_name", "Acme"),
            ("invoice_no", "INV-1"),
            ("customer_name", "Globex"),
            ("customer_address", "1 Main St"),
            ("invoice_date", "2024-03-01"),
            ("invoice_total_amount", "10.00"),
        ])
    }

    fn table(cols: &[(&str, &[&str])]) -> TableData {
        cols.iter()
            .map(|(name, cells)| (*name, cells.iter().copied()))
            .collect()
    }

    #[test]
    fn summary_contains_key_and_value() {
        let html = render_summary(&fields(&[("vendor_name", "Acme")]));
        assert!(html.contains("vendor_name"));
        assert!(html.contains("Acme"));
        assert!(html.contains("<strong style='color: #000;'>vendor_name:</strong>"));
    }

    #[test]
    fn summary_keeps_extra_keys_in_order() {
        let html = render_summary(&fields(&[
            ("vendor_name", "Acme"),
            ("po_number", "PO-1"),
            ("invoice_no", "7"),
        ]));
        assert_eq!(html.matches("<p ").count(), 3);
        let vendor = html.find("vendor_name").unwrap();
        let po = html.find("po_number").unwrap();
        let inv = html.find("invoice_no").unwrap();
        assert!(vendor < po && po < inv);
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        assert_eq!(render_summary(&StringData::new()), "");
    }

    #[test]
    fn summary_escapes_markup() {
        let html = render_summary(&fields(&[("note", "<b>A & B</b>")]));
        assert!(html.contains("&lt;b&gt;A &amp; B&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn table_has_header_and_padded_rows() {
        let t = normalize(&table(&[("A", &["1", "2"]), ("B", &["x"])])).unwrap();
        let html = render_table(&t);
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<th>B</th>"));
        assert_eq!(html.matches("<tr>").count(), 3);
        assert_eq!(html.matches("<td>").count(), 4);
        assert!(html.contains("<td></td>"));
        let a_pos = html.find("<th>A</th>").unwrap();
        let b_pos = html.find("<th>B</th>").unwrap();
        assert!(a_pos < b_pos);
    }

    #[test]
    fn table_styling_is_fixed() {
        let t = normalize(&table(&[("A", &["1"])])).unwrap();
        let html = render_table(&t);
        assert!(html.contains("border: 1px solid black"));
        assert!(html.contains("background-color: #212529"));
        assert!(html.contains("color: white"));
        assert!(html.contains(&format!("<table id=\"{TABLE_ID}\">")));
    }

    #[test]
    fn document_composes_all_sections() {
        let html = render_document(
            &invoice_fields(),
            &table(&[("Item", &["Bolt"])]),
            &RenderOptions::default(),
        )
        .unwrap();
        assert!(html.contains("ICR EXTRACTION"));
        assert!(html.contains("alt=\"Header Image\""));
        assert!(html.contains("Extracted Information"));
        assert!(html.contains("Table Data"));
        assert!(html.contains("Acme"));
        assert!(html.contains("<td>Bolt</td>"));
        assert!(html.contains("<form method=\"post\" action=\"/submit\">"));
        assert!(html.contains("id='table-container'"));
        assert!(html.contains("tableContainer.contentEditable = true;"));
    }

    #[test]
    fn document_without_editable_script() {
        let options = RenderOptions {
            editable_table: false,
            ..RenderOptions::default()
        };
        let html = render_document(&invoice_fields(), &table(&[("A", &[])]), &options).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("id='table-container'"));
    }

    #[test]
    fn document_with_empty_table_fails() {
        let err = render_document(&invoice_fields(), &TableData::new(), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, IcrError::EmptyTable));
    }

    #[test]
    fn document_requires_invoice_fields() {
        let err = render_document(
            &fields(&[("vendor_name", "Acme")]),
            &table(&[("Item", &["Bolt"])]),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(
            matches!(err, IcrError::KeyMissing { ref key } if key == "invoice_no"),
            "got: {err}"
        );
    }

    #[test]
    fn missing_field_reported_before_empty_table() {
        let err = render_document(&StringData::new(), &TableData::new(), &RenderOptions::default())
            .unwrap_err();
        assert!(
            matches!(err, IcrError::KeyMissing { ref key } if key == "vendor_name"),
            "got: {err}"
        );
    }

    #[test]
    fn escape_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
