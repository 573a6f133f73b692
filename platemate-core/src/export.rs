//! Grocery list rendering for download and printing.

use chrono::NaiveDate;

use crate::grocery::{GroceryItem, GroceryList};

pub const FOOTER: &str = "Generated by PlateMate - Smart Recipe Finder";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Suggested file name for a list generated on `date`.
pub fn export_filename(date: NaiveDate, extension: &str) -> String {
    format!("grocery-list-{}.{}", date.format(DATE_FORMAT), extension)
}

fn quantity_suffix(item: &GroceryItem) -> Option<String> {
    (item.quantity > 1).then(|| format!("{} units", item.quantity))
}

/// Plain-text checklist grouped by category.
pub fn render_text(list: &GroceryList, generated_on: NaiveDate) -> String {
    let mut out = String::from("GROCERY LIST\n");
    out.push_str(&format!("Generated on {}\n", generated_on.format(DATE_FORMAT)));
    out.push_str(&format!("Total items: {}\n\n", list.items.len()));

    for (category, items) in &list.by_category {
        let header = category.as_str();
        out.push_str(&header.to_uppercase());
        out.push('\n');
        out.push_str(&"=".repeat(header.chars().count()));
        out.push('\n');

        for item in items {
            let checkbox = if item.checked { "[✓]" } else { "[ ]" };
            let quantity = quantity_suffix(item)
                .map(|q| format!(" ({})", q))
                .unwrap_or_default();
            out.push_str(&format!("{} {}{}\n", checkbox, item.name, quantity));
        }
        out.push('\n');
    }

    out.push_str("\n---\n");
    out.push_str(FOOTER);
    out
}

const STYLE: &str = r#"
      body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; color: #333; }
      .header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #16a34a; padding-bottom: 20px; }
      .header h1 { color: #16a34a; margin: 0; font-size: 28px; }
      .header p { margin: 5px 0; color: #666; }
      .category { margin: 25px 0; page-break-inside: avoid; }
      .category h2 { color: #16a34a; border-bottom: 1px solid #ddd; padding-bottom: 8px; margin-bottom: 15px; font-size: 18px; }
      .item { display: flex; align-items: center; margin: 8px 0; padding: 5px 0; }
      .checkbox { width: 16px; height: 16px; border: 2px solid #16a34a; margin-right: 12px; display: inline-block; position: relative; }
      .checkbox.checked { background-color: #16a34a; }
      .checkbox.checked::after { content: '✓'; color: white; position: absolute; left: 2px; top: -2px; font-size: 12px; font-weight: bold; }
      .item-name { flex: 1; font-weight: 500; }
      .quantity { color: #f59e0b; font-size: 12px; background: #fef3c7; padding: 2px 8px; border-radius: 12px; margin-left: 8px; }
      .footer { margin-top: 40px; text-align: center; color: #666; font-size: 12px; border-top: 1px solid #ddd; padding-top: 20px; }
      @media print { body { margin: 20px; } .category { page-break-inside: avoid; } }
"#;

/// A standalone printable HTML page.
pub fn render_html(list: &GroceryList, generated_on: NaiveDate) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n  <title>Grocery List</title>\n");
    out.push_str("  <style>");
    out.push_str(STYLE);
    out.push_str("  </style>\n</head>\n<body>\n");

    out.push_str("  <div class=\"header\">\n    <h1>🛒 Grocery List</h1>\n");
    out.push_str(&format!(
        "    <p>Generated on {}</p>\n",
        generated_on.format(DATE_FORMAT)
    ));
    out.push_str(&format!("    <p>Total items: {}</p>\n  </div>\n", list.items.len()));

    for (category, items) in &list.by_category {
        out.push_str("  <div class=\"category\">\n");
        out.push_str(&format!("    <h2>{}</h2>\n", escape_html(category.as_str())));
        for item in items {
            let class = if item.checked { "checkbox checked" } else { "checkbox" };
            out.push_str("    <div class=\"item\">\n");
            out.push_str(&format!("      <div class=\"{}\"></div>\n", class));
            out.push_str(&format!(
                "      <span class=\"item-name\">{}</span>\n",
                escape_html(&item.name)
            ));
            if let Some(quantity) = quantity_suffix(item) {
                out.push_str(&format!("      <span class=\"quantity\">{}</span>\n", quantity));
            }
            out.push_str("    </div>\n");
        }
        out.push_str("  </div>\n");
    }

    out.push_str(&format!("  <div class=\"footer\">{}</div>\n", FOOTER));
    out.push_str("</body>\n</html>\n");
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
