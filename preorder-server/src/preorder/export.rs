//! Preorder CSV export
//!
//! Renders the full (unpaginated) preorder report as a delimited document.
//! Same filter and order as the list endpoint.

use crate::db::models::{Cart, CartItem};
use crate::preorder::report::filter_and_sort;

/// Fixed export columns
pub const CSV_HEADER: [&str; 13] = [
    "submitted_at",
    "preorder_id",
    "email",
    "first_name",
    "last_name",
    "phone",
    "address_1",
    "address_2",
    "city",
    "province",
    "postal_code",
    "country",
    "items",
];

/// Quote a cell when it contains a comma, a quote or a newline;
/// internal quotes are doubled.
fn csv_cell(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render one line item as `<title or 'Item'> x<quantity or 0>`, with a
/// ` (Size: ...)` suffix when the item carries a string `preorder_size`.
fn render_item(item: &CartItem) -> String {
    let title = item.title.as_deref().unwrap_or("Item");
    let quantity = item.quantity.unwrap_or(0);
    match item.preorder_size() {
        Some(size) => format!("{title} x{quantity} (Size: {size})"),
        None => format!("{title} x{quantity}"),
    }
}

fn render_row(cart: &Cart) -> Vec<String> {
    let address = cart.shipping_address.clone().unwrap_or_default();
    let opt = |value: Option<String>| value.unwrap_or_default();

    let items = cart
        .items
        .iter()
        .map(render_item)
        .collect::<Vec<_>>()
        .join(" | ");

    vec![
        cart.submitted_at().to_string(),
        cart.id.to_string(),
        opt(cart.email.clone()),
        opt(address.first_name),
        opt(address.last_name),
        opt(address.phone),
        opt(address.address_1),
        opt(address.address_2),
        opt(address.city),
        opt(address.province),
        opt(address.postal_code),
        opt(address.country_code).to_uppercase(),
        items,
    ]
}

/// Encode the active preorder set as CSV.
///
/// Rows are joined by `\n` with no trailing newline; an empty set yields the
/// header line alone.
pub fn export_preorders_csv(carts: Vec<Cart>) -> String {
    let preorders = filter_and_sort(carts);

    let mut lines = Vec::with_capacity(preorders.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for cart in &preorders {
        let row = render_row(cart)
            .iter()
            .map(|cell| csv_cell(cell))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{ItemMetadata, ShippingAddress};
    use serde_json::json;
    use surrealdb::RecordId;

    fn export_cart() -> Cart {
        Cart {
            id: RecordId::from_table_key("cart", "c1"),
            email: Some("buyer@example.com".to_string()),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            shipping_address: Some(ShippingAddress {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                country_code: Some("gb".to_string()),
                ..Default::default()
            }),
            items: vec![
                CartItem {
                    title: Some("Tee, Black".to_string()),
                    quantity: Some(2),
                    metadata: Some(ItemMetadata {
                        preorder_size: Some(json!("M")),
                        extra: Default::default(),
                    }),
                },
                CartItem {
                    title: None,
                    quantity: None,
                    metadata: None,
                },
            ],
            metadata: serde_json::from_value(json!({
                "preorder_submitted": true,
                "preorder_submitted_at": "2024-05-01T00:00:00Z",
            }))
            .unwrap(),
        }
    }

    /// Minimal CSV line parser for round-trip assertions
    fn parse_line(line: &str) -> Vec<String> {
        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut chars = line.chars().peekable();
        let mut quoted = false;

        while let Some(c) = chars.next() {
            match c {
                '"' if !quoted && cell.is_empty() => quoted = true,
                '"' if quoted => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        cell.push('"');
                    } else {
                        quoted = false;
                    }
                }
                ',' if !quoted => {
                    cells.push(std::mem::take(&mut cell));
                }
                _ => cell.push(c),
            }
        }
        cells.push(cell);
        cells
    }

    #[test]
    fn header_row_matches_fixed_columns() {
        let csv = export_preorders_csv(vec![]);
        assert_eq!(csv, CSV_HEADER.join(","));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn quoted_cells_roundtrip() {
        let csv = export_preorders_csv(vec![export_cart()]);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), 2);

        let cells = parse_line(lines[1]);
        assert_eq!(cells.len(), CSV_HEADER.len());
        // comma inside the title survives quoting
        assert_eq!(cells[12], "Tee, Black x2 (Size: M) | Item x0");
    }

    #[test]
    fn country_code_is_uppercased() {
        let csv = export_preorders_csv(vec![export_cart()]);
        let cells = parse_line(csv.split('\n').nth(1).unwrap());
        assert_eq!(cells[11], "GB");
    }

    #[test]
    fn missing_values_render_empty() {
        let mut cart = export_cart();
        cart.email = None;
        cart.shipping_address = None;
        cart.items.clear();

        let csv = export_preorders_csv(vec![cart]);
        let cells = parse_line(csv.split('\n').nth(1).unwrap());
        assert_eq!(cells[2], "");
        assert_eq!(cells[3], "");
        assert_eq!(cells[12], "");
    }

    #[test]
    fn cell_quoting_rules() {
        assert_eq!(csv_cell("plain"), "plain");
        assert_eq!(csv_cell("a,b"), "\"a,b\"");
        assert_eq!(csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_cell("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn deleted_preorders_are_excluded() {
        let mut cart = export_cart();
        if let Some(meta) = cart.metadata.as_mut() {
            meta.mark_deleted("2024-06-01T00:00:00Z".to_string());
        }

        let csv = export_preorders_csv(vec![cart]);
        assert_eq!(csv, CSV_HEADER.join(","));
    }
}
