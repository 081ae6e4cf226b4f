use shared::{DrinkForm, DATE_FORMAT};

use crate::flash::Flash;
use crate::models::InventoryItem;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => format!(
            r#"<div class="flash flash-{}">{}</div>"#,
            flash.category.as_str(),
            escape(&flash.message)
        ),
        None => String::new(),
    }
}

fn drink_fields(form: &DrinkForm) -> String {
    let fields = [
        ("name_of_drink", "Name", r#"type="text""#, &form.name_of_drink),
        ("price", "Price", r#"type="number" step="0.01" min="0""#, &form.price),
        ("quantity", "Quantity", r#"type="number" step="1" min="0""#, &form.quantity),
        ("expiry_date", "Expiry date", r#"type="date""#, &form.expiry_date),
        ("batch_no", "Batch number", r#"type="text""#, &form.batch_no),
        ("drink_subtype", "Drink subtype", r#"type="text""#, &form.drink_subtype),
    ];

    let mut html = String::new();
    for (name, label, attrs, value) in fields {
        html.push_str(&format!(
            "<label>{label} <input {attrs} name=\"{name}\" value=\"{}\" required></label>\n",
            escape(value)
        ));
    }
    html
}

pub fn index_page(items: &[InventoryItem], flash: Option<&Flash>) -> String {
    let mut rows = String::new();
    for item in items {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"/edit/{id}\">Edit</a> <a href=\"/delete/{id}\">Delete</a></td></tr>\n",
            escape(&item.name_of_drink),
            escape(&item.price.to_string()),
            item.quantity,
            item.expiry_date.format(DATE_FORMAT),
            escape(&item.batch_no),
            escape(&item.drink_subtype),
            id = item.id,
        ));
    }

    let body = format!(
        r#"{flash}
<form method="post" action="/insert">
{fields}<button type="submit">Add drink</button>
</form>
<table>
<thead><tr><th>ID</th><th>Name</th><th>Price</th><th>Quantity</th><th>Expiry date</th><th>Batch number</th><th>Subtype</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        flash = flash_banner(flash),
        fields = drink_fields(&DrinkForm::default()),
    );
    layout("Drink Inventory", &body)
}

pub fn edit_page(item: &InventoryItem) -> String {
    let body = format!(
        r#"<form method="post" action="/edit/{id}">
{fields}<button type="submit">Save</button>
</form>
<a href="/">Back</a>"#,
        id = item.id,
        fields = drink_fields(&DrinkForm::from(item)),
    );
    layout("Edit Drink", &body)
}

pub fn not_found_page(id: i32) -> String {
    layout(
        "Not Found",
        &format!(r#"<p>Drink {id} not found.</p><a href="/">Back</a>"#),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn item() -> InventoryItem {
        InventoryItem {
            id: 7,
            name_of_drink: "<script>alert(1)</script>".to_string(),
            price: BigDecimal::from_str("1.50").unwrap(),
            quantity: 10,
            expiry_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            batch_no: "B\"1".to_string(),
            drink_subtype: "Soda & Co".to_string(),
        }
    }

    #[test]
    fn listing_escapes_user_text() {
        let html = index_page(&[item()], Some(&Flash::success("Drink added successfully!")));

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Soda &amp; Co"));
        assert!(html.contains("2025-12-31"));
        assert!(html.contains(r#"href="/edit/7""#));
        assert!(html.contains(r#"<div class="flash flash-success">Drink added successfully!</div>"#));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let html = edit_page(&item());

        assert!(html.contains(r#"action="/edit/7""#));
        assert!(html.contains(r#"name="batch_no" value="B&quot;1""#));
        assert!(html.contains(r#"name="price" value="1.50""#));
        assert!(html.contains(r#"name="expiry_date" value="2025-12-31""#));
    }
}
