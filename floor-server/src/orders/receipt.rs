//! Text receipt rendering
//!
//! Formats the consolidated bill as a fixed-width text block. Pure
//! formatting: printing hardware is out of scope, callers get a string.

use chrono::DateTime;
use chrono_tz::Tz;

use super::money;
use super::settlement::TableBill;

const WIDTH: usize = 30;

/// Render a bill as a printable text receipt
///
/// Usable as a preview for an unpaid table as well as the final receipt;
/// nothing here touches persisted state.
pub fn render_receipt(bill: &TableBill, store_name: &str, when: DateTime<Tz>) -> String {
    let rule = "=".repeat(WIDTH);
    let thin_rule = "-".repeat(WIDTH);

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center(store_name));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Table: {}\n", bill.table_number));
    out.push_str(&format!("Date: {}\n", when.format("%Y-%m-%d")));
    out.push_str(&format!("Time: {}\n", when.format("%H:%M:%S")));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center("Items"));
    out.push('\n');
    out.push_str(&thin_rule);
    out.push('\n');

    for line in &bill.lines {
        let line_total = money::to_amount(money::line_total(line.price, line.quantity));
        out.push_str(&format!("{} x{}\n", line.name, line.quantity));
        out.push_str(&format!(
            "  {:.2} x {} = {:.2}\n",
            line.price, line.quantity, line_total
        ));
    }

    out.push_str(&thin_rule);
    out.push('\n');
    out.push_str(&format!("Grand total: {:.2}\n", bill.grand_total));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&center("Thank you, see you again"));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out
}

fn center(text: &str) -> String {
    if text.len() >= WIDTH {
        return text.to_string();
    }
    let pad = (WIDTH - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::OrderLine;

    #[test]
    fn test_receipt_contains_lines_and_total() {
        let bill = TableBill {
            table_id: "floor_table:t1".into(),
            table_number: "A1".into(),
            order_ids: vec!["food_order:o1".into(), "food_order:o2".into()],
            lines: vec![
                OrderLine {
                    menu_item_id: "menu_item:a".into(),
                    name: "Pad Thai".into(),
                    price: 60.0,
                    quantity: 3,
                    note: None,
                },
                OrderLine {
                    menu_item_id: "menu_item:b".into(),
                    name: "Iced Tea".into(),
                    price: 25.0,
                    quantity: 1,
                    note: None,
                },
            ],
            grand_total: 205.0,
        };
        let when = chrono_tz::Asia::Bangkok
            .with_ymd_and_hms(2024, 1, 1, 19, 30, 0)
            .unwrap();

        let receipt = render_receipt(&bill, "Aroi Dee", when);

        assert!(receipt.contains("Aroi Dee"));
        assert!(receipt.contains("Table: A1"));
        assert!(receipt.contains("Date: 2024-01-01"));
        assert!(receipt.contains("Pad Thai x3"));
        assert!(receipt.contains("60.00 x 3 = 180.00"));
        assert!(receipt.contains("Iced Tea x1"));
        assert!(receipt.contains("Grand total: 205.00"));
    }
}
