//! Cart session - the working selection for one ordering round
//!
//! An explicit session object, created when staff opens the order screen
//! for a table and cleared on submit or cancel. No process-wide state:
//! whoever holds the session owns it.
//!
//! Invariants maintained across every operation:
//! - at most one line per `menu_item_id`
//! - every surviving line has quantity >= 1

use shared::OrderLine;
use uuid::Uuid;

use super::money;

/// In-memory cart scoped to one table visit
#[derive(Debug, Clone)]
pub struct CartSession {
    /// Session handle
    id: Uuid,
    /// Target table (string record id)
    table_id: String,
    lines: Vec<OrderLine>,
}

impl CartSession {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id: table_id.into(),
            lines: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a catalog item, snapshotting its price and name
    ///
    /// An existing line for the same item gets its quantity bumped instead
    /// of a duplicate entry.
    pub fn add_item(&mut self, menu_item_id: &str, name: &str, price: f64) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
        {
            line.quantity += 1;
            return;
        }
        self.lines.push(OrderLine {
            menu_item_id: menu_item_id.to_string(),
            name: name.to_string(),
            price,
            quantity: 1,
            note: None,
        });
    }

    /// Remove the whole line, regardless of quantity
    pub fn remove_item(&mut self, menu_item_id: &str) {
        self.lines.retain(|line| line.menu_item_id != menu_item_id);
    }

    /// Adjust a line's quantity; dropping to zero or below removes the line
    pub fn change_quantity(&mut self, menu_item_id: &str, delta: i32) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
        {
            line.quantity += delta;
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    /// Attach a note to a line (kitchen instructions)
    pub fn set_note(&mut self, menu_item_id: &str, note: Option<String>) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
        {
            line.note = note.filter(|n| !n.trim().is_empty());
        }
    }

    /// Current total as an f64 amount; recomputed on demand, never cached
    pub fn total(&self) -> f64 {
        money::to_amount(money::sum_lines(&self.lines))
    }

    /// Drain the session after a successful submit
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> CartSession {
        CartSession::new("floor_table:t1")
    }

    #[test]
    fn test_add_item_merges_duplicates() {
        let mut cart = cart();
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.add_item("menu_item:b", "Iced Tea", 25.0);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[1].quantity, 1);
    }

    #[test]
    fn test_remove_item_drops_whole_line() {
        let mut cart = cart();
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.remove_item("menu_item:a");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_clamps_at_zero() {
        let mut cart = cart();
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.change_quantity("menu_item:a", 2);
        assert_eq!(cart.lines()[0].quantity, 3);

        cart.change_quantity("menu_item:a", -3);
        assert!(cart.is_empty());

        // Unknown id is a no-op
        cart.change_quantity("menu_item:zzz", 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_line_ever_has_nonpositive_quantity() {
        let mut cart = cart();
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.add_item("menu_item:b", "Iced Tea", 25.0);
        cart.change_quantity("menu_item:a", -5);
        cart.change_quantity("menu_item:b", 4);

        assert!(cart.lines().iter().all(|line| line.quantity > 0));
        let mut seen: Vec<&str> = cart
            .lines()
            .iter()
            .map(|line| line.menu_item_id.as_str())
            .collect();
        seen.dedup();
        assert_eq!(seen.len(), cart.lines().len());
    }

    #[test]
    fn test_total_recomputed_from_lines() {
        let mut cart = cart();
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.add_item("menu_item:b", "Iced Tea", 25.5);
        assert_eq!(cart.total(), 145.5);

        cart.change_quantity("menu_item:b", -1);
        assert_eq!(cart.total(), 120.0);

        cart.clear();
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_set_note() {
        let mut cart = cart();
        cart.add_item("menu_item:a", "Pad Thai", 60.0);
        cart.set_note("menu_item:a", Some("no peanuts".into()));
        assert_eq!(cart.lines()[0].note.as_deref(), Some("no peanuts"));

        cart.set_note("menu_item:a", Some("   ".into()));
        assert_eq!(cart.lines()[0].note, None);
    }
}
