//! Shopping-cart aggregation.
//!
//! Cart rows are stored raw (duplicates allowed); display and export
//! collapse them by `(name, unit)` key, summing quantities only when both
//! sides parse as numbers. When either side fails to parse, the
//! previously stored value wins silently — the quantity column is
//! free-form text, and guessing at "one cup" + "200" would be worse than
//! keeping what the user first typed.

use std::fmt;

use indexmap::IndexMap;

/// One raw cart row as stored: nothing is merged at this level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartEntry {
    pub name: String,
    /// Free-form: usually numeric ("200", "2.5"), sometimes not
    /// ("to taste", "one cup").
    pub quantity: String,
    pub unit: String,
}

impl CartEntry {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// A quantity after aggregation: a number when summing succeeded at least
/// once, otherwise the original opaque text.
#[derive(Clone, Debug, PartialEq)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl Quantity {
    /// The numeric value, whether the quantity was summed into a number
    /// or merely stored as numeric-looking text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Quantity::Number(n) => Some(*n),
            Quantity::Text(text) => parse_quantity(text),
        }
    }
}

impl fmt::Display for Quantity {
    /// Display formatting for cart rows: integral numbers without
    /// decimals, fractional ones with two.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Quantity::Number(n) => write!(f, "{:.2}", n),
            Quantity::Text(text) => f.write_str(text),
        }
    }
}

/// An aggregated cart line: unique `(name, unit)` with the combined
/// quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedEntry {
    pub name: String,
    pub quantity: Quantity,
    pub unit: String,
}

fn parse_quantity(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Collapses raw cart rows into unique `(name, unit)` lines, in
/// first-seen order.
pub fn aggregate(entries: &[CartEntry]) -> Vec<AggregatedEntry> {
    let mut groups: IndexMap<(String, String), Quantity> = IndexMap::new();

    for entry in entries {
        let key = (entry.name.clone(), entry.unit.clone());
        match groups.get_mut(&key) {
            Some(stored) => {
                // Sum only when both sides are numeric; otherwise the
                // stored value stays as-is.
                if let (Some(existing), Some(incoming)) =
                    (stored.as_number(), parse_quantity(&entry.quantity))
                {
                    *stored = Quantity::Number(existing + incoming);
                }
            }
            None => {
                groups.insert(key, Quantity::Text(entry.quantity.clone()));
            }
        }
    }

    groups
        .into_iter()
        .map(|((name, unit), quantity)| AggregatedEntry {
            name,
            quantity,
            unit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_quantities_are_summed() {
        let entries = vec![
            CartEntry::new("Salt", "5", "g"),
            CartEntry::new("Salt", "3", "g"),
        ];

        let aggregated = aggregate(&entries);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].name, "Salt");
        assert_eq!(aggregated[0].unit, "g");
        assert_eq!(aggregated[0].quantity, Quantity::Number(8.0));
    }

    #[test]
    fn test_non_numeric_first_value_wins() {
        let entries = vec![
            CartEntry::new("Flour", "one cup", "cup"),
            CartEntry::new("Flour", "200", "cup"),
        ];

        let aggregated = aggregate(&entries);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].quantity, Quantity::Text("one cup".into()));
    }

    #[test]
    fn test_non_numeric_incoming_keeps_stored_sum() {
        let entries = vec![
            CartEntry::new("Sugar", "100", "g"),
            CartEntry::new("Sugar", "50", "g"),
            CartEntry::new("Sugar", "a pinch", "g"),
        ];

        let aggregated = aggregate(&entries);
        assert_eq!(aggregated[0].quantity, Quantity::Number(150.0));
    }

    #[test]
    fn test_identity_is_name_and_unit() {
        let entries = vec![
            CartEntry::new("Milk", "200", "ml"),
            CartEntry::new("Milk", "1", "l"),
        ];

        let aggregated = aggregate(&entries);
        assert_eq!(aggregated.len(), 2);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let entries = vec![
            CartEntry::new("Eggs", "2", "pcs"),
            CartEntry::new("Butter", "50", "g"),
            CartEntry::new("Eggs", "4", "pcs"),
        ];

        let aggregated = aggregate(&entries);
        let names: Vec<_> = aggregated.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Butter"]);
        assert_eq!(aggregated[0].quantity, Quantity::Number(6.0));
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Quantity::Number(8.0).to_string(), "8");
        assert_eq!(Quantity::Number(2.5).to_string(), "2.50");
        assert_eq!(Quantity::Text("to taste".into()).to_string(), "to taste");
    }
}
