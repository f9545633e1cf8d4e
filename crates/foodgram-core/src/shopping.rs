//! Shopping list aggregation.
//!
//! Merges the ingredient lines of every recipe in a user's shopping cart into
//! one record per ingredient name. Records keep the order in which each name
//! was first seen, so the output is stable whenever the input order is.

use std::collections::HashMap;
use std::fmt;

/// One ingredient line of one recipe in the cart, as read from storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl ShoppingListLine {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: i32) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Total amount to buy of a single ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedIngredient {
    pub name: String,
    pub amount: i64,
    pub measurement_unit: String,
}

impl fmt::Display for AggregatedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.amount, self.measurement_unit)
    }
}

/// The same ingredient name recorded with two different units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitConflict {
    pub name: String,
    /// Unit of the first encounter, used for the total
    pub expected_unit: String,
    pub found_unit: String,
}

/// Result of [`aggregate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub items: Vec<AggregatedIngredient>,
    pub unit_conflicts: Vec<UnitConflict>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `"<name>: <amount> <unit>"` for each item, in order
    pub fn lines(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }
}

/// Sum amounts per ingredient name.
///
/// Negative amounts cannot be stored, but are clamped to zero here as well so
/// totals never go below zero. A unit that differs from the first one seen for
/// that name is reported once per distinct unit in `unit_conflicts`.
pub fn aggregate<I>(lines: I) -> Aggregation
where
    I: IntoIterator<Item = ShoppingListLine>,
{
    let mut result = Aggregation::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in lines {
        let amount = i64::from(line.amount.max(0));
        match index.get(&line.name) {
            Some(&pos) => {
                let item = &mut result.items[pos];
                item.amount += amount;
                if item.measurement_unit != line.measurement_unit
                    && !result.unit_conflicts.iter().any(|c| {
                        c.name == line.name && c.found_unit == line.measurement_unit
                    })
                {
                    result.unit_conflicts.push(UnitConflict {
                        name: line.name,
                        expected_unit: item.measurement_unit.clone(),
                        found_unit: line.measurement_unit,
                    });
                }
            }
            None => {
                index.insert(line.name.clone(), result.items.len());
                result.items.push(AggregatedIngredient {
                    name: line.name,
                    amount,
                    measurement_unit: line.measurement_unit,
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, amount: i64, unit: &str) -> AggregatedIngredient {
        AggregatedIngredient {
            name: name.to_string(),
            amount,
            measurement_unit: unit.to_string(),
        }
    }

    #[test]
    fn test_empty_cart_yields_empty_aggregation() {
        let result = aggregate(Vec::new());
        assert!(result.is_empty());
        assert!(result.unit_conflicts.is_empty());
        assert!(result.lines().is_empty());
    }

    #[test]
    fn test_single_recipe_passes_through() {
        let result = aggregate(vec![
            ShoppingListLine::new("A", "kg", 2),
            ShoppingListLine::new("B", "pc", 3),
        ]);
        assert_eq!(result.items, vec![item("A", 2, "kg"), item("B", 3, "pc")]);
    }

    #[test]
    fn test_repeated_ingredient_is_summed() {
        let result = aggregate(vec![
            ShoppingListLine::new("A", "g", 2),
            ShoppingListLine::new("A", "g", 5),
        ]);
        assert_eq!(result.items, vec![item("A", 7, "g")]);
    }

    #[test]
    fn test_first_encounter_order_is_kept() {
        let result = aggregate(vec![
            ShoppingListLine::new("salt", "g", 5),
            ShoppingListLine::new("beet", "pc", 2),
            ShoppingListLine::new("apple", "pc", 1),
            ShoppingListLine::new("beet", "pc", 1),
            ShoppingListLine::new("salt", "g", 10),
        ]);
        assert_eq!(
            result.lines(),
            vec!["salt: 15 g", "beet: 3 pc", "apple: 1 pc"]
        );
    }

    #[test]
    fn test_totals_match_per_recipe_sums() {
        // three recipes sharing some ingredients
        let recipes = [
            vec![("flour", 200), ("egg", 2), ("milk", 300)],
            vec![("egg", 3), ("sugar", 50)],
            vec![("flour", 100), ("milk", 200), ("egg", 1)],
        ];
        let lines = recipes
            .iter()
            .flatten()
            .map(|(name, amount)| ShoppingListLine::new(*name, "u", *amount));
        let result = aggregate(lines);

        for aggregated in &result.items {
            let expected: i64 = recipes
                .iter()
                .flatten()
                .filter(|(name, _)| *name == aggregated.name)
                .map(|(_, amount)| i64::from(*amount))
                .sum();
            assert_eq!(aggregated.amount, expected, "{}", aggregated.name);
        }
        assert_eq!(result.items.len(), 4);
    }

    #[test]
    fn test_unit_conflict_is_reported_once() {
        let result = aggregate(vec![
            ShoppingListLine::new("milk", "ml", 200),
            ShoppingListLine::new("milk", "cup", 1),
            ShoppingListLine::new("milk", "cup", 2),
        ]);
        assert_eq!(result.items, vec![item("milk", 203, "ml")]);
        assert_eq!(
            result.unit_conflicts,
            vec![UnitConflict {
                name: "milk".into(),
                expected_unit: "ml".into(),
                found_unit: "cup".into(),
            }]
        );
    }

    #[test]
    fn test_negative_amounts_never_reduce_totals() {
        let result = aggregate(vec![
            ShoppingListLine::new("oil", "ml", 10),
            ShoppingListLine::new("oil", "ml", -4),
        ]);
        assert_eq!(result.items[0].amount, 10);
    }

    #[test]
    fn test_large_totals_do_not_overflow_i32() {
        let result = aggregate(vec![
            ShoppingListLine::new("water", "ml", i32::MAX),
            ShoppingListLine::new("water", "ml", i32::MAX),
        ]);
        assert_eq!(result.items[0].amount, 2 * i64::from(i32::MAX));
    }
}
