//! Search and category filtering for the transactions table.

use serde::Deserialize;

use crate::expense::Expense;

/// The search text and category chosen in the transactions table.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ExpenseFilter {
    /// Case-insensitive text matched against the description, vendor, merchant and category.
    #[serde(default)]
    pub search: String,
    /// Only show expenses in this category. An empty string means every category.
    #[serde(default)]
    pub category: Option<String>,
}

impl ExpenseFilter {
    fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
    }

    /// Whether `expense` passes both the search and the category filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        if self
            .category()
            .is_some_and(|category| expense.category != category)
        {
            return false;
        }

        let search = self.search.trim().to_lowercase();
        if search.is_empty() {
            return true;
        }

        [
            expense.description.as_deref(),
            expense.vendor.as_deref(),
            expense.merchant_normalized.as_deref(),
            Some(expense.category.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&search))
    }

    /// The expenses that pass the filter, in their original order.
    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses
            .iter()
            .filter(|expense| self.matches(expense))
            .collect()
    }
}

/// The distinct, non-empty categories in the order they first appear.
pub fn distinct_categories(expenses: &[Expense]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();

    for expense in expenses {
        let category = expense.category.as_str();
        if !category.is_empty() && !categories.contains(&category) {
            categories.push(category);
        }
    }

    categories
}
