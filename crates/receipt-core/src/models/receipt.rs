//! Receipt data model for a single point-of-sale transaction.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method used when a payment record carries none.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// A complete receipt, assembled once per print request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Order identifier (empty when the payload carried none).
    #[serde(default)]
    pub order_id: String,

    /// When the order was placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDateTime>,

    /// Customer details, present only when a customer name was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    /// Purchased items in payload order.
    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub subtotal: Decimal,

    #[serde(default)]
    pub tax: Decimal,

    #[serde(default)]
    pub discount: Decimal,

    #[serde(default)]
    pub total: Decimal,

    /// Payment details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,

    /// Free-text notes printed near the footer.
    #[serde(default)]
    pub notes: String,

    /// Whether the transaction asks for the cash drawer to open.
    #[serde(default = "default_open_cash_drawer")]
    pub open_cash_drawer: bool,
}

fn default_open_cash_drawer() -> bool {
    true
}

/// Customer attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A single purchased item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,

    /// Extra detail appended to the name on the printed row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub quantity: i32,

    /// Unit price.
    pub price: Decimal,

    /// Line total.
    pub total: Decimal,
}

impl Item {
    /// Create an item whose total is derived from quantity and price.
    ///
    /// A product too large for a decimal leaves the total at zero.
    pub fn new(name: impl Into<String>, quantity: i32, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            quantity,
            price,
            total: line_total(quantity, price).unwrap_or(Decimal::ZERO),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the derived line total.
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    /// Text shown in the item column: `name - description` when a
    /// description is present.
    pub fn label(&self) -> String {
        match self.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => format!("{} - {}", self.name, description),
            None => self.name.clone(),
        }
    }
}

/// Line total in fixed-point decimal, `None` when the product overflows.
pub fn line_total(quantity: i32, price: Decimal) -> Option<Decimal> {
    Decimal::from(quantity).checked_mul(price)
}

/// Payment details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub method: String,

    #[serde(default)]
    pub amount_paid: Decimal,

    #[serde(default)]
    pub change: Decimal,
}

impl Default for Payment {
    fn default() -> Self {
        Self {
            method: DEFAULT_PAYMENT_METHOD.to_string(),
            amount_paid: Decimal::ZERO,
            change: Decimal::ZERO,
        }
    }
}

impl Receipt {
    /// Create an empty receipt with default values.
    pub fn new() -> Self {
        Self {
            order_id: String::new(),
            order_date: None,
            customer: None,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            discount: Decimal::ZERO,
            total: Decimal::ZERO,
            payment: None,
            notes: String::new(),
            open_cash_drawer: true,
        }
    }

    /// Sum of the item line totals, `None` when the sum overflows.
    pub fn items_total(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.total))
    }

    /// Check the receipt for arithmetic inconsistencies.
    ///
    /// Issues are informational; a receipt with issues still prints.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let tolerance = Decimal::new(1, 2);

        if self.order_id.is_empty() {
            issues.push("Missing order ID".to_string());
        }

        if self.items.is_empty() {
            issues.push("No items".to_string());
        }

        // Checks whose arithmetic overflows are skipped.
        let differs = |a: Decimal, b: Decimal| {
            a.checked_sub(b)
                .is_some_and(|difference| difference.abs() > tolerance)
        };

        if !self.items.is_empty() && !self.subtotal.is_zero() {
            if let Some(calculated) = self.items_total() {
                if differs(calculated, self.subtotal) {
                    issues.push(format!(
                        "Item totals ({}) differ from subtotal ({})",
                        calculated, self.subtotal
                    ));
                }
            }
        }

        if !self.subtotal.is_zero() {
            let expected = self
                .subtotal
                .checked_add(self.tax)
                .and_then(|sum| sum.checked_sub(self.discount));
            if let Some(expected) = expected {
                if differs(expected, self.total) {
                    issues.push(format!(
                        "Subtotal + tax - discount ({}) differs from total ({})",
                        expected, self.total
                    ));
                }
            }
        }

        if let Some(payment) = &self.payment {
            let change = payment.amount_paid.checked_sub(self.total);
            if payment.amount_paid > Decimal::ZERO
                && change.is_some_and(|change| differs(change, payment.change))
            {
                issues.push(format!(
                    "Paid ({}) minus total ({}) differs from change ({})",
                    payment.amount_paid, self.total, payment.change
                ));
            }
        }

        issues
    }
}

impl Default for Receipt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_line_total_is_exact() {
        assert_eq!(line_total(3, dec("0.10")), Some(dec("0.30")));
        assert_eq!(line_total(7, dec("19.99")), Some(dec("139.93")));
        assert_eq!(Item::new("Coke", 2, dec("2.50")).total, dec("5.00"));
    }

    #[test]
    fn test_line_total_overflow() {
        assert_eq!(line_total(2, Decimal::MAX), None);
        assert_eq!(line_total(1, Decimal::MAX), Some(Decimal::MAX));
        assert_eq!(Item::new("Yacht", 2, Decimal::MAX).total, Decimal::ZERO);
    }

    #[test]
    fn test_validate_skips_overflowing_checks() {
        let receipt = Receipt {
            order_id: "1".to_string(),
            items: vec![
                Item::new("A", 1, Decimal::MAX),
                Item::new("B", 1, Decimal::MAX),
            ],
            subtotal: Decimal::MAX,
            tax: Decimal::MAX,
            total: Decimal::ONE,
            payment: Some(Payment {
                amount_paid: Decimal::MAX,
                change: Decimal::ZERO,
                ..Payment::default()
            }),
            ..Receipt::new()
        };

        assert_eq!(receipt.items_total(), None);
        // Only the payment check survives: MAX - 1 is representable.
        let issues = receipt.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("Paid"));

        let negative = Receipt {
            subtotal: Decimal::MIN,
            discount: Decimal::MAX,
            total: Decimal::MAX,
            payment: Some(Payment {
                amount_paid: Decimal::ONE,
                ..Payment::default()
            }),
            ..Receipt::new()
        };
        // Subtotal check overflows and is skipped; paid - total does not
        // overflow (1 - MAX) and is reported.
        let issues = negative.validate();
        assert!(issues.iter().all(|i| !i.starts_with("Subtotal")));
    }

    #[test]
    fn test_item_label() {
        let item = Item::new("Pizza", 1, dec("18.99"));
        assert_eq!(item.label(), "Pizza");
        assert_eq!(item.with_description("Large").label(), "Pizza - Large");
        assert_eq!(
            Item::new("Tea", 1, Decimal::ONE).with_description("").label(),
            "Tea"
        );
    }

    #[test]
    fn test_defaults() {
        let receipt = Receipt::default();
        assert!(receipt.open_cash_drawer);
        assert!(receipt.items.is_empty());
        assert_eq!(Payment::default().method, "Cash");
    }

    #[test]
    fn test_validate_consistent_receipt() {
        let receipt = Receipt {
            order_id: "1001".to_string(),
            items: vec![Item::new("Pizza", 1, dec("18.99"))],
            subtotal: dec("18.99"),
            tax: dec("1.52"),
            total: dec("20.51"),
            payment: Some(Payment {
                method: "Cash".to_string(),
                amount_paid: dec("25"),
                change: dec("4.49"),
            }),
            ..Receipt::new()
        };
        assert!(receipt.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_mismatches() {
        let receipt = Receipt {
            items: vec![Item::new("Pizza", 1, dec("18.99"))],
            subtotal: dec("20.00"),
            total: dec("25.00"),
            ..Receipt::new()
        };
        let issues = receipt.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].contains("order ID"));
    }
}
