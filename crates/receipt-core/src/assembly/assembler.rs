//! Field-by-field receipt assembler.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::extract::{Document, Fields, parse_decimal, parse_timestamp};
use crate::models::receipt::{Customer, Item, Payment, Receipt, line_total};

use super::{ReceiptParser, Result};

/// Builds a [`Receipt`] from a loosely structured payload.
///
/// Every field is optional: a missing or mistyped value keeps the receipt's
/// default. Sub-records (`customer`, `payment`) may be nested objects or
/// dotted top-level keys such as `"customer.name"`; when both forms carry the
/// same field, the nested object wins.
#[derive(Debug, Clone)]
pub struct ReceiptAssembler {
    /// Accept dotted top-level keys as sub-record fields.
    dotted_keys: bool,
}

impl ReceiptAssembler {
    /// Create an assembler with default settings.
    pub fn new() -> Self {
        Self { dotted_keys: true }
    }

    /// Enable or disable dotted-key fallback for sub-records.
    pub fn with_dotted_keys(mut self, enabled: bool) -> Self {
        self.dotted_keys = enabled;
        self
    }

    fn record<'a>(&self, fields: Fields<'a>, name: &'static str) -> SubRecord<'a> {
        SubRecord {
            nested: fields.object(name),
            flat: fields,
            name,
            dotted_keys: self.dotted_keys,
        }
    }

    fn extract_customer(&self, fields: Fields<'_>) -> Option<Customer> {
        let record = self.record(fields, "customer");
        let name = record.text("name")?;

        Some(Customer {
            name,
            phone: record.text("phone"),
            address: record.text("address"),
        })
    }

    fn extract_payment(&self, fields: Fields<'_>) -> Option<Payment> {
        let record = self.record(fields, "payment");
        if !record.exists() {
            return None;
        }

        let mut payment = Payment::default();
        if let Some(method) = record.text("method") {
            payment.method = method;
        }
        if let Some(paid) = record.decimal("amountPaid") {
            payment.amount_paid = paid;
        }
        if let Some(change) = record.decimal("change") {
            payment.change = change;
        }
        Some(payment)
    }

    fn extract_items(&self, fields: Fields<'_>) -> Vec<Item> {
        let mut items = Vec::new();

        for (index, item) in fields.objects("items").enumerate() {
            let Some(name) = item.str("name").filter(|n| !n.is_empty()) else {
                debug!(index, "skipping item without a name");
                continue;
            };

            let quantity = item.int("quantity").unwrap_or(1);
            let price = item.decimal("price").unwrap_or(Decimal::ZERO);
            let total = item
                .decimal("total")
                .or_else(|| {
                    let derived = line_total(quantity, price);
                    if derived.is_none() {
                        debug!(index, quantity, %price, "line total overflows, keeping zero");
                    }
                    derived
                })
                .unwrap_or(Decimal::ZERO);

            items.push(Item {
                name: name.to_string(),
                description: item.string("description").filter(|d| !d.is_empty()),
                quantity,
                price,
                total,
            });
        }

        items
    }
}

impl Default for ReceiptAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for ReceiptAssembler {
    fn assemble(&self, text: &str) -> Result<Receipt> {
        let start = Instant::now();
        let document = Document::parse(text)?;
        let fields = document.fields();

        let mut receipt = Receipt::new();

        if let Some(order_id) = fields.string("orderId") {
            receipt.order_id = order_id;
        }
        receipt.order_date = fields.str("orderDate").and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                debug!(value = raw, "ignoring unparsable orderDate");
            }
            parsed
        });
        if let Some(notes) = fields.string("notes") {
            receipt.notes = notes;
        }

        receipt.customer = self.extract_customer(fields);
        receipt.items = self.extract_items(fields);

        if let Some(subtotal) = fields.decimal("subtotal") {
            receipt.subtotal = subtotal;
        }
        if let Some(tax) = fields.decimal("tax") {
            receipt.tax = tax;
        }
        if let Some(discount) = fields.decimal("discount") {
            receipt.discount = discount;
        }
        if let Some(total) = fields.decimal("total") {
            receipt.total = total;
        }

        receipt.payment = self.extract_payment(fields);

        if let Some(open) = fields.bool("openCashDrawer") {
            receipt.open_cash_drawer = open;
        }

        for issue in receipt.validate() {
            debug!("receipt check: {}", issue);
        }

        info!(
            "Assembled receipt {:?} with {} items in {}µs",
            receipt.order_id,
            receipt.items.len(),
            start.elapsed().as_micros()
        );

        Ok(receipt)
    }
}

/// A sub-record addressed both as a nested object and as dotted keys.
struct SubRecord<'a> {
    nested: Option<Fields<'a>>,
    flat: Fields<'a>,
    name: &'static str,
    dotted_keys: bool,
}

impl<'a> SubRecord<'a> {
    fn exists(&self) -> bool {
        self.nested.is_some() || (self.dotted_keys && self.flat.has_prefix(&format!("{}.", self.name)))
    }

    /// Raw scalar text; the nested object takes precedence over the dotted key.
    fn raw(&self, field: &str) -> Option<&'a str> {
        self.nested
            .and_then(|nested| nested.str(field))
            .or_else(|| {
                if self.dotted_keys {
                    self.flat.str(&format!("{}.{}", self.name, field))
                } else {
                    None
                }
            })
    }

    /// Non-empty text value.
    fn text(&self, field: &str) -> Option<String> {
        self.raw(field)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn decimal(&self, field: &str) -> Option<Decimal> {
        let raw = self.raw(field)?;
        let parsed = parse_decimal(raw);
        if parsed.is_none() {
            debug!(record = self.name, field, value = raw, "ignoring value that is not a valid decimal");
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::error::ParseError;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn assemble(text: &str) -> Receipt {
        ReceiptAssembler::new().assemble(text).unwrap()
    }

    #[test]
    fn test_assemble_full_payload() {
        let text = r#"{
            "orderId": "1001",
            "orderDate": "2024-03-01T12:30:00",
            "customer": {"name": "John Doe", "phone": "(555) 123-4567"},
            "items": [
                {"name": "Pizza Margherita", "quantity": 1, "price": 18.99},
                {"name": "Coke", "description": "Can", "quantity": 2, "price": 2.50, "total": 5.00}
            ],
            "subtotal": 23.99,
            "tax": 1.92,
            "discount": 0,
            "total": 25.91,
            "payment": {"method": "Card", "amountPaid": 25.91, "change": 0},
            "notes": "Extra napkins",
            "openCashDrawer": false
        }"#;

        let receipt = assemble(text);

        assert_eq!(receipt.order_id, "1001");
        assert!(receipt.order_date.is_some());
        assert_eq!(
            receipt.customer,
            Some(Customer {
                name: "John Doe".to_string(),
                phone: Some("(555) 123-4567".to_string()),
                address: None,
            })
        );
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].total, dec("18.99"));
        assert_eq!(receipt.items[1].label(), "Coke - Can");
        assert_eq!(receipt.total, dec("25.91"));
        let payment = receipt.payment.unwrap();
        assert_eq!(payment.method, "Card");
        assert_eq!(payment.amount_paid, dec("25.91"));
        assert_eq!(receipt.notes, "Extra napkins");
        assert!(!receipt.open_cash_drawer);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let receipt = assemble("{}");
        assert_eq!(receipt, Receipt::new());

        let receipt = assemble("not a payload at all");
        assert_eq!(receipt, Receipt::new());
    }

    #[test]
    fn test_invalid_fields_keep_defaults() {
        let text = r#"{"subtotal":"abc","tax":"1.5","openCashDrawer":"sometimes",
            "items":[{"name":"Tea","quantity":"two","price":"x"}]}"#;
        let receipt = assemble(text);

        assert_eq!(receipt.subtotal, Decimal::ZERO);
        assert_eq!(receipt.tax, dec("1.5"));
        assert!(receipt.open_cash_drawer);
        assert_eq!(receipt.items[0].quantity, 1);
        assert_eq!(receipt.items[0].price, Decimal::ZERO);
        assert_eq!(receipt.items[0].total, Decimal::ZERO);
    }

    #[test]
    fn test_item_total_derived_in_fixed_point() {
        let text = r#"{"items":[
            {"name":"A","quantity":3,"price":"0.10"},
            {"name":"B","quantity":"7","price":"19.99"},
            {"name":"C","price":"1.10","total":"bad"}
        ]}"#;
        let items = assemble(text).items;

        assert_eq!(items[0].total, dec("0.30"));
        assert_eq!(items[1].total, dec("139.93"));
        assert_eq!(items[2].quantity, 1);
        assert_eq!(items[2].total, dec("1.10"));
    }

    #[test]
    fn test_items_without_name_are_skipped() {
        let text = r#"{"items":[{"price":1},{"name":""},{"name":"Kept"},"stray"]}"#;
        let items = assemble(text).items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Kept");
    }

    #[test]
    fn test_items_with_braces_in_strings() {
        let text = r#"{"items":[{"name":"Combo },{ deal","price":"5"},{"name":"Fries","price":"2"}]}"#;
        let items = assemble(text).items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Combo },{ deal");
    }

    #[test]
    fn test_dotted_keys_fallback() {
        let text = r#"{"customer.name":"Ann","customer.phone":"555","payment.amountPaid":"10"}"#;
        let receipt = assemble(text);

        let customer = receipt.customer.unwrap();
        assert_eq!(customer.name, "Ann");
        assert_eq!(customer.phone.as_deref(), Some("555"));
        let payment = receipt.payment.unwrap();
        assert_eq!(payment.method, "Cash");
        assert_eq!(payment.amount_paid, dec("10"));
    }

    #[test]
    fn test_nested_object_takes_precedence() {
        let text = r#"{"customer.name":"Flat","customer":{"name":"Nested"},"customer.phone":"555"}"#;
        let customer = assemble(text).customer.unwrap();
        assert_eq!(customer.name, "Nested");
        assert_eq!(customer.phone.as_deref(), Some("555"));
    }

    #[test]
    fn test_dotted_keys_disabled() {
        let text = r#"{"customer.name":"Ann"}"#;
        let receipt = ReceiptAssembler::new()
            .with_dotted_keys(false)
            .assemble(text)
            .unwrap();
        assert_eq!(receipt.customer, None);
    }

    #[test]
    fn test_customer_requires_name() {
        let receipt = assemble(r#"{"customer":{"phone":"555"}}"#);
        assert_eq!(receipt.customer, None);
    }

    #[test]
    fn test_payment_method_defaults_to_cash() {
        let receipt = assemble(r#"{"payment":{"amountPaid":20,"change":"1.5"}}"#);
        let payment = receipt.payment.unwrap();
        assert_eq!(payment.method, "Cash");
        assert_eq!(payment.change, dec("1.5"));
    }

    #[test]
    fn test_top_level_total_not_taken_from_items() {
        let text = r#"{"items":[{"name":"A","price":"2","total":"2"}],"total":"9.50"}"#;
        assert_eq!(assemble(text).total, dec("9.50"));
    }

    #[test]
    fn test_overflowing_line_total_keeps_zero() {
        let text = r#"{"items":[
            {"name":"A","quantity":2,"price":"79228162514264337593543950335"},
            {"name":"B","quantity":1,"price":"79228162514264337593543950335"}
        ]}"#;
        let items = assemble(text).items;

        assert_eq!(items[0].price, Decimal::MAX);
        assert_eq!(items[0].total, Decimal::ZERO);
        assert_eq!(items[1].total, Decimal::MAX);
    }

    #[test]
    fn test_extreme_amounts_still_assemble() {
        let max = "79228162514264337593543950335";
        let text = format!(
            r#"{{"orderId":"X","subtotal":"{max}","tax":"{max}","discount":"-{max}","total":"1",
               "items":[{{"name":"A","price":"{max}"}},{{"name":"B","price":"{max}","total":"{max}"}}],
               "payment":{{"amountPaid":"-{max}","change":"{max}"}}}}"#
        );
        let receipt = assemble(&text);

        assert_eq!(receipt.subtotal, Decimal::MAX);
        assert_eq!(receipt.tax, Decimal::MAX);
        assert_eq!(receipt.discount, Decimal::MIN);
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items_total(), None);
        assert_eq!(receipt.payment.unwrap().amount_paid, Decimal::MIN);
    }

    #[test]
    fn test_structural_failure() {
        let err = ReceiptAssembler::new()
            .assemble(r#"{"orderId":"1001","notes":"unterminated}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { .. }));
    }
}
