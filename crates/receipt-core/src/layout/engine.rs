//! Receipt layout engine.

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{Receipt, StoreProfile};
use crate::money::{format_currency, format_deduction};

use super::canvas::{Canvas, Column};
use super::logo::{load_logo, logo_size};
use super::metrics::{MonospaceMetrics, TextMeasure};
use super::{DrawCommand, FontStyle};

const TOP_MARGIN: f32 = 10.0;

const ORDER_DATE_FORMAT: &str = "%m/%d/%Y %H:%M";
const PRINTED_AT_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

const THANK_YOU: &str = "Thank you for your business!";

/// Computes the draw commands for a receipt.
///
/// The engine is pure: the same receipt, profile and timestamp always give
/// the same commands.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine<M: TextMeasure = MonospaceMetrics> {
    metrics: M,
}

impl LayoutEngine<MonospaceMetrics> {
    /// Create an engine with monospace metrics.
    pub fn new() -> Self {
        Self::with_metrics(MonospaceMetrics::new())
    }
}

impl<M: TextMeasure> LayoutEngine<M> {
    /// Create an engine measuring text with `metrics`.
    pub fn with_metrics(metrics: M) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Lay out `receipt`, stamping the footer with the local time.
    pub fn layout(&self, receipt: &Receipt, profile: &StoreProfile) -> Vec<DrawCommand> {
        self.layout_at(receipt, profile, Local::now().naive_local())
    }

    /// Lay out `receipt` with an explicit footer timestamp.
    pub fn layout_at(
        &self,
        receipt: &Receipt,
        profile: &StoreProfile,
        printed_at: NaiveDateTime,
    ) -> Vec<DrawCommand> {
        let mut canvas = Canvas::new(&self.metrics, profile.page_width, TOP_MARGIN);
        let currency = profile.currency.as_str();

        self.logo(&mut canvas, profile);
        self.header(&mut canvas, profile);
        self.order_info(&mut canvas, receipt);
        self.customer(&mut canvas, receipt);
        self.items(&mut canvas, receipt, currency);
        self.totals(&mut canvas, receipt, currency);
        self.payment(&mut canvas, receipt, currency);
        self.notes(&mut canvas, receipt);
        self.footer(&mut canvas, printed_at);

        let height = canvas.cursor();
        let commands = canvas.finish();
        info!(
            "Laid out receipt {:?}: {} commands, {:.0} units tall",
            receipt.order_id,
            commands.len(),
            height
        );
        commands
    }

    fn logo(&self, canvas: &mut Canvas<'_, M>, profile: &StoreProfile) {
        let Some(path) = profile.logo_path.as_deref() else {
            return;
        };
        if let Some((width, height)) = load_logo(path) {
            canvas.image(path, logo_size(width, height));
            canvas.gap(10.0);
        }
    }

    fn header(&self, canvas: &mut Canvas<'_, M>, profile: &StoreProfile) {
        if !profile.name.is_empty() {
            canvas.centered(&profile.name, 16.0, FontStyle::Bold);
            canvas.gap(5.0);
        }
        if !profile.address.is_empty() {
            canvas.centered(&profile.address, 10.0, FontStyle::Regular);
            canvas.gap(2.0);
        }
        if !profile.phone.is_empty() {
            canvas.centered(&profile.phone, 10.0, FontStyle::Regular);
            canvas.gap(10.0);
        }
    }

    fn order_info(&self, canvas: &mut Canvas<'_, M>, receipt: &Receipt) {
        if !receipt.order_id.is_empty() {
            canvas.row(&[
                Column::left("Order ID:", 0.6, 12.0),
                Column::right(receipt.order_id.as_str(), 0.4, 12.0),
            ]);
        }
        if let Some(date) = receipt.order_date {
            canvas.row(&[
                Column::left("Date:", 0.6, 10.0),
                Column::right(date.format(ORDER_DATE_FORMAT).to_string(), 0.4, 10.0),
            ]);
        }
    }

    fn customer(&self, canvas: &mut Canvas<'_, M>, receipt: &Receipt) {
        if let Some(customer) = receipt.customer.as_ref().filter(|c| !c.name.is_empty()) {
            canvas.gap(5.0);
            canvas.row(&[
                Column::left("Customer:", 0.3, 10.0),
                Column::left(customer.name.as_str(), 0.7, 10.0),
            ]);
        }

        canvas.gap(10.0);
        canvas.rule();
        canvas.gap(5.0);
    }

    fn items(&self, canvas: &mut Canvas<'_, M>, receipt: &Receipt, currency: &str) {
        if receipt.items.is_empty() {
            debug!("No items to lay out");
            return;
        }

        canvas.row(&[
            Column::left("Item", 0.5, 10.0),
            Column::center("Qty", 0.15, 10.0),
            Column::right("Price", 0.175, 10.0),
            Column::right("Total", 0.175, 10.0),
        ]);
        canvas.rule();
        canvas.gap(2.0);

        for item in &receipt.items {
            canvas.row(&[
                Column::left(item.label(), 0.5, 10.0),
                Column::center(item.quantity.to_string(), 0.15, 10.0),
                Column::right(format_currency(item.price, currency), 0.175, 10.0),
                Column::right(format_currency(item.total, currency), 0.175, 10.0),
            ]);
        }

        canvas.gap(10.0);
        canvas.rule();
        canvas.gap(5.0);
    }

    fn totals(&self, canvas: &mut Canvas<'_, M>, receipt: &Receipt, currency: &str) {
        if receipt.subtotal > Decimal::ZERO {
            amount_row(canvas, "Subtotal:", format_currency(receipt.subtotal, currency));
        }
        if receipt.tax > Decimal::ZERO {
            amount_row(canvas, "Tax:", format_currency(receipt.tax, currency));
        }
        if receipt.discount > Decimal::ZERO {
            amount_row(canvas, "Discount:", format_deduction(receipt.discount, currency));
        }

        canvas.gap(5.0);
        canvas.row(&[
            Column::left("TOTAL:", 0.7, 14.0).with_style(FontStyle::Bold),
            Column::right(format_currency(receipt.total, currency), 0.3, 14.0)
                .with_style(FontStyle::Bold),
        ]);
    }

    fn payment(&self, canvas: &mut Canvas<'_, M>, receipt: &Receipt, currency: &str) {
        let Some(payment) = &receipt.payment else {
            return;
        };

        canvas.gap(10.0);
        canvas.rule();
        canvas.gap(5.0);

        if !payment.method.is_empty() {
            canvas.row(&[
                Column::left("Payment:", 0.6, 10.0),
                Column::right(payment.method.as_str(), 0.4, 10.0),
            ]);
        }
        if payment.amount_paid > Decimal::ZERO {
            canvas.row(&[
                Column::left("Paid:", 0.6, 10.0),
                Column::right(format_currency(payment.amount_paid, currency), 0.4, 10.0),
            ]);
        }
        if payment.change > Decimal::ZERO {
            canvas.row(&[
                Column::left("Change:", 0.6, 10.0),
                Column::right(format_currency(payment.change, currency), 0.4, 10.0),
            ]);
        }
    }

    fn notes(&self, canvas: &mut Canvas<'_, M>, receipt: &Receipt) {
        if receipt.notes.is_empty() {
            return;
        }

        canvas.gap(10.0);
        canvas.rule();
        canvas.gap(5.0);
        canvas.centered(&receipt.notes, 10.0, FontStyle::Italic);
    }

    fn footer(&self, canvas: &mut Canvas<'_, M>, printed_at: NaiveDateTime) {
        canvas.gap(15.0);
        canvas.centered(THANK_YOU, 12.0, FontStyle::Bold);
        canvas.gap(5.0);
        canvas.centered(&printed_at.format(PRINTED_AT_FORMAT).to_string(), 8.0, FontStyle::Regular);
    }
}

fn amount_row<M: TextMeasure>(canvas: &mut Canvas<'_, M>, label: &str, value: String) {
    canvas.row(&[Column::left(label, 0.7, 11.0), Column::right(value, 0.3, 11.0)]);
}
