//! A print job: one payload assembled, laid out and ready to render.

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::assembly::{ReceiptAssembler, ReceiptParser};
use crate::error::Result;
use crate::layout::{DrawCommand, LayoutEngine, MonospaceMetrics, TextMeasure};
use crate::models::{Receipt, StoreProfile};
use crate::render::{self, RenderSurface};

/// An assembled receipt together with its draw commands.
#[derive(Debug, Clone)]
pub struct PrintJob {
    receipt: Receipt,
    commands: Vec<DrawCommand>,
    opens_cash_drawer: bool,
}

impl PrintJob {
    /// Assemble `payload` and lay it out with monospace metrics.
    pub fn from_payload(payload: &str, profile: &StoreProfile) -> Result<Self> {
        Self::prepare(
            payload,
            profile,
            MonospaceMetrics::new(),
            Local::now().naive_local(),
        )
    }

    /// Assemble `payload` and lay it out with `metrics`, stamping the
    /// footer with `printed_at`.
    pub fn prepare<M: TextMeasure>(
        payload: &str,
        profile: &StoreProfile,
        metrics: M,
        printed_at: NaiveDateTime,
    ) -> Result<Self> {
        let receipt = ReceiptAssembler::new().assemble(payload)?;
        Ok(Self::from_receipt(receipt, profile, metrics, printed_at))
    }

    /// Lay out an already assembled receipt.
    pub fn from_receipt<M: TextMeasure>(
        receipt: Receipt,
        profile: &StoreProfile,
        metrics: M,
        printed_at: NaiveDateTime,
    ) -> Self {
        let commands = LayoutEngine::with_metrics(metrics).layout_at(&receipt, profile, printed_at);
        let opens_cash_drawer = receipt.open_cash_drawer && profile.enable_cash_drawer;

        Self {
            receipt,
            commands,
            opens_cash_drawer,
        }
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Whether rendering this job opens the cash drawer.
    ///
    /// Both the transaction and the store profile have to allow it.
    pub fn opens_cash_drawer(&self) -> bool {
        self.opens_cash_drawer
    }

    /// Render the job on `surface`, then open the cash drawer if allowed.
    pub fn execute<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        render::execute(&self.commands, surface)?;

        if self.opens_cash_drawer {
            info!("Opening cash drawer for order {:?}", self.receipt.order_id);
            surface.open_cash_drawer()?;
        }
        Ok(())
    }
}

/// Assemble, lay out and render `payload` on `surface`.
///
/// The layout is measured with the surface's own metrics.
pub fn print<S: RenderSurface>(
    payload: &str,
    profile: &StoreProfile,
    surface: &mut S,
) -> Result<PrintJob> {
    let job = PrintJob::prepare(payload, profile, &*surface, Local::now().naive_local())?;
    job.execute(surface)?;

    info!(
        "Printed order {:?}: {} items, {} commands",
        job.receipt.order_id,
        job.receipt.items.len(),
        job.commands.len()
    );
    Ok(job)
}
