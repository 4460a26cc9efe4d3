//! Order confirmation

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::{Columns, Rows}},
};

use crate::{notify::OrderSummary, payment::PaymentReceipt, totals::OrderTotals};

/// Everything the confirmation screen shows once the processor has
/// confirmed the charge.
#[derive(Debug, Clone)]
pub struct OrderConfirmation<'a> {
    /// Proof of capture from the processor.
    pub receipt: PaymentReceipt<'a>,

    /// Totals as submitted.
    pub totals: OrderTotals<'a>,

    /// The summary the notifications were built from.
    pub summary: OrderSummary<'a>,
}

impl OrderConfirmation<'_> {
    /// Processor transaction id for the captured charge.
    #[must_use]
    pub fn transaction_id(&self) -> &str {
        &self.receipt.transaction_id
    }

    /// Render the confirmation as a line-item table followed by the
    /// totals block.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if writing fails.
    pub fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Color", "Length", "Packs", "Qty", "Line Total"]);

        for line in &self.summary.lines {
            builder.push_record([
                line.name.clone(),
                line.color.clone(),
                line.length.clone(),
                line.packs.to_string(),
                line.quantity.to_string(),
                line.price.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Subtotal: {}", self.totals.subtotal)?;
        writeln!(out, " Tax:      {}", self.totals.tax)?;
        writeln!(out, " Shipping: {}", self.totals.shipping)?;
        writeln!(out, " Total:    {}", self.totals.grand_total)?;
        writeln!(out)?;
        writeln!(
            out,
            " Paid by {} (transaction {})",
            self.summary.payment_method.label(),
            self.receipt.transaction_id
        )?;

        Ok(())
    }
}
