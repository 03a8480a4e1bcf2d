use crate::domain::cart::Cart;
use crate::domain::checkout::PaymentStatus;
use crate::error::Result;
use std::io::Write;

/// Writes the end-of-session summary as CSV.
pub struct SessionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SessionWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    pub fn write_summary(&mut self, status: PaymentStatus, cart: &Cart) -> Result<()> {
        self.writer.write_record(["status", "items", "total"])?;
        self.writer.write_record([
            status.to_string(),
            cart.len().to_string(),
            cart.total().to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Product;

    #[test]
    fn test_summary_format() {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: 1,
            name: "espresso".to_string(),
            price: "2.50".to_string(),
            images: Vec::new(),
            categories: Vec::new(),
        })
        .unwrap();

        let mut out = Vec::new();
        SessionWriter::new(&mut out)
            .write_summary(PaymentStatus::Idle, &cart)
            .unwrap();

        let written = String::from_utf8(out).unwrap();
        assert_eq!(written, "status,items,total\nidle,1,2.50\n");
    }
}
