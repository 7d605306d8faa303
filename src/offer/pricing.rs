use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fixed prices of the offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    /// List price ("de")
    pub from: Decimal,
    /// Offer price ("por")
    pub to: Decimal,
    /// Advertised discount, whole percent
    pub discount_pct: u32,
    /// ISO 4217 code sent to analytics
    pub currency: String,
}

impl PriceTable {
    pub fn savings(&self) -> Decimal {
        self.from - self.to
    }

    /// Offer price as a float for analytics payloads.
    pub fn value(&self) -> f64 {
        self.to.to_f64().unwrap_or_default()
    }

    pub fn display(&self) -> PriceDisplay {
        PriceDisplay {
            from: format_brl(self.from),
            to: format_brl(self.to),
            savings: format_brl(self.savings()),
            discount: format!("{}%", self.discount_pct),
        }
    }
}

/// Prices as the page shows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceDisplay {
    pub from: String,
    pub to: String,
    pub savings: String,
    pub discount: String,
}

/// `R$ 659,90`. Two decimals, comma separator, no thousands grouping.
pub fn format_brl(price: Decimal) -> String {
    format!("R$ {:.2}", price).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> PriceTable {
        PriceTable {
            from: dec!(2199.90),
            to: dec!(659.90),
            discount_pct: 70,
            currency: "BRL".into(),
        }
    }

    #[test]
    fn test_savings() {
        assert_eq!(table().savings(), dec!(1540.00));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(dec!(659.9)), "R$ 659,90");
        assert_eq!(format_brl(dec!(2199.90)), "R$ 2199,90");
        assert_eq!(format_brl(dec!(5)), "R$ 5,00");
    }

    #[test]
    fn test_display() {
        let display = table().display();
        assert_eq!(display.from, "R$ 2199,90");
        assert_eq!(display.to, "R$ 659,90");
        assert_eq!(display.savings, "R$ 1540,00");
        assert_eq!(display.discount, "70%");
    }

    #[test]
    fn test_value() {
        assert!((table().value() - 659.9).abs() < 1e-9);
    }
}
