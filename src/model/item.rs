use crate::money::Amount;

/// A sold line on the receipt.
///
/// Items are created by [`Receipt::add_item`](crate::receipt::Receipt::add_item),
/// which stamps the receipt's currency at that moment. Changing the receipt
/// currency later does not touch items already added.
///
/// Negative quantities or prices are accepted and simply produce negative
/// amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    quantity: i64,
    unit_price: Amount,
    discount: Amount,
    currency: String,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        unit_price: Amount,
        discount: Amount,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            discount,
            currency: currency.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    /// Discount per unit.
    pub fn discount(&self) -> Amount {
        self.discount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// `(unit_price - discount) * quantity`, saturating at the `i64` bounds.
    pub fn subtotal(&self) -> Amount {
        self.unit_price
            .saturating_sub(self.discount)
            .saturating_mul(self.quantity)
    }

    /// `quantity * discount`, saturating at the `i64` bounds.
    pub fn total_discount(&self) -> Amount {
        self.quantity.saturating_mul(self.discount)
    }
}
