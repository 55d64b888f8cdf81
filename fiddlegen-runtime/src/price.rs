//! Fixed OHLCV slot table.
//!
//! A price-tuple input is passed to the native library as one unit, but the
//! generated wrapper stores its six arrays in the input map under fixed slots.
//! The slot numbers are part of the contract with the native library and do
//! not depend on descriptor order.

pub const PRICE_SLOT_OPEN: usize = 0;
pub const PRICE_SLOT_HIGH: usize = 1;
pub const PRICE_SLOT_LOW: usize = 2;
pub const PRICE_SLOT_CLOSE: usize = 3;
pub const PRICE_SLOT_VOLUME: usize = 4;
pub const PRICE_SLOT_OPEN_INTEREST: usize = 5;

pub const PRICE_SLOT_COUNT: usize = 6;

/// Slot table in argument order: (component name, slot).
///
/// The generator reads this table to name the price parameters of every
/// wrapper and to place each array in its slot.
pub const PRICE_SLOTS: [(&str, usize); PRICE_SLOT_COUNT] = [
    ("open", PRICE_SLOT_OPEN),
    ("high", PRICE_SLOT_HIGH),
    ("low", PRICE_SLOT_LOW),
    ("close", PRICE_SLOT_CLOSE),
    ("volume", PRICE_SLOT_VOLUME),
    ("open_interest", PRICE_SLOT_OPEN_INTEREST),
];

/// Borrowed view of the six aligned price arrays.
#[derive(Debug, Clone, Copy)]
pub struct PriceInput<'a> {
    pub open: &'a [f64],
    pub high: &'a [f64],
    pub low: &'a [f64],
    pub close: &'a [f64],
    pub volume: &'a [f64],
    pub open_interest: &'a [f64],
}

impl<'a> PriceInput<'a> {
    /// Arrays in slot order.
    pub fn slots(&self) -> [&'a [f64]; PRICE_SLOT_COUNT] {
        [
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.open_interest,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_table_is_zero_through_five_in_ohlcv_order() {
        let names: Vec<&str> = PRICE_SLOTS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["open", "high", "low", "close", "volume", "open_interest"]
        );
        for (position, (_, slot)) in PRICE_SLOTS.iter().enumerate() {
            assert_eq!(position, *slot);
        }
    }

    #[test]
    fn slots_follow_table_order() {
        let series: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64; 3]).collect();
        let price = PriceInput {
            open: &series[0],
            high: &series[1],
            low: &series[2],
            close: &series[3],
            volume: &series[4],
            open_interest: &series[5],
        };
        for (slot, data) in price.slots().iter().enumerate() {
            assert_eq!(data[0], slot as f64);
        }
    }
}
