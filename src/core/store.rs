use crate::core::table::RawTable;

/// The most recently fetched raw tables. Both start out empty.
#[derive(Debug, Clone, Default)]
pub struct RawTableStore {
    exchange: RawTable,
    prices: RawTable,
}

impl RawTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_exchange_table(&mut self, table: RawTable) {
        self.exchange = table;
    }

    pub fn set_price_table(&mut self, table: RawTable) {
        self.prices = table;
    }

    pub fn exchange_table(&self) -> &RawTable {
        &self.exchange
    }

    pub fn price_table(&self) -> &RawTable {
        &self.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_replaces_tables_wholesale() {
        let mut store = RawTableStore::new();
        assert!(store.exchange_table().is_empty());
        assert!(store.price_table().is_empty());

        let first = RawTable::from_csv("Period;Värde\n2023-08-31 00:00;11,20\n").unwrap();
        store.set_exchange_table(first);
        assert_eq!(store.exchange_table().len(), 1);

        store.set_exchange_table(RawTable::default());
        assert!(store.exchange_table().is_empty());
        assert!(store.price_table().is_empty());
    }
}
