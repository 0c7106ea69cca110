//! Ledger adapter configuration.

/// Configuration for the in-memory ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Largest page a paginated scan or query may request.
    pub max_page_size: i32,
    /// Prefix of generated transaction IDs.
    pub tx_id_prefix: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_page_size: 1000,
            tx_id_prefix: "tx-".to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn with_max_page_size(mut self, max_page_size: i32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    pub fn with_tx_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tx_id_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = LedgerConfig::default()
            .with_max_page_size(10)
            .with_tx_id_prefix("block-");
        assert_eq!(config.max_page_size, 10);
        assert_eq!(config.tx_id_prefix, "block-");
        assert_eq!(LedgerConfig::default().max_page_size, 1000);
    }
}
