use std::collections::HashMap;
use std::sync::Arc;

const BUILTIN_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("GBp", "p"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("CHF", "CHF"),
    ("CAD", "C$"),
    ("AUD", "A$"),
    ("HKD", "HK$"),
    ("INR", "₹"),
    ("KRW", "₩"),
    ("SEK", "kr"),
    ("NOK", "kr"),
    ("DKK", "kr"),
    ("PLN", "zł"),
    ("BRL", "R$"),
    ("RUB", "₽"),
    ("TRY", "₺"),
    ("ZAR", "R"),
    ("SGD", "S$"),
    ("NZD", "NZ$"),
    ("MXN", "MX$"),
    ("ILS", "₪"),
    ("THB", "฿"),
    ("TWD", "NT$"),
    ("CZK", "Kč"),
    ("HUF", "Ft"),
];

/// Immutable mapping from ISO currency codes to display symbols.
///
/// Cloning is cheap; the underlying map is shared.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    symbols: Arc<HashMap<String, String>>,
}

impl CurrencyTable {
    pub fn new(symbols: HashMap<String, String>) -> Self {
        Self {
            symbols: Arc::new(symbols),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_SYMBOLS
                .iter()
                .map(|(code, symbol)| (code.to_string(), symbol.to_string()))
                .collect(),
        )
    }

    /// Builtin table with `overrides` layered on top.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut symbols: HashMap<String, String> = BUILTIN_SYMBOLS
            .iter()
            .map(|(code, symbol)| (code.to_string(), symbol.to_string()))
            .collect();
        symbols.extend(overrides);
        Self::new(symbols)
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.symbols.get(code).map(String::as_str)
    }

    /// Display symbol for `code`, or the code itself when it has no mapping.
    pub fn symbol_or_code(&self, code: &str) -> String {
        self.get(code).unwrap_or(code).to_string()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::builtin()
    }
}
