pub const DEFAULT_CURRENCY: &str = "USD";

const LOCALE_CURRENCY: &[(&str, &str)] = &[
    ("en-US", "USD"),
    ("en-GB", "GBP"),
    ("tr-TR", "TRY"),
    ("de-DE", "EUR"),
    ("fr-FR", "EUR"),
    ("it-IT", "EUR"),
    ("es-ES", "EUR"),
    ("ja-JP", "JPY"),
];

const CURRENCY_SYMBOL: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("TRY", "₺"),
    ("JPY", "¥"),
];

/// `tr_TR` and `tr-TR` are the same locale.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-")
}

pub fn currency_code(locale: &str) -> &'static str {
    let locale = normalize_locale(locale);
    LOCALE_CURRENCY
        .iter()
        .find(|(candidate, _)| *candidate == locale)
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_CURRENCY)
}

pub fn currency_symbol(code: &str) -> &'static str {
    CURRENCY_SYMBOL
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, symbol)| *symbol)
        .unwrap_or("$")
}

/// Symbol-prefixed price with two decimals.
pub fn format_price(price: f64, locale: &str) -> String {
    let symbol = currency_symbol(currency_code(locale));
    format!("{symbol}{price:.2}")
}
