// Price formatting - maps the buyer's locale to a display currency
// Ghana gets special handling because Paystack settles there in cedis

/// USD -> GHS conversion used when quoting cedi prices. Fixed snapshot rate;
/// a real deployment would pull this from an FX feed.
pub const USD_TO_GHS_RATE: f64 = 12.35;

const LOCALE_CURRENCIES: &[(&str, &str)] = &[
    ("en-US", "USD"),
    ("en-GB", "GBP"),
    ("en-CA", "CAD"),
    ("en-AU", "AUD"),
    ("en-NZ", "NZD"),
    ("ja-JP", "JPY"),
    ("de-DE", "EUR"),
    ("fr-FR", "EUR"),
    ("it-IT", "EUR"),
    ("es-ES", "EUR"),
    ("zh-CN", "CNY"),
    ("ko-KR", "KRW"),
    ("ru-RU", "RUB"),
    ("pt-BR", "BRL"),
    ("hi-IN", "INR"),
    ("en-GH", "GHS"),
];

/// Resolve the display currency for a BCP 47 locale tag.
pub fn currency_for_locale(locale: &str) -> &'static str {
    // Ghanaian languages, or any locale tagged with the GH region
    if locale.starts_with("ak")
        || locale.starts_with("ee")
        || locale.starts_with("ga")
        || locale.contains("-GH")
    {
        return "GHS";
    }

    if let Some((_, currency)) = LOCALE_CURRENCIES.iter().find(|(l, _)| *l == locale) {
        return currency;
    }

    // Fall back to the first locale sharing the language part
    let language = locale.split('-').next().unwrap_or(locale);
    if let Some((_, currency)) = LOCALE_CURRENCIES
        .iter()
        .find(|(l, _)| l.split('-').next() == Some(language))
    {
        return currency;
    }

    "USD"
}

fn symbol_for(currency: &str) -> &'static str {
    match currency {
        "USD" | "CAD" | "AUD" | "NZD" => "$",
        "GBP" => "£",
        "EUR" => "€",
        "JPY" | "CNY" => "¥",
        "KRW" => "₩",
        "RUB" => "₽",
        "BRL" => "R$",
        "INR" => "₹",
        "GHS" => "GH₵",
        _ => "$",
    }
}

/// Format a USD price for the given locale. Unknown locales fall back to USD.
pub fn format_price(price: f64, locale: Option<&str>) -> String {
    let currency = locale.map(currency_for_locale).unwrap_or("USD");

    let amount = match currency {
        "GHS" => convert_to_ghs(price),
        _ => price,
    };

    match currency {
        // Zero-decimal currencies
        "JPY" | "KRW" => format!("{}{:.0}", symbol_for(currency), amount),
        _ => format!("{}{:.2}", symbol_for(currency), amount),
    }
}

pub fn convert_to_ghs(usd_price: f64) -> f64 {
    usd_price * USD_TO_GHS_RATE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_locales() {
        assert_eq!(currency_for_locale("en-US"), "USD");
        assert_eq!(currency_for_locale("ja-JP"), "JPY");
        assert_eq!(currency_for_locale("de-DE"), "EUR");
    }

    #[test]
    fn test_ghana_locales() {
        assert_eq!(currency_for_locale("en-GH"), "GHS");
        assert_eq!(currency_for_locale("ak"), "GHS");
        assert_eq!(currency_for_locale("ee-GH"), "GHS");
    }

    #[test]
    fn test_language_fallback() {
        // Unlisted region falls back to the language's first mapping
        assert_eq!(currency_for_locale("en-IE"), "USD");
        assert_eq!(currency_for_locale("fr-BE"), "EUR");
        assert_eq!(currency_for_locale("xx-YY"), "USD");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.99, None), "$0.99");
        assert_eq!(format_price(0.99, Some("en-GB")), "£0.99");
        assert_eq!(format_price(100.0, Some("ja-JP")), "¥100");
        assert_eq!(format_price(1.0, Some("en-GH")), "GH₵12.35");
    }
}
