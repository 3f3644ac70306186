/// Code stored when a donation has no currency text.
pub const DEFAULT_CURRENCY: &str = "ILS";

/// Maps the spreadsheet's currency text to an ISO-4217 code. Unrecognized
/// text is kept as given (trimmed).
pub fn currency_code(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return DEFAULT_CURRENCY.to_string();
    }

    let code = match raw.to_lowercase().as_str() {
        "שקל" | "שקלים" | "ש\"ח" | "ש״ח" | "₪" | "ils" | "nis" => "ILS",
        "דולר" | "דולרים" | "$" | "usd" => "USD",
        "לירה שטרלינג" | "ליש\"ט" | "ליש״ט" | "£" | "gbp" => "GBP",
        "יורו" | "€" | "eur" => "EUR",
        _ => return raw.to_string(),
    };

    code.to_string()
}
