//! Best-effort reconciliation of free-text names against small preloaded
//! reference lists.
//!
//! Every matcher normalizes both sides, then scans the list twice: first for
//! an exact match, then for containment in either direction. The first list
//! element satisfying a pass wins, so results depend only on list order.

use storage::models::{Bank, Country, Organization};

const US_SYNONYMS: [&str; 5] = ["usa", "us", "united states", "united states of america", "america"];

const BANK_TOKENS: [&str; 2] = ["bank", "בנק"];

/// Trims, collapses internal whitespace and lowercases.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalizes a bank name and drops a leading or trailing "bank" token.
pub fn normalize_bank(raw: &str) -> String {
    let normalized = normalize(raw);
    let mut tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();

    if tokens.len() > 1 && BANK_TOKENS.contains(&tokens[0]) {
        tokens.remove(0);
    }
    if tokens.len() > 1 && tokens.last().is_some_and(|t| BANK_TOKENS.contains(t)) {
        tokens.pop();
    }

    tokens.join(" ")
}

fn is_us_synonym(normalized: &str) -> bool {
    let undotted = normalized.replace('.', "");
    US_SYNONYMS.contains(&undotted.trim())
}

/// Equality pass, then containment pass. Empty needles and empty candidates
/// never match.
fn find_by_name<'a, T>(
    items: &'a [T],
    needle: &str,
    key: impl Fn(&T) -> String,
) -> Option<&'a T> {
    if needle.is_empty() {
        return None;
    }

    let keyed: Vec<(String, &T)> = items
        .iter()
        .map(|item| (key(item), item))
        .filter(|(name, _)| !name.is_empty())
        .collect();

    keyed
        .iter()
        .find(|(name, _)| name == needle)
        .or_else(|| {
            keyed
                .iter()
                .find(|(name, _)| name.contains(needle) || needle.contains(name.as_str()))
        })
        .map(|(_, item)| *item)
}

pub fn match_country<'a>(countries: &'a [Country], raw: &str) -> Option<&'a Country> {
    let needle = normalize(raw);
    if needle.is_empty() {
        return None;
    }

    if is_us_synonym(&needle) {
        // "us" would otherwise be a substring of half the list
        return countries.iter().find(|country| {
            is_us_synonym(&normalize(&country.name))
                || country
                    .code
                    .as_deref()
                    .is_some_and(|code| is_us_synonym(&normalize(code)))
        });
    }

    find_by_name(countries, &needle, |country| normalize(&country.name))
}

pub fn match_bank<'a>(banks: &'a [Bank], raw: &str) -> Option<&'a Bank> {
    find_by_name(banks, &normalize_bank(raw), |bank| normalize_bank(&bank.name))
}

pub fn match_organization<'a>(
    organizations: &'a [Organization],
    raw: &str,
) -> Option<&'a Organization> {
    find_by_name(organizations, &normalize(raw), |organization| {
        normalize(&organization.name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn country(name: &str, code: Option<&str>) -> Country {
        Country {
            country_id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.map(str::to_string),
        }
    }

    fn bank(name: &str) -> Bank {
        Bank {
            bank_id: Uuid::new_v4(),
            name: name.to_string(),
            code: None,
        }
    }

    fn organization(name: &str) -> Organization {
        Organization {
            organization_id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  United   Kingdom "), "united kingdom");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_bank_strips_token() {
        assert_eq!(normalize_bank("Bank Leumi"), "leumi");
        assert_eq!(normalize_bank("Mizrahi Tefahot BANK"), "mizrahi tefahot");
        assert_eq!(normalize_bank("בנק הפועלים"), "הפועלים");
        assert_eq!(normalize_bank("Bank"), "bank");
    }

    #[test]
    fn test_us_variants_resolve_to_united_states() {
        let countries = vec![
            country("Australia", Some("AU")),
            country("Israel", Some("IL")),
            country("United States", Some("US")),
        ];

        for raw in ["USA", "us", "U.S.A.", "United States", " united states of america "] {
            let matched = match_country(&countries, raw).map(|c| c.name.as_str());
            assert_eq!(matched, Some("United States"), "input {raw:?}");
        }
    }

    #[test]
    fn test_us_variant_matches_by_code() {
        let countries = vec![country("ארצות הברית", Some("US"))];
        assert!(match_country(&countries, "USA").is_some());
    }

    #[test]
    fn test_us_variant_without_us_row_is_none() {
        let countries = vec![country("Australia", Some("AU"))];
        assert!(match_country(&countries, "US").is_none());
    }

    #[test]
    fn test_country_equality_beats_containment() {
        let countries = vec![country("Israel Region", None), country("israel", None)];
        let matched = match_country(&countries, "ISRAEL").map(|c| c.name.as_str());
        assert_eq!(matched, Some("israel"));
    }

    #[test]
    fn test_country_containment_either_direction() {
        let countries = vec![country("United Kingdom", Some("GB"))];
        assert!(match_country(&countries, "London, United Kingdom").is_some());
        assert!(match_country(&countries, "kingdom").is_some());
        assert!(match_country(&countries, "France").is_none());
        assert!(match_country(&countries, "   ").is_none());
    }

    #[test]
    fn test_bank_match() {
        let banks = vec![bank("Bank Hapoalim"), bank("Bank Leumi"), bank("Discount Bank")];
        let matched = match_bank(&banks, "leumi").map(|b| b.name.as_str());
        assert_eq!(matched, Some("Bank Leumi"));

        let matched = match_bank(&banks, "Israel Discount").map(|b| b.name.as_str());
        assert_eq!(matched, Some("Discount Bank"));

        assert!(match_bank(&banks, "").is_none());
        assert!(match_bank(&banks, "Chase").is_none());
    }

    #[test]
    fn test_first_containment_match_wins() {
        let banks = vec![bank("Mizrahi Tefahot"), bank("Mizrahi")];
        let first = match_bank(&banks, "Tefahot").map(|b| b.bank_id);
        assert_eq!(first, Some(banks[0].bank_id));

        for _ in 0..10 {
            assert_eq!(match_bank(&banks, "Tefahot").map(|b| b.bank_id), first);
        }
    }

    #[test]
    fn test_organization_match() {
        let organizations = vec![organization("Kupat Ha'ir"), organization("Chabad House")];
        let matched = match_organization(&organizations, "  chabad house london")
            .map(|o| o.name.as_str());
        assert_eq!(matched, Some("Chabad House"));
        assert!(match_organization(&organizations, "Yad Sarah").is_none());
    }
}
