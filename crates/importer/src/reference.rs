//! Controlled vocabularies the seed guarantees exist before any donor is
//! imported.

/// Address-type rows, by display name.
pub const ADDRESS_TYPE_NAMES: [&str; 3] = ["בית", "עבודה", "שטיבל"];

/// Payment-method rows, by display name.
pub const DONATION_METHOD_NAMES: [&str; 3] = ["תשלום עמותה", "העברה בנקאית", "מזומן"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Home,
    Work,
    Stiebel,
}

impl AddressKind {
    /// Name of the matching `donor_address_types` row
    pub fn reference_name(&self) -> &'static str {
        match self {
            Self::Home => ADDRESS_TYPE_NAMES[0],
            Self::Work => ADDRESS_TYPE_NAMES[1],
            Self::Stiebel => ADDRESS_TYPE_NAMES[2],
        }
    }

    /// Only home addresses are primary.
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// Accepts the Hebrew labels used in the spreadsheets and their English
    /// equivalents.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "בית" | "home" | "house" => Some(Self::Home),
            "עבודה" | "work" | "office" => Some(Self::Work),
            "שטיבל" | "בית כנסת" | "stiebel" | "shtiebel" | "synagogue" => Some(Self::Stiebel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_kind_from_label() {
        assert_eq!(AddressKind::from_label("בית"), Some(AddressKind::Home));
        assert_eq!(AddressKind::from_label(" Work "), Some(AddressKind::Work));
        assert_eq!(AddressKind::from_label("בית כנסת"), Some(AddressKind::Stiebel));
        assert_eq!(AddressKind::from_label("vacation"), None);
    }

    #[test]
    fn test_only_home_is_primary() {
        assert!(AddressKind::Home.is_primary());
        assert!(!AddressKind::Work.is_primary());
        assert!(!AddressKind::Stiebel.is_primary());
    }

    #[test]
    fn test_reference_names_are_seeded_names() {
        for kind in [AddressKind::Home, AddressKind::Work, AddressKind::Stiebel] {
            assert!(ADDRESS_TYPE_NAMES.contains(&kind.reference_name()));
        }
    }
}
