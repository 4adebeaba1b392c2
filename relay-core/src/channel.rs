//! Channel identity normalization and address renderings.
//!
//! Telegram reports channel ids in several encodings: full numeric form
//! (`-100xxxxxxxxxx`), the short form with the `-100` prefix stripped, and
//! `@username` strings. Source filtering compares canonical forms; delivery
//! tries the renderings in a fixed priority order.

use std::fmt;

/// A configured channel identity in whatever form the deployment provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAddress {
    raw: String,
}

/// One encoding of a channel address, tried in order by delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRendering {
    /// Numeric id with the `-100` channel prefix stripped.
    Short(i64),
    /// Numeric id as configured.
    Full(i64),
    /// Non-numeric form, e.g. `@username`.
    Raw(String),
}

impl fmt::Display for AddressRendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressRendering::Short(id) => write!(f, "short:{}", id),
            AddressRendering::Full(id) => write!(f, "full:{}", id),
            AddressRendering::Raw(s) => write!(f, "raw:{}", s),
        }
    }
}

/// Strips the `-100` channel prefix when the remainder is purely numeric.
fn canonical_id(s: &str) -> &str {
    match s.strip_prefix("-100") {
        Some(rest) if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) => rest,
        _ => s,
    }
}

impl ChannelAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_string(),
        }
    }

    /// The address exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Canonical string form used for identity comparison and storage keys.
    pub fn canonical(&self) -> &str {
        canonical_id(&self.raw)
    }

    /// True when an inbound chat id names this channel under normalized
    /// comparison, whatever encoding the wire used.
    pub fn matches_chat_id(&self, chat_id: i64) -> bool {
        let wire = chat_id.to_string();
        canonical_id(&wire) == self.canonical()
    }

    /// Address encodings to attempt, in priority order: short id, full
    /// numeric id, then the raw form for non-numeric addresses.
    pub fn renderings(&self) -> Vec<AddressRendering> {
        let short = self
            .raw
            .strip_prefix("-100")
            .and_then(|rest| rest.parse::<i64>().ok())
            .filter(|id| *id > 0);
        let full = self.raw.parse::<i64>().ok();

        match (short, full) {
            (Some(short), Some(full)) => {
                vec![AddressRendering::Short(short), AddressRendering::Full(full)]
            }
            (None, Some(full)) => vec![AddressRendering::Full(full)],
            _ => vec![AddressRendering::Raw(self.raw.clone())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_strips_channel_prefix() {
        assert_eq!(ChannelAddress::new("-1001234567890").canonical(), "1234567890");
        assert_eq!(ChannelAddress::new("1234567890").canonical(), "1234567890");
    }

    #[test]
    fn test_canonical_leaves_other_forms_alone() {
        assert_eq!(ChannelAddress::new("@signals").canonical(), "@signals");
        assert_eq!(ChannelAddress::new("-12345").canonical(), "-12345");
        assert_eq!(ChannelAddress::new("-100").canonical(), "-100");
    }

    #[test]
    fn test_matches_chat_id_across_encodings() {
        let address = ChannelAddress::new("-1001234567890");
        assert!(address.matches_chat_id(-1001234567890));
        assert!(address.matches_chat_id(1234567890));
        assert!(!address.matches_chat_id(-1009999999999));

        let short_config = ChannelAddress::new("1234567890");
        assert!(short_config.matches_chat_id(-1001234567890));
    }

    #[test]
    fn test_renderings_order_for_full_channel_id() {
        let address = ChannelAddress::new("-1001234567890");
        assert_eq!(
            address.renderings(),
            vec![
                AddressRendering::Short(1234567890),
                AddressRendering::Full(-1001234567890),
            ]
        );
    }

    #[test]
    fn test_renderings_plain_numeric_and_username() {
        assert_eq!(
            ChannelAddress::new("1234567890").renderings(),
            vec![AddressRendering::Full(1234567890)]
        );
        assert_eq!(
            ChannelAddress::new("@signals").renderings(),
            vec![AddressRendering::Raw("@signals".to_string())]
        );
    }
}
