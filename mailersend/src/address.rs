//! # Address
//!
//! Module dedicated to address parsing. Raw addresses like `Display
//! Name <user@example.com>` are parsed with the address header parser
//! of [`mail_parser`], and degrade to an empty email on failure.

use mail_parser::{Addr, Address as MailAddress, MessageParser};
use serde::Serialize;
use tracing::{debug, trace};

/// The address record sent to the API.
///
/// The email is always present, even if empty. The name is only
/// present when not empty.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Address {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Address {
    pub fn new(email: impl ToString) -> Self {
        Self {
            email: email.to_string(),
            name: None,
        }
    }

    pub fn new_with_name(name: impl ToString, email: impl ToString) -> Self {
        Self::new(email).with_name(name)
    }

    /// Sets the display name, discarding blank ones.
    pub fn with_name(mut self, name: impl ToString) -> Self {
        let name = name.to_string();
        let name = name.trim();
        self.name = if name.is_empty() {
            None
        } else {
            Some(name.to_owned())
        };
        self
    }

    /// Parses a raw address.
    ///
    /// Only the first address is kept when the raw string contains a
    /// list or a group. This function never fails: unparsable input
    /// gives an address with an empty email.
    pub fn parse(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        trace!(raw, "parsing address");

        // anything after a line break belongs to another header
        let line = raw.split(['\r', '\n']).next().unwrap_or_default();
        let header = format!("From: {}\r\n\r\n", line.trim());

        let Some(msg) = MessageParser::new().parse(header.as_bytes()) else {
            debug!(raw, "cannot parse address header, using empty address");
            return Self::default();
        };

        let addr = match msg.from() {
            Some(MailAddress::List(addrs)) => addrs.first(),
            Some(MailAddress::Group(groups)) => groups
                .iter()
                .flat_map(|group| group.addresses.iter())
                .next(),
            None => None,
        };

        match addr.map(Self::from) {
            Some(addr) if addr.email.contains(char::is_whitespace) => {
                debug!(raw, "invalid email in address header, using empty address");
                Self::default()
            }
            Some(addr) => addr,
            None => {
                debug!(raw, "cannot find address in header, using empty address");
                Self::default()
            }
        }
    }
}

impl From<&Addr<'_>> for Address {
    fn from(addr: &Addr<'_>) -> Self {
        let email = addr
            .address
            .as_ref()
            .map(|email| email.trim().to_owned())
            .unwrap_or_default();

        match &addr.name {
            Some(name) => Self::new(email).with_name(name),
            None => Self::new(email),
        }
    }
}

/// Parses a raw address. See [`Address::parse`].
pub fn parse(raw: impl AsRef<str>) -> Address {
    Address::parse(raw)
}

/// Parses all the given raw addresses, keeping their order.
pub fn parse_all(raws: &[String]) -> Vec<Address> {
    raws.iter().map(|raw| parse(raw)).collect()
}

#[cfg(test)]
mod tests {
    use super::Address;

    #[test]
    fn named() {
        assert_eq!(
            Address::parse("Jane Doe <jane@example.com>"),
            Address::new_with_name("Jane Doe", "jane@example.com"),
        );
    }

    #[test]
    fn nameless() {
        let addr = Address::parse("jane@example.com");
        assert_eq!(addr, Address::new("jane@example.com"));
        assert_eq!(addr.name, None);
    }

    #[test]
    fn quoted_name() {
        assert_eq!(
            Address::parse("\"Doe, Jane\" <jane@example.com>"),
            Address::new_with_name("Doe, Jane", "jane@example.com"),
        );
    }

    #[test]
    fn angle_brackets_only() {
        assert_eq!(
            Address::parse("<jane@example.com>"),
            Address::new("jane@example.com"),
        );
    }

    #[test]
    fn first_of_list() {
        assert_eq!(
            Address::parse("jane@example.com, John <john@example.com>"),
            Address::new("jane@example.com"),
        );
    }

    #[test]
    fn line_break_ends_address() {
        assert_eq!(
            Address::parse("a@b.c\r\nBcc: evil@x"),
            Address::new("a@b.c"),
        );
        assert_eq!(
            Address::parse("Jane <jane@example.com>\nTo: evil@x"),
            Address::new_with_name("Jane", "jane@example.com"),
        );
        assert_eq!(Address::parse("\r\nBcc: evil@x").email, "");
    }

    #[test]
    fn group() {
        assert_eq!(Address::parse("Group: a@b.c, d@e.f;").email, "a@b.c");
    }

    #[test]
    fn name_without_email() {
        assert_eq!(Address::parse("Jane Doe").email, "");
    }

    #[test]
    fn empty() {
        assert_eq!(Address::parse(""), Address::new(""));
        assert_eq!(Address::parse("   "), Address::new(""));
    }

    #[test]
    fn blank_name() {
        assert_eq!(Address::new("a@b").with_name("  ").name, None);
    }

    #[test]
    fn serialize() {
        let json = serde_json::to_string(&Address::new("jane@example.com")).unwrap();
        assert_eq!(json, r#"{"email":"jane@example.com"}"#);

        let addr = Address::new_with_name("Jane", "jane@example.com");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, r#"{"email":"jane@example.com","name":"Jane"}"#);
    }
}
