//! Delivery address types.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::AddressId;

/// Errors that can occur when constructing an [`Address`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The identifier is blank.
    #[error("address id cannot be empty")]
    EmptyId,
    /// A required field is blank.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// An address with the same identifier already exists.
    #[error("address {0} already exists")]
    Duplicate(AddressId),
}

/// Category tag of a stored address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AddressKind {
    #[default]
    Home,
    Work,
    Other,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Work => write!(f, "Work"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A delivery address.
///
/// ## Constraints
///
/// - `id`, `line1`, `city` and `postal_code` must not be blank
/// - `line2` is optional; a blank value is stored as `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    id: AddressId,
    kind: AddressKind,
    line1: String,
    line2: Option<String>,
    city: String,
    postal_code: String,
    is_default: bool,
}

impl Address {
    /// Create a validated address.
    ///
    /// # Errors
    ///
    /// Returns an error if the id, first line, city or postal code is blank.
    pub fn new(
        id: impl Into<AddressId>,
        kind: AddressKind,
        line1: &str,
        line2: Option<&str>,
        city: &str,
        postal_code: &str,
    ) -> Result<Self, AddressError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AddressError::EmptyId);
        }

        Ok(Self {
            id,
            kind,
            line1: required("line1", line1)?,
            line2: line2
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
            city: required("city", city)?,
            postal_code: required("postal code", postal_code)?,
            is_default: false,
        })
    }

    /// Mark this address as the default delivery address.
    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &AddressId {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> AddressKind {
        self.kind
    }

    #[must_use]
    pub fn line1(&self) -> &str {
        &self.line1
    }

    #[must_use]
    pub fn line2(&self) -> Option<&str> {
        self.line2.as_deref()
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Single-line rendering, e.g. `123 Main St, Anytown, 12345`.
    #[must_use]
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.line1.as_str()];
        if let Some(line2) = self.line2.as_deref() {
            parts.push(line2);
        }
        parts.push(&self.city);
        parts.push(&self.postal_code);
        parts.join(", ")
    }
}

fn required(field: &'static str, value: &str) -> Result<String, AddressError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AddressError::MissingField { field });
    }
    Ok(value.to_owned())
}

/// A user's saved addresses, in insertion order.
///
/// At most one address should be flagged as default; this is caller
/// discipline and is not enforced here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    addresses: Vec<Address>,
}

impl AddressBook {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            addresses: Vec::new(),
        }
    }

    /// Add an address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Duplicate`] if the id is already present.
    pub fn add(&mut self, address: Address) -> Result<(), AddressError> {
        if self.get(address.id()).is_some() {
            return Err(AddressError::Duplicate(address.id().clone()));
        }
        self.addresses.push(address);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| a.id() == id)
    }

    /// The first address flagged as default, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.addresses.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl FromIterator<Address> for AddressBook {
    fn from_iter<T: IntoIterator<Item = Address>>(iter: T) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn home() -> Address {
        Address::new(
            "addr1",
            AddressKind::Home,
            "123 Main St",
            None,
            "Anytown",
            "12345",
        )
        .unwrap()
        .as_default()
    }

    fn work() -> Address {
        Address::new(
            "addr2",
            AddressKind::Work,
            "456 Office Ave",
            Some("Suite 100"),
            "Anytown",
            "12346",
        )
        .unwrap()
    }

    #[test]
    fn test_one_line() {
        assert_eq!(home().one_line(), "123 Main St, Anytown, 12345");
        assert_eq!(
            work().one_line(),
            "456 Office Ave, Suite 100, Anytown, 12346"
        );
    }

    #[test]
    fn test_required_fields() {
        let err = Address::new("a", AddressKind::Other, "  ", None, "X", "1").unwrap_err();
        assert_eq!(err, AddressError::MissingField { field: "line1" });

        let err = Address::new("a", AddressKind::Other, "1 St", None, "", "1").unwrap_err();
        assert_eq!(err, AddressError::MissingField { field: "city" });

        let err = Address::new("", AddressKind::Other, "1 St", None, "X", "1").unwrap_err();
        assert_eq!(err, AddressError::EmptyId);
    }

    #[test]
    fn test_blank_line2_is_none() {
        let addr = Address::new("a", AddressKind::Home, "1 St", Some(" "), "X", "1").unwrap();
        assert_eq!(addr.line2(), None);
    }

    #[test]
    fn test_address_book_default_and_lookup() {
        let book: AddressBook = [work(), home()].into_iter().collect();
        assert_eq!(book.len(), 2);
        assert_eq!(book.default_address().unwrap().id().as_str(), "addr1");
        assert!(book.get(&AddressId::new("addr2")).is_some());
        assert!(book.get(&AddressId::new("nope")).is_none());
    }

    #[test]
    fn test_address_book_rejects_duplicates() {
        let mut book = AddressBook::new();
        book.add(home()).unwrap();
        assert!(matches!(book.add(home()), Err(AddressError::Duplicate(_))));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AddressKind::Work.to_string(), "Work");
    }
}
