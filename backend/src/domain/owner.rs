//! Pet owners.

use super::{AddressLine, EmailAddress, OwnerId, PersonName, TelephoneNumber};

/// Validated contact details for a new owner.
///
/// Every field is already a value object, so a draft is valid by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDraft {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub address: AddressLine,
    pub city: AddressLine,
    pub telephone: TelephoneNumber,
    pub email: EmailAddress,
}

/// A registered pet owner.
///
/// Owners are immutable once built. Adapters rebuild them from storage with
/// [`Owner::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    id: OwnerId,
    first_name: PersonName,
    last_name: PersonName,
    address: AddressLine,
    city: AddressLine,
    telephone: TelephoneNumber,
    email: EmailAddress,
}

impl Owner {
    /// Assemble an owner from an identifier and validated details.
    pub fn new(id: OwnerId, draft: OwnerDraft) -> Self {
        let OwnerDraft {
            first_name,
            last_name,
            address,
            city,
            telephone,
            email,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            address,
            city,
            telephone,
            email,
        }
    }

    /// Register a new owner under a fresh identifier.
    pub fn register(draft: OwnerDraft) -> Self {
        Self::new(OwnerId::random(), draft)
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    pub fn address(&self) -> &AddressLine {
        &self.address
    }

    pub fn city(&self) -> &AddressLine {
        &self.city
    }

    pub fn telephone(&self) -> &TelephoneNumber {
        &self.telephone
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared owner fixtures for domain and adapter tests.

    use super::*;

    pub(crate) fn owner_draft(last_name: &str) -> OwnerDraft {
        OwnerDraft {
            first_name: PersonName::new("Ada".to_owned()).expect("valid first name"),
            last_name: PersonName::new(last_name.to_owned()).expect("valid last name"),
            address: AddressLine::new("1 Analytical Row".to_owned()).expect("valid address"),
            city: AddressLine::new("London".to_owned()).expect("valid city"),
            telephone: TelephoneNumber::new("+4412345678".to_owned()).expect("valid telephone"),
            email: EmailAddress::new("ada@example.com".to_owned()).expect("valid email"),
        }
    }
}
