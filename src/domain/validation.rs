//! Input validation for rental requests and item metadata.
//!
//! Every check trims its input first. The returned values are the cleaned
//! strings that end up in the catalog.

use super::error::ValidationError;
use super::item::{ItemMetadata, RenterInfo};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// What a requester submits from the rent form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRequest {
    pub name: String,
    pub contact: String,
}

impl RentalRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
        }
    }

    /// Validates both fields and returns the trimmed request.
    ///
    /// # Errors
    ///
    /// Fails when the name is empty or the contact is empty or not all digits.
    pub fn validated(&self) -> ValidationResult<Self> {
        Ok(Self {
            name: validate_required("name", &self.name)?,
            contact: validate_contact(&self.contact)?,
        })
    }
}

/// Rejects empty (after trimming) values.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] naming `field`.
pub fn validate_required(field: &'static str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(value.to_string())
}

/// Validates a renter contact number.
///
/// ## Rules
/// - Must not be empty
/// - ASCII digits only (no spaces, dashes or `+`)
///
/// ## Example
/// ```rust
/// use rentdesk::domain::validation::validate_contact;
///
/// assert_eq!(validate_contact(" 01011112222 ").unwrap(), "01011112222");
/// assert!(validate_contact("010-1111-2222").is_err());
/// assert!(validate_contact("").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ValidationError::Required`] or [`ValidationError::InvalidFormat`].
pub fn validate_contact(contact: &str) -> ValidationResult<String> {
    let contact = validate_required("contact", contact)?;
    if !contact.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "contact",
            reason: "must contain digits only",
        });
    }
    Ok(contact)
}

/// Validates all three metadata fields and returns the trimmed copy.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] for the first empty field.
pub fn validate_metadata(metadata: &ItemMetadata) -> ValidationResult<ItemMetadata> {
    Ok(ItemMetadata {
        name: validate_required("name", &metadata.name)?,
        category: validate_required("category", &metadata.category)?,
        description: validate_required("description", &metadata.description)?,
    })
}

/// Checks a renter record loaded from a seed, exactly as stored.
///
/// Unlike form input nothing is trimmed: the record is kept verbatim, so a
/// contact with surrounding spaces is rejected rather than cleaned.
///
/// # Errors
///
/// - [`ValidationError::Required`] for a blank name or contact
/// - [`ValidationError::InvalidFormat`] for a contact that is not all digits,
///   or an expected return date before the rent date
pub fn validate_seeded_renter(renter: &RenterInfo) -> ValidationResult<()> {
    validate_required("name", &renter.name)?;
    if renter.contact.is_empty() {
        return Err(ValidationError::Required { field: "contact" });
    }
    if !renter.contact.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "contact",
            reason: "must contain digits only",
        });
    }
    if renter.expected_return_date < renter.rent_date {
        return Err(ValidationError::InvalidFormat {
            field: "expected_return_date",
            reason: "must not be before rent_date",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_trimmed() {
        let request = RentalRequest::new("  Kim ", "01011112222").validated().unwrap();
        assert_eq!(request.name, "Kim");
        assert_eq!(request.contact, "01011112222");
    }

    #[test]
    fn request_rejects_blank_name() {
        let err = RentalRequest::new("   ", "0101").validated().unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "name" });
    }

    #[test]
    fn contact_rejects_letters() {
        let err = validate_contact("0101abc").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "contact", .. }));
    }

    #[test]
    fn metadata_requires_every_field() {
        let metadata = ItemMetadata {
            name: "Tent".into(),
            category: " ".into(),
            description: "4-person".into(),
        };
        assert_eq!(
            validate_metadata(&metadata).unwrap_err(),
            ValidationError::Required { field: "category" }
        );
    }
}
