//! Validation of listing submissions and seed records

use validator::Validate;

use crate::error::ValidationError;
use crate::models::{Listing, NewListingInput};
use crate::types::Coordinates;

/// Validate a submission and return its parsed coordinates.
///
/// Fields are checked in form order (name, description, address, latitude,
/// longitude, photos) and the first failure is reported.
pub fn validate_new_listing(input: &NewListingInput) -> Result<Coordinates, ValidationError> {
    let length_errors = input.validate().err();
    let failed = |field: &str| {
        length_errors
            .as_ref()
            .map(|errors| errors.field_errors().contains_key(field))
            .unwrap_or(false)
    };

    for (field, value) in [
        ("name", &input.name),
        ("description", &input.description),
        ("address", &input.address),
    ] {
        if failed(field) || value.trim().is_empty() {
            return Err(ValidationError::missing(field));
        }
    }

    let lat = parse_coordinate("latitude", &input.latitude)?;
    let lng = parse_coordinate("longitude", &input.longitude)?;

    if failed("photos") {
        return Err(ValidationError::missing("photos"));
    }
    validate_photos(&input.photos)?;

    Ok(Coordinates::new(lat, lng))
}

/// Parse a coordinate typed into the form. Blank is "missing", anything that
/// is not a finite number is rejected.
pub fn parse_coordinate(field: &str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing(field));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::not_a_number(field, trimmed)),
    }
}

/// At least one photo, and no blank URLs
pub fn validate_photos(photos: &[String]) -> Result<(), ValidationError> {
    if photos.is_empty() || photos.iter().any(|url| url.trim().is_empty()) {
        return Err(ValidationError::missing("photos"));
    }
    Ok(())
}

/// Validate a fully-formed record, e.g. one loaded from seed data
pub fn validate_listing(listing: &Listing) -> Result<(), ValidationError> {
    if listing.id.as_str().trim().is_empty() {
        return Err(ValidationError::missing("id"));
    }
    for (field, value) in [
        ("name", &listing.name),
        ("description", &listing.description),
        ("address", &listing.address),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::missing(field));
        }
    }
    if !listing.coordinates.lat.is_finite() {
        return Err(ValidationError::not_a_number("latitude", &listing.coordinates.lat.to_string()));
    }
    if !listing.coordinates.lng.is_finite() {
        return Err(ValidationError::not_a_number("longitude", &listing.coordinates.lng.to_string()));
    }
    validate_photos(&listing.photos)
}
