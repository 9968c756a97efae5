//! Error types for the listing store
//!
//! Messages are carried in English and Indonesian so any presentation layer
//! can surface them directly to the submitter.

use serde::Serialize;
use thiserror::Error;

use crate::types::Language;

/// Why a field was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Required field left blank
    Missing,
    /// Coordinate text that is not a finite number
    NotANumber,
    /// Value outside a closed set, e.g. an unknown category label
    UnknownChoice,
}

/// A submission is missing a required field or carries a malformed value
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Validation error on {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub message_id: String,
    #[serde(skip)]
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{} is required", field),
            message_id: format!("{} wajib diisi", field_label_id(field)),
            reason: ValidationReason::Missing,
        }
    }

    pub fn not_a_number(field: &str, raw: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{} must be a finite number, got '{}'", field, raw),
            message_id: format!("{} harus berupa angka, bukan '{}'", field_label_id(field), raw),
            reason: ValidationReason::NotANumber,
        }
    }

    pub fn unknown_choice(field: &str, raw: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{} '{}' is not one of the allowed values", field, raw),
            message_id: format!("{} '{}' tidak tersedia", field_label_id(field), raw),
            reason: ValidationReason::UnknownChoice,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.reason == ValidationReason::Missing
    }

    /// Message in the requested language
    pub fn message_in(&self, language: Language) -> &str {
        match language {
            Language::Indonesian => &self.message_id,
            Language::English => &self.message,
        }
    }
}

fn field_label_id(field: &str) -> &str {
    match field {
        "name" => "Nama UMKM",
        "category" => "Kategori",
        "description" => "Deskripsi",
        "address" => "Alamat",
        "latitude" => "Latitude",
        "longitude" => "Longitude",
        "photos" => "URL Foto",
        other => other,
    }
}

/// Errors raised while building a store from existing records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Duplicate listing id: {0}")]
    DuplicateId(String),

    #[error("Invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_messages() {
        let err = ValidationError::missing("address");
        assert_eq!(err.field, "address");
        assert_eq!(err.message_in(Language::English), "address is required");
        assert_eq!(err.message_in(Language::Indonesian), "Alamat wajib diisi");
        assert_eq!(err.to_string(), "Validation error on address: address is required");
    }

    #[test]
    fn test_not_a_number_mentions_value() {
        let err = ValidationError::not_a_number("latitude", "abc");
        assert!(err.message.contains("'abc'"));
        assert!(err.message_id.starts_with("Latitude harus berupa angka"));
        assert!(!err.is_missing());
    }

    #[test]
    fn test_unknown_choice_keeps_wire_shape() {
        let err = ValidationError::unknown_choice("category", "Elektronik");
        assert_eq!(err.reason, ValidationReason::UnknownChoice);
        assert_eq!(err.message_id, "Kategori 'Elektronik' tidak tersedia");

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["field"], "category");
        assert!(value.get("reason").is_none());
    }
}
