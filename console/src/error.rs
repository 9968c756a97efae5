//! Error handling for the UMKM Directory console
//!
//! Provides consistent error messages in Indonesian and English

use serde::Serialize;
use shared::{Language, StoreError, ValidationError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Listing not found: {0}")]
    NotFound(String),

    // Startup errors
    #[error("Seed data error: {0}")]
    Seed(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// User-facing description of an error
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    pub fn message(&self, language: Language) -> &str {
        match language {
            Language::Indonesian => &self.message_id,
            Language::English => &self.message_en,
        }
    }
}

impl AppError {
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation(err) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: err.message.clone(),
                message_id: if err.is_missing() {
                    format!(
                        "Mohon lengkapi semua field yang wajib diisi: {}",
                        err.message_id
                    )
                } else {
                    err.message_id.clone()
                },
                field: Some(err.field.clone()),
            },
            AppError::UnknownCommand(cmd) => ErrorDetail {
                code: "UNKNOWN_COMMAND".to_string(),
                message_en: format!("Unknown command '{}'. Type 'help' for a list of commands", cmd),
                message_id: format!(
                    "Perintah '{}' tidak dikenal. Ketik 'help' untuk daftar perintah",
                    cmd
                ),
                field: None,
            },
            AppError::InvalidArgument(msg) => ErrorDetail {
                code: "INVALID_ARGUMENT".to_string(),
                message_en: msg.clone(),
                message_id: format!("Argumen tidak valid: {}", msg),
                field: None,
            },
            AppError::NotFound(id) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message_en: format!("Listing {} not found", id),
                message_id: format!("UMKM {} tidak ditemukan", id),
                field: None,
            },
            AppError::Seed(err) => ErrorDetail {
                code: "SEED_ERROR".to_string(),
                message_en: format!("Could not load initial listings: {}", err),
                message_id: format!("Gagal memuat data awal UMKM: {}", err),
                field: None,
            },
            AppError::Configuration(err) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message_en: format!("Configuration error: {}", err),
                message_id: format!("Kesalahan konfigurasi: {}", err),
                field: None,
            },
            AppError::Io(err) => ErrorDetail {
                code: "IO_ERROR".to_string(),
                message_en: format!("I/O error: {}", err),
                message_id: format!("Kesalahan input/output: {}", err),
                field: None,
            },
        }
    }
}

/// Result type alias for console operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_detail_carries_field() {
        let err = AppError::from(ValidationError::missing("name"));
        let detail = err.detail();
        assert_eq!(detail.code, "VALIDATION_ERROR");
        assert_eq!(detail.field.as_deref(), Some("name"));
        assert_eq!(detail.message(Language::English), "name is required");
        assert_eq!(
            detail.message(Language::Indonesian),
            "Mohon lengkapi semua field yang wajib diisi: Nama UMKM wajib diisi"
        );
    }

    #[test]
    fn test_malformed_value_has_no_missing_prefix() {
        let detail = AppError::from(ValidationError::not_a_number("latitude", "utara")).detail();
        assert_eq!(
            detail.message(Language::Indonesian),
            "Latitude harus berupa angka, bukan 'utara'"
        );
    }

    #[test]
    fn test_not_found_detail() {
        let detail = AppError::NotFound("42".into()).detail();
        assert_eq!(detail.code, "NOT_FOUND");
        assert_eq!(detail.message_id, "UMKM 42 tidak ditemukan");
    }
}
