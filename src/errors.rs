//! Unified error type for the bag planner.
//!
//! Validation inside the live bag composition never produces these; bad input
//! there is ignored. Errors come from the catalog, identity and cache
//! boundaries and from item form validation.

use sea_orm::DbErr;
use thiserror::Error;

/// All errors surfaced by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// Any failure reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Bad or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A price, quantity or weight that is negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// A required display name is blank
    #[error("Invalid name: {message}")]
    InvalidName {
        /// Which name was rejected
        message: String,
    },

    /// No catalog item with this id
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The requested item id
        id: i64,
    },

    /// The same item appears on more than one line of a template
    #[error("Item {item_id} appears on more than one bag line")]
    DuplicateLine {
        /// The repeated item id
        item_id: i64,
    },

    /// No bag template with this id
    #[error("Bag template not found: {id}")]
    TemplateNotFound {
        /// The requested template id
        id: i64,
    },

    /// Email/password pair did not match an account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Sign-up password and its confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Sign-up for an email that is already registered
    #[error("An account already exists for {email}")]
    AccountExists {
        /// The duplicate email
        email: String,
    },

    /// The local durable cache could not be read or written
    #[error("Local cache error: {message}")]
    Cache {
        /// What went wrong
        message: String,
    },

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
