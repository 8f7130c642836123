//! QuackMetadata Google Drive Storage
//!
//! Implements the `RemoteStorage` trait from `quackmeta-domain` against the
//! Google Drive v3 REST API using a pre-issued OAuth access token.
//!
//! # Example
//!
//! ```no_run
//! use quackmeta_domain::traits::RemoteStorage;
//! use quackmeta_drive::{DriveConfig, GoogleDriveStorage};
//!
//! let config = DriveConfig {
//!     access_token: Some("ya29....".to_string()),
//!     ..DriveConfig::default()
//! };
//! let drive = GoogleDriveStorage::new(config).unwrap();
//! let info = drive.get_info("1AbCdEfGhIjKlMnOpQrStUvWxYz012345").unwrap();
//! println!("{} in {:?}", info.name, info.parent);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod google;

pub use config::{DriveConfig, DEFAULT_API_BASE, DEFAULT_UPLOAD_BASE};
pub use error::StorageError;
pub use google::GoogleDriveStorage;
