pub mod error;
pub mod validation;
pub mod formats;
pub mod naming;

pub use error::{ExplorerError, ExplorerResult, StoreError};
pub use validation::validate_param;
pub use formats::{ImageFormat, format_from_bytes, format_from_extension};
pub use naming::{base_name, download_name};
