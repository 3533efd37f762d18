pub mod phone_validation;
pub use phone_validation::{PhoneNumberError, validate_phone_number};
pub mod url_validation;
pub use url_validation::{UrlValidationError, validate_recording_url};
