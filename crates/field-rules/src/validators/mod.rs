//! Built-in rules

pub mod conditional;
pub mod date;
pub mod email;
pub mod length;
pub mod numeric;
pub mod required;
pub mod url;

pub use conditional::ConditionalValidator;
pub use date::{DateFormat, DateFormatValidator, DateRangeValidator};
pub use email::EmailValidator;
pub use length::LengthValidator;
pub use numeric::{IntegerValidator, RangeValidator};
pub use required::RequiredValidator;
pub use self::url::UrlValidator;
