pub mod validation;

pub use validation::{extract_domain, is_disposable_domain, is_disposable_email, is_valid_syntax};
