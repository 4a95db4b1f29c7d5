pub mod password;
pub mod shortcode;
pub mod url_validator;

pub use shortcode::random_code;
