pub mod logging;
pub mod validation;

pub use logging::LoggingConfig;
pub use validation::{sanitize_text, InputValidator};
