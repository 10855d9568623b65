use super::{ConfigError, EngineError, ExportError, RequestFileError, ValidationError};

/// Lets tests build any concern error straight from a message, so they can
/// `return Err(AppError::engine("..."))` instead of panicking.
macro_rules! test_expectations {
    ($($error:ident),+ $(,)?) => {
        $(
            impl From<&'static str> for $error {
                fn from(message: &'static str) -> Self {
                    $error::TestExpectation { message }
                }
            }

            impl From<String> for $error {
                fn from(value: String) -> Self {
                    $error::TestExpectationValue {
                        message: "Test expectation failed",
                        value,
                    }
                }
            }
        )+
    };
}

test_expectations!(
    ValidationError,
    ConfigError,
    RequestFileError,
    EngineError,
    ExportError,
);
