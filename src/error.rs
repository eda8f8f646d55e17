use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid numeral {input:?}: {reason}")]
    InvalidArgument { input: String, reason: &'static str },

    #[error("numeral {input:?} does not fit the integer width")]
    OutOfRange { input: String },
}

impl Error {
    pub(crate) fn invalid(input: &str, reason: &'static str) -> Self {
        log::debug!("rejected numeral {input:?}: {reason}");

        Error::InvalidArgument {
            input: input.to_owned(),
            reason,
        }
    }

    pub(crate) fn out_of_range(input: &str) -> Self {
        log::debug!("rejected numeral {input:?}: out of range");

        Error::OutOfRange {
            input: input.to_owned(),
        }
    }
}
