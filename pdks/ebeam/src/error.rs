//! PDK result and error types.

use arcstr::ArcStr;

/// The [`Error`] result type.
pub type Result<T> = std::result::Result<T, Error>;

/// A PDK error.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The requested component type is not in the registry.
    #[error("unknown component type: `{0}`")]
    UnknownComponentType(ArcStr),
    /// A component generator rejected its parameters.
    #[error("invalid `{component}` parameter: {message}")]
    InvalidParameter {
        /// The component kind that rejected the parameters.
        component: &'static str,
        /// What was wrong with them.
        message: String,
    },
    /// An error while exporting GDS.
    #[error(transparent)]
    GdsExport(#[from] gdsout::GdsError),
}

impl Error {
    pub(crate) fn invalid(component: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            component,
            message: message.into(),
        }
    }
}
