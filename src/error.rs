use crate::client::ApiError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("creative id is {0} bytes long, the maximum is {max} bytes", max = crate::creative::MAX_CREATIVE_ID_BYTES)]
    CreativeIdTooLong(usize),

    #[error("no access token was provided")]
    MissingAccessToken,

    /// The API client could not be constructed.
    #[error("{0}")]
    Setup(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("unable to write result: {0}")]
    Io(#[from] std::io::Error),
}
