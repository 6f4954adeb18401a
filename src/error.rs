use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum TokenError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode or encode an image
    Image(#[from] image::ImageError),

    #[error("missing required component: {name}")]
    /// A file the component package must provide could not be found
    MissingComponent { name: String },

    #[error("invalid configuration: {0}")]
    /// A configuration value is out of range
    InvalidConfiguration(String),
}
