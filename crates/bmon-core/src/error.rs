use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("brands validation failed: {0}")]
    Validation(String),
}

/// Rejections from [`crate::keys::validate_brand_segment`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("brand identifier must be non-empty")]
    EmptyBrand,

    #[error("brand identifier '{0}' contains the key delimiter ':'")]
    DelimiterInBrand(String),
}
