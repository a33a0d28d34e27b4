use res_resolver_config::ConfigError;
use res_resolver_zip::ZipError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    /// Generic I/O error while trying to read data
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// Not a `package:type/name` or an unknown resource type
    #[error("invalid resource name: {0:?}")]
    InvalidName(String),

    /// Resource bucket with unparseable qualifiers
    #[error("invalid resource directory")]
    ConfigError(#[from] ConfigError),

    /// Error occurred while reading the resource bundle
    #[error("got error while reading resource bundle")]
    ZipError(#[from] ZipError),

    /// Malformed values xml
    #[error("got error while parsing values xml: {0}")]
    XmlError(String),

    /// Style inherits from itself through its parents
    #[error("style parent cycle through {0}")]
    StyleCycle(String),

    /// Reference chain loops back to an already visited resource
    #[error("reference cycle through {0}")]
    ReferenceCycle(String),
}

impl From<quick_xml::Error> for ResourceError {
    fn from(value: quick_xml::Error) -> Self {
        ResourceError::XmlError(value.to_string())
    }
}
