use thiserror::Error;

/// Everything a recolor job can fail with. Only hex parsing fails inside the
/// pixel operations; the rest comes from loading and saving files.
#[derive(Error, Debug)]
pub enum RecolorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHexFormat(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding failure, with the offending path in the message
    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, RecolorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hex_message() {
        let err = RecolorError::InvalidHexFormat("F0000".to_string());
        assert_eq!(err.to_string(), "Invalid hex color: \"F0000\"");
    }

    #[test]
    fn test_io_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(RecolorError::Io(_))));
    }
}
