//! Error type for the fallible library operations.
//!
//! The calculator itself never fails. Loading and decoding live in `ll97-io`
//! and report through `anyhow`; what remains here is the renderer's failure
//! to produce a document.
//!
//! ```
//! use ll97_core::{Ll97Error, Ll97Result};
//!
//! fn encode(pages: usize) -> Ll97Result<usize> {
//!     if pages == 0 {
//!         return Err(Ll97Error::Render("document has no pages".into()));
//!     }
//!     Ok(pages)
//! }
//!
//! assert!(encode(0).unwrap_err().to_string().contains("no pages"));
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Ll97Error {
    /// The PDF could not be encoded or written.
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience type alias for Results using Ll97Error.
pub type Ll97Result<T> = Result<T, Ll97Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Ll97Error::Render("font missing".into());
        assert!(err.to_string().contains("Render error"));
        assert!(err.to_string().contains("font missing"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        fn render() -> Ll97Result<()> {
            Err(Ll97Error::Render("writing PDF: broken pipe".into()))
        }

        fn outer() -> anyhow::Result<()> {
            render()?;
            Ok(())
        }

        let err = outer().unwrap_err();
        assert!(err.downcast_ref::<Ll97Error>().is_some());
    }
}
