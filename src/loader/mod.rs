//! Document loading behind a trait seam.
//!
//! The pipeline only ever sees a sequence of page texts; what produced
//! them (plain text today, a PDF extractor tomorrow) is the loader's
//! business. [`structure`] turns those pages into a [`PaperStructure`].
//!
//! [`PaperStructure`]: crate::concept::PaperStructure

pub mod error;
pub mod structure;


pub use error::LoaderError;
pub use structure::{extract_structure, extract_title};

use std::path::Path;

use tracing::debug;

/// Page separator recognized by [`PlainTextLoader`].
pub const PAGE_BREAK: char = '\u{000C}';

/// Produces page texts from a document on disk.
pub trait DocumentLoader: Send + Sync {
    /// Returns the document's pages in order. Must fail rather than return
    /// an empty sequence.
    fn load(&self, path: &Path) -> Result<Vec<String>, LoaderError>;
}

/// Loader for UTF-8 text documents with form-feed page breaks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextLoader;

impl PlainTextLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PlainTextLoader {
    fn load(&self, path: &Path) -> Result<Vec<String>, LoaderError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let pages: Vec<String> = raw
            .split(PAGE_BREAK)
            .filter(|page| !page.trim().is_empty())
            .map(str::to_string)
            .collect();

        if pages.is_empty() {
            return Err(LoaderError::Unreadable {
                path: path.to_path_buf(),
                reason: "document contains no text".to_string(),
            });
        }

        debug!(path = %path.display(), pages = pages.len(), "Loaded document");
        Ok(pages)
    }
}
