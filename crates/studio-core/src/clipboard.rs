//! Platform clipboard port.
//!
//! Used only by `copy_final_text`; the host supplies the implementation
//! (browser clipboard, OS clipboard, test recorder).

use studio_types::error::ClipboardError;

/// Write-only clipboard collaborator.
pub trait Clipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError>;
}
