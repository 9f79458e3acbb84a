mod error;
mod external;
mod result;


pub use error::ConvertError;
pub use external::ExternalConverter;
pub use result::ConversionResult;

use std::path::Path;
use tracing::warn;

/// Anything that can turn a file on disk into markdown-ish text
pub trait Converter: Send + Sync {
    /// Short name used in logs (e.g. "pandoc")
    fn name(&self) -> &str;

    /// Convert the file at `path`, returning the produced text
    fn convert(&self, path: &Path) -> Result<String, ConvertError>;
}

/// Run `converter` on `path`, folding any failure into a not-converted result.
///
/// Failures are logged; the caller is expected to fall back to text handling.
pub fn convert_file(converter: &dyn Converter, path: &Path) -> ConversionResult {
    match converter.convert(path) {
        Ok(content) => ConversionResult::converted(content),
        Err(e) => {
            warn!(
                converter = converter.name(),
                path = %path.display(),
                error = %e,
                "Conversion failed"
            );
            ConversionResult::not_converted()
        }
    }
}
