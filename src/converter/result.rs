/// Outcome of trying to convert one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Converted text, present only when `converted` is true
    pub content: Option<String>,
    pub converted: bool,
}

impl ConversionResult {
    pub fn converted(content: String) -> Self {
        Self {
            content: Some(content),
            converted: true,
        }
    }

    pub fn not_converted() -> Self {
        Self {
            content: None,
            converted: false,
        }
    }
}
