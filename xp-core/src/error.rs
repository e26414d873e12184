use thiserror::Error;

/// Errors produced while building, compositing, decoding or encoding images.
///
/// Out-of-range coordinates and layer indices are not errors: lookups return
/// `None` and stores return `false`.
#[derive(Debug, Error)]
pub enum XpError {
    /// Constructor input outside what the model can represent
    #[error("invalid value: {0}")]
    Validation(String),

    /// The gzip transport failed to inflate or deflate a buffer
    #[error("compression error: {0}")]
    Compression(#[from] std::io::Error),

    /// The decompressed stream is structurally inconsistent
    #[error("malformed stream at byte {offset}: {reason}")]
    Format { offset: usize, reason: String },

    /// A decoder limit from `DecoderOptions` was exceeded
    #[error("limit exceeded: {what} is {actual}, maximum is {max}")]
    LimitExceeded {
        what: &'static str,
        actual: usize,
        max: usize,
    },

    /// Encoded output length disagrees with the precomputed size
    #[error("internal consistency error: expected {expected} bytes, wrote {actual}")]
    InternalConsistency { expected: usize, actual: usize },

    /// The layer selection resolved to nothing, or the image has no layers
    #[error("no layers to merge")]
    NoLayersToMerge,

    /// A selected layer does not match the dimensions of layer 0
    #[error("layer {index} is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    LayerSizeMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl XpError {
    pub(crate) fn format(offset: usize, reason: impl Into<String>) -> Self {
        XpError::Format {
            offset,
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = core::result::Result<T, XpError>;
