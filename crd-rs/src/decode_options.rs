use crate::source_encoding::SourceEncoding;
use crate::text_decoder::{TextDecoder, DEFAULT_MAX_TEXT_SIZE};

/// Settings for decoding a card file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Encoding of index lines and card text.
    pub encoding: SourceEncoding,
    /// Output ceiling, in bytes, for transcoded text.
    pub max_text_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            encoding: SourceEncoding::Ascii,
            max_text_size: DEFAULT_MAX_TEXT_SIZE,
        }
    }
}

impl DecodeOptions {
    /// Sets the encoding of index lines and card text.
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the output ceiling for transcoded text.
    pub fn with_max_text_size(mut self, max_text_size: usize) -> Self {
        self.max_text_size = max_text_size;
        self
    }

    /// A text decoder for these settings, for turning `raw` bytes into output.
    pub fn text_decoder(&self) -> TextDecoder {
        TextDecoder::new(self.encoding).with_max_size(self.max_text_size)
    }
}
