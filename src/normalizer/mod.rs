//! Encoding normalization.
//!
//! Wraps a raw byte stream, decides once which decoder applies to it and
//! yields the document as UTF-8 text chunks. The decision walks an ordered
//! list of strategies: a concrete decoder from content sniffing, then the
//! alias registry for labels the WHATWG table does not know, then plain
//! pass-through.

pub mod peek;
pub mod registry;
pub mod sniff;

use encoding_rs::{Decoder, Encoding};
use std::io::{self, Read};
use tracing::debug;

pub use peek::{PEEK_LEN, PeekedReader};
pub use sniff::{Declared, Sniff};

const CHUNK_LEN: usize = 8 * 1024;

/// Which decoder a stream is read with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodingDecision {
    /// Resolved by content sniffing (BOM, declared label, heuristics).
    Sniffed(&'static Encoding),
    /// A declared label only the alias registry knows.
    Registry(&'static Encoding),
    /// Nothing usable was found; bytes are read as UTF-8 as-is.
    PassThrough,
}

impl EncodingDecision {
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Self::Sniffed(encoding) | Self::Registry(encoding) => encoding,
            Self::PassThrough => encoding_rs::UTF_8,
        }
    }

    fn decoder(self) -> Decoder {
        match self {
            Self::Sniffed(encoding) | Self::Registry(encoding) => {
                encoding.new_decoder_with_bom_removal()
            }
            Self::PassThrough => encoding_rs::UTF_8.new_decoder_without_bom_handling(),
        }
    }
}

type Strategy = fn(Option<&Sniff>) -> Option<EncodingDecision>;

/// Resolution order; the first strategy returning a decision wins.
const STRATEGIES: &[Strategy] = &[sniffed_decoder, registry_decoder];

fn sniffed_decoder(sniff: Option<&Sniff>) -> Option<EncodingDecision> {
    match sniff? {
        Sniff::Decoder(encoding) => Some(EncodingDecision::Sniffed(encoding)),
        Sniff::Label { .. } => None,
    }
}

fn registry_decoder(sniff: Option<&Sniff>) -> Option<EncodingDecision> {
    match sniff? {
        Sniff::Label {
            label,
            declared: Declared::Header,
        } => registry::lookup(label).map(EncodingDecision::Registry),
        Sniff::Label {
            label,
            declared: Declared::Meta,
        } => registry::lookup(label)
            .map(sniff::meta_override)
            .map(EncodingDecision::Registry),
        Sniff::Decoder(_) => None,
    }
}

/// Chooses the decoder for a document from its leading bytes and the
/// declared content-type.
pub fn decide(peeked: &[u8], content_type: Option<&str>) -> EncodingDecision {
    let sniffed = sniff::sniff(peeked, content_type);
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(sniffed.as_ref()))
        .unwrap_or(EncodingDecision::PassThrough)
}

/// Wraps `reader` so that it yields UTF-8 text, whatever the source
/// encoding.
///
/// Up to [`PEEK_LEN`] bytes are read ahead for sniffing and replayed. A
/// failed look-ahead disables sniffing; the failure itself resurfaces from
/// the returned stream.
pub fn normalize<R: Read>(reader: R, content_type: Option<&str>) -> DecodedText<R> {
    let reader = PeekedReader::peek(reader, PEEK_LEN);
    let decision = if reader.peek_failed() {
        EncodingDecision::PassThrough
    } else {
        decide(reader.peeked(), content_type)
    };

    debug!(
        ?content_type,
        peeked = reader.peeked().len(),
        encoding = decision.encoding().name(),
        ?decision,
        "resolved document encoding"
    );

    DecodedText::new(reader, decision)
}

/// Reads `reader` as UTF-8 without any sniffing.
pub fn pass_through<R: Read>(reader: R) -> DecodedText<R> {
    DecodedText::new(PeekedReader::peek(reader, 0), EncodingDecision::PassThrough)
}

/// Decoded text of a byte stream, yielded in chunks as it is read.
///
/// Multi-byte sequences split across reads are carried over by the decoder;
/// malformed sequences decode to U+FFFD. Read errors end the stream.
pub struct DecodedText<R> {
    reader: PeekedReader<R>,
    decision: EncodingDecision,
    decoder: Decoder,
    buf: Vec<u8>,
    finished: bool,
}

impl<R: Read> DecodedText<R> {
    fn new(reader: PeekedReader<R>, decision: EncodingDecision) -> Self {
        Self {
            reader,
            decision,
            decoder: decision.decoder(),
            buf: vec![0; CHUNK_LEN],
            finished: false,
        }
    }

    pub fn decision(&self) -> EncodingDecision {
        self.decision
    }
}

impl<R: Read> Iterator for DecodedText<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let read = match self.reader.read(&mut self.buf) {
                Ok(read) => read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            };

            let last = read == 0;
            let src = &self.buf[..read];
            let Some(capacity) = self.decoder.max_utf8_buffer_length(src.len()) else {
                self.finished = true;
                return Some(Err(io::Error::other("decode buffer length overflow")));
            };

            let mut text = String::with_capacity(capacity);
            let (_result, _read, _replaced) = self.decoder.decode_to_string(src, &mut text, last);
            self.finished = last;

            if !text.is_empty() {
                return Some(Ok(text));
            }
        }
        None
    }
}
