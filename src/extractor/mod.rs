pub mod model;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use model::ExtractionResult;
pub use tokens::{Token, TokenStream};

use std::io;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("error tokenizing HTML: {0}")]
    Tokenize(#[from] io::Error),
}

/// What a single token asks the extractor to do.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    HeadEnded,
    ReadTitle,
    Meta { key: String, value: String },
    Skip,
}

fn step(token: &Token) -> Step {
    match (token, token.tag_name()) {
        (Token::EndTag { .. }, Some("head")) => Step::HeadEnded,
        (Token::StartTag { self_closing: false, .. }, Some("title")) => Step::ReadTitle,
        (Token::StartTag { attrs, .. }, Some("meta")) => {
            let (key, value) =
                model::meta_entry(attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            Step::Meta { key, value }
        }
        // A stray </meta> still counts, it just carries no attributes.
        (Token::EndTag { .. }, Some("meta")) => {
            let (key, value) = model::meta_entry(Vec::new());
            Step::Meta { key, value }
        }
        _ => Step::Skip,
    }
}

/// Extracts the title and `<meta>` entries from a document head.
///
/// Tokens are pulled one at a time and scanning stops at `</head>`, so the
/// rest of the document is never read. Reaching the end of the stream is
/// not an error; whatever was collected is returned. A read failure aborts
/// extraction.
pub fn extract<I>(text: I) -> Result<ExtractionResult, ExtractError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut tokens = TokenStream::new(text.into_iter());
    let mut result = ExtractionResult::default();

    while let Some(token) = tokens.next() {
        match step(&token?) {
            Step::HeadEnded => {
                debug!(metas = result.metas.len(), "head ended");
                return Ok(result);
            }
            Step::ReadTitle => {
                result.title = match tokens.next().transpose()? {
                    Some(Token::Text(text)) => text,
                    _ => String::new(),
                };
            }
            Step::Meta { key, value } => {
                result.metas.insert(key, value);
            }
            Step::Skip => {}
        }
    }

    debug!(metas = result.metas.len(), "stream ended before </head>");
    Ok(result)
}
