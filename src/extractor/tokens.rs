use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token as RawToken, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts, TokenizerResult,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

/// A lexical unit of an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        /// Attributes in source order.
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// A run of character data. Adjacent runs are merged.
    Text(String),
    Comment(String),
    Doctype,
}

impl Token {
    /// Tag name for start and end tags.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(name),
            _ => None,
        }
    }
}

impl From<Tag> for Token {
    fn from(tag: Tag) -> Self {
        let name = tag.name.to_string();
        match tag.kind {
            TagKind::StartTag => Self::StartTag {
                name,
                attrs: tag
                    .attrs
                    .into_iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect(),
                self_closing: tag.self_closing,
            },
            TagKind::EndTag => Self::EndTag { name },
        }
    }
}

/// Queues what the tokenizer emits until the consumer asks for it.
#[derive(Default)]
struct Collector {
    queue: RefCell<VecDeque<Token>>,
}

impl Collector {
    fn push(&self, token: Token) {
        self.queue.borrow_mut().push_back(token);
    }

    fn push_text(&self, text: &str) {
        let mut queue = self.queue.borrow_mut();
        if let Some(Token::Text(run)) = queue.back_mut() {
            run.push_str(text);
        } else {
            queue.push_back(Token::Text(text.to_string()));
        }
    }
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&self, token: RawToken, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            RawToken::TagToken(tag) => {
                let next_state = match tag.kind {
                    TagKind::StartTag => content_state(&tag.name),
                    TagKind::EndTag => TokenSinkResult::Continue,
                };
                self.push(Token::from(tag));
                return next_state;
            }
            RawToken::CharacterTokens(text) => self.push_text(&text),
            RawToken::NullCharacterToken => self.push_text("\0"),
            RawToken::CommentToken(text) => self.push(Token::Comment(text.to_string())),
            RawToken::DoctypeToken(_) => self.push(Token::Doctype),
            RawToken::ParseError(_) | RawToken::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

/// Without a tree builder the tokenizer has to be told which elements hold
/// raw text.
fn content_state(name: &str) -> TokenSinkResult<()> {
    match name {
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}

/// Pull-based token sequence over a stream of decoded text.
///
/// Input is fed to the tokenizer one chunk at a time, only when the consumer
/// asks for a token that has not been produced yet, so a consumer that stops
/// early never reads the rest of the stream. A read error ends the sequence
/// with that error.
pub struct TokenStream<I> {
    source: I,
    tokenizer: Tokenizer<Collector>,
    input: BufferQueue,
    ended: bool,
    failed: bool,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            tokenizer: Tokenizer::new(Collector::default(), TokenizerOpts::default()),
            input: BufferQueue::default(),
            ended: false,
            failed: false,
        }
    }

    /// Pops the next token unless it is a text run the next chunk could
    /// still extend.
    fn pop_ready(&self) -> Option<Token> {
        let mut queue = self.tokenizer.sink.queue.borrow_mut();
        let open_text = !self.ended && queue.len() == 1 && matches!(queue.front(), Some(Token::Text(_)));
        if open_text {
            return None;
        }
        queue.pop_front()
    }
}

impl<I> Iterator for TokenStream<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(token) = self.pop_ready() {
                return Some(Ok(token));
            }
            if self.ended {
                return None;
            }

            match self.source.next() {
                Some(Ok(chunk)) => {
                    self.input.push_back(StrTendril::from(chunk));
                    // A script pause leaves input queued; keep feeding until it is drained.
                    while let TokenizerResult::Script(()) = self.tokenizer.feed(&self.input) {}
                }
                Some(Err(err)) => {
                    self.failed = true;
                    return Some(Err(err));
                }
                None => {
                    self.tokenizer.end();
                    self.ended = true;
                }
            }
        }
    }
}
