//! Journal page markup parsing
//!
//! The page is parsed into a document tree by `scraper` (html5ever), which
//! takes care of entities, void elements and malformed nesting. The tree is
//! then replayed as open/close/text events through an explicit state machine
//! with a container stack that decides where each piece of text lands: page
//! header, title, body, or nowhere (anything outside `<body>`).

use crate::domain::text;
use crate::error::{MoodjourError, Result};
use scraper::{ElementRef, Html, Node};

/// Class token marking the container that holds the localized date line
const PAGE_HEADER_CLASS: &str = "pageHeader";

/// Class token marking the entry title container
const TITLE_CLASS: &str = "title";

/// Elements that emit a line separator into the current capture
const SEPARATOR_ELEMENTS: [&str; 3] = ["p", "li", "br"];

/// Elements whose content is never journal text
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Where text is currently being captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Before `<body>` opens or after it closes; text is dropped
    OutsideBody,
    /// Inside the body; text goes to the body fragment stream
    InBody,
    /// Inside the page header container
    InPageHeader,
    /// Inside the title container
    InTitle,
}

/// Raw text pulled out of one journal page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub header: String,
    pub title: String,
    pub fragments: Vec<String>,
}

impl ParsedPage {
    /// Body fragments joined with single spaces, then normalized
    pub fn body_text(&self) -> String {
        text::normalize(&self.fragments.join(" "))
    }

    /// Title with whitespace collapsed
    pub fn title_text(&self) -> String {
        text::normalize(&self.title)
    }
}

/// An open container. `resume` is set when entering the container changed
/// the parse state; closing it restores that state.
#[derive(Debug)]
struct Frame {
    name: String,
    resume: Option<ParseState>,
}

/// State machine that routes page text into header, title and body
#[derive(Debug)]
pub struct MarkupParser {
    state: ParseState,
    stack: Vec<Frame>,
    saw_header: bool,
    page: ParsedPage,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::OutsideBody,
            stack: Vec::new(),
            saw_header: false,
            page: ParsedPage::default(),
        }
    }

    /// Current capture state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// An element opened. `class` is its raw class attribute.
    pub fn open(&mut self, name: &str, class: Option<&str>) {
        let entered = match name {
            "body" if self.state == ParseState::OutsideBody => Some(ParseState::InBody),
            "div" if self.state != ParseState::OutsideBody => {
                if has_class(class, PAGE_HEADER_CLASS) {
                    self.saw_header = true;
                    Some(ParseState::InPageHeader)
                } else if has_class(class, TITLE_CLASS) {
                    Some(ParseState::InTitle)
                } else {
                    None
                }
            }
            _ => None,
        };

        if SEPARATOR_ELEMENTS.contains(&name) {
            match self.state {
                ParseState::InBody => self.page.fragments.push("\n".to_string()),
                ParseState::InPageHeader => self.page.header.push('\n'),
                ParseState::InTitle => self.page.title.push('\n'),
                ParseState::OutsideBody => {}
            }
        }

        let resume = entered.map(|next| std::mem::replace(&mut self.state, next));
        self.stack.push(Frame {
            name: name.to_string(),
            resume,
        });
    }

    /// An element closed. Closing tags with no matching open container are
    /// ignored.
    pub fn close(&mut self, name: &str) {
        let Some(index) = self.stack.iter().rposition(|frame| frame.name == name) else {
            return;
        };

        // Innermost first, so the outermost state-changing frame wins
        for frame in self.stack.drain(index..).rev() {
            if let Some(resume) = frame.resume {
                self.state = resume;
            }
        }
    }

    /// A run of decoded text
    pub fn text(&mut self, text: &str) {
        match self.state {
            ParseState::InPageHeader => self.page.header.push_str(text),
            ParseState::InTitle => self.page.title.push_str(text),
            ParseState::InBody => self.page.fragments.push(text.to_string()),
            ParseState::OutsideBody => {}
        }
    }

    /// Finish parsing. Containers still open are fine; a page with neither a
    /// header container nor any body text is not.
    pub fn finish(self) -> Result<ParsedPage> {
        let has_body_text = self.page.fragments.iter().any(|f| !f.trim().is_empty());
        if !self.saw_header && !has_body_text {
            return Err(MoodjourError::MalformedInput(
                "no page header or body text found".to_string(),
            ));
        }
        Ok(self.page)
    }
}

/// Parse one page's markup into header, title and body fragments
pub fn parse_page(raw: &str) -> Result<ParsedPage> {
    let document = Html::parse_document(raw);
    let mut parser = MarkupParser::new();
    replay(document.root_element(), &mut parser);
    parser.finish()
}

/// Feed an element and its subtree to the parser in document order
fn replay(element: ElementRef<'_>, parser: &mut MarkupParser) {
    let name = element.value().name();
    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }

    parser.open(name, element.value().attr("class"));
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            replay(child_element, parser);
        } else if let Node::Text(text) = child.value() {
            parser.text(text);
        }
    }
    parser.close(name);
}

fn has_class(class: Option<&str>, wanted: &str) -> bool {
    class.is_some_and(|c| c.split_whitespace().any(|token| token == wanted))
}
