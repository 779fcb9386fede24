use regex::Regex;
use std::sync::LazyLock;

/// How runs of line breaks are collapsed.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub enum Newlines {
    Space,
    Single,
    #[default]
    TwoPlus,
    None,
}

/// Whitespace normalization for text scraped from a rendered page.
///
/// Mirrors what a browser's `innerText` hands back: line endings unified,
/// exotic spaces flattened, blank lines collapsed and every line trimmed.
#[derive(Default, Clone, Debug)]
pub struct TextCleaner {
    pub newlines: Newlines,
}

impl TextCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn do_not_reduce_newlines(mut self) -> Self {
        self.newlines = Newlines::None;
        self
    }

    pub fn reduce_newlines_to_single_space(mut self) -> Self {
        self.newlines = Newlines::Space;
        self
    }

    pub fn reduce_newlines_to_single_newline(mut self) -> Self {
        self.newlines = Newlines::Single;
        self
    }

    pub fn reduce_newlines_to_double_newline(mut self) -> Self {
        self.newlines = Newlines::TwoPlus;
        self
    }

    pub fn run(&self, text: &str) -> String {
        let text = normalize_whitespace(text);
        let text = LINE_EDGE_SPACE_REGEX.replace_all(&text, "\n");

        let text = match self.newlines {
            Newlines::Space => NEWLINE_RUN_REGEX.replace_all(&text, " "),
            Newlines::Single => NEWLINE_RUN_REGEX.replace_all(&text, "\n"),
            Newlines::TwoPlus => THREE_PLUS_NEWLINE_REGEX.replace_all(&text, "\n\n"),
            Newlines::None => text,
        };

        SPACE_RUN_REGEX
            .replace_all(&text, " ")
            .trim()
            .to_string()
    }
}

/// Unifies line endings and turns every non-newline whitespace character into a plain space.
pub fn normalize_whitespace(text: &str) -> String {
    let text = END_OF_LINE_REGEX.replace_all(text, "\n");
    let text = END_OF_PARAGRAPH_REGEX.replace_all(&text, "\n\n");
    WHITE_SPACE_REGEX.replace_all(&text, " ").to_string()
}

//
// Newlines
//
pub static END_OF_LINE_REGEX: LazyLock<Regex> =
    // \r\n must come first so it is not split into two breaks
    LazyLock::new(|| Regex::new(r"\r\n|\r|\v|\f|\u{0085}|\u{2028}").unwrap());
pub static NEWLINE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
pub static THREE_PLUS_NEWLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

//
// Paragraphs
//
pub static END_OF_PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\u{2029}").unwrap());

//
// White space
//
pub static WHITE_SPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\u{00A0}\u{1680}\u{2000}-\u{200A}\u{202F}\u{205F}\u{3000}\u{FEFF}]").unwrap()
});
pub static SPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
pub static LINE_EDGE_SPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *\n *").unwrap());
