use anyhow::Result;
use html2text::{config, render::text_renderer::TrivialDecorator};
use regex::Regex;
use std::sync::LazyLock;

const RENDER_WIDTH: usize = 10000;

/// Renders an HTML document to the text a reader would see on screen.
///
/// Blocks that never render (`script`, `style`, `noscript`, `template`) are
/// dropped first, then the remaining markup is flattened with html2text and the
/// result is whitespace-normalized.
pub fn visible_text(html: &str) -> Result<String> {
    let html = HIDDEN_BLOCK_REGEX.replace_all(html, " ");
    // Trivial decorator removes all tags and leaves only text
    let decorator = TrivialDecorator::new();
    let text = config::with_decorator(decorator)
        .allow_width_overflow()
        .string_from_read(html.as_bytes(), RENDER_WIDTH)?;

    Ok(super::clean_text::TextCleaner::new()
        .reduce_newlines_to_double_newline()
        .run(&text))
}

static HIDDEN_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<noscript\b[^>]*>.*?</noscript\s*>|<template\b[^>]*>.*?</template\s*>",
    )
    .unwrap()
});
