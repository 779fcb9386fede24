pub mod clean_html;
pub mod clean_text;
pub mod truncate;

pub use clean_html::visible_text;
pub use clean_text::TextCleaner;
pub use truncate::truncate_chars;
