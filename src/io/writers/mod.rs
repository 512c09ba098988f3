pub mod json;
pub mod markdown;
pub mod terminal;
pub mod xlsx;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;
pub use xlsx::XlsxWriter;
