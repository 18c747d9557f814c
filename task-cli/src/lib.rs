pub mod config;
pub mod page;

pub use config::Config;
pub use page::TerminalPage;
