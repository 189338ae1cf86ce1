pub mod config;
pub use config::SendmailConfig;

pub mod sendmail;
pub use sendmail::{Error, Result, Sendmail};
