pub mod sender;
pub use self::sender::{wrap, Error, Result, Sender, SenderBuilder, SenderConfig, Wrapped};

pub mod env;
pub use env::Env;

pub mod file;
pub use file::{AttachmentFile, BodyKind, FileNaming, FileSender, FileSenderConfig};

pub mod sendmail;
pub use sendmail::{Sendmail, SendmailConfig};

#[cfg(feature = "smtp-sender")]
pub mod smtp;
#[cfg(feature = "smtp-sender")]
pub use smtp::{Smtp, SmtpConfig};
