pub mod email;
pub use email::{Attachment, AttachmentContent, Body, Email};
