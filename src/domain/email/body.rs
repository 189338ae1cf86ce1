/// Represents one content-type-specific rendering of an email,
/// usually `text/html` or `text/plain`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Body {
    pub content_type: String,
    pub content: String,
}

impl Body {
    pub fn new<T, C>(content_type: T, content: C) -> Self
    where
        T: ToString,
        C: ToString,
    {
        Self {
            content_type: content_type.to_string(),
            content: content.to_string(),
        }
    }

    pub fn html<C: ToString>(content: C) -> Self {
        Self::new("text/html", content)
    }

    pub fn text_plain<C: ToString>(content: C) -> Self {
        Self::new("text/plain", content)
    }

    /// Gets the MIME essence of the body content type.
    pub fn essence(&self) -> String {
        essence(&self.content_type)
    }
}

/// Lowercases the given content type and strips its parameters, so
/// `Text/Plain; charset=utf-8` becomes `text/plain`.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}
