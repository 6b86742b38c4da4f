use std::path::Path;

/// MIME types the server knows about.
///
/// This is a closed table: any type string or file extension not listed
/// here is unknown, and requests relying on it are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    /// text/plain
    TextPlain,
    /// text/html
    TextHtml,
    /// text/css
    TextCss,
    /// text/csv
    TextCsv,
    /// application/json
    ApplicationJson,
}

impl MimeType {
    pub const ALL: [MimeType; 5] = [
        MimeType::TextPlain,
        MimeType::TextHtml,
        MimeType::TextCss,
        MimeType::TextCsv,
        MimeType::ApplicationJson,
    ];

    /// Returns the type string sent in `Content-Type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::TextPlain => "text/plain",
            MimeType::TextHtml => "text/html",
            MimeType::TextCss => "text/css",
            MimeType::TextCsv => "text/csv",
            MimeType::ApplicationJson => "application/json",
        }
    }

    /// File extensions (lowercase, without the dot) mapped to this type.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MimeType::TextPlain => &["txt", "text", "log"],
            MimeType::TextHtml => &["html", "htm"],
            MimeType::TextCss => &["css"],
            MimeType::TextCsv => &["csv"],
            MimeType::ApplicationJson => &["json"],
        }
    }

    /// Looks up a registered type string.
    ///
    /// Matching is exact apart from surrounding whitespace, so
    /// `text/plain; charset=utf-8` is not `text/plain`.
    ///
    /// ```
    /// # use fileserve::http::mime::MimeType;
    /// assert_eq!(MimeType::from_type_str("text/plain"), Some(MimeType::TextPlain));
    /// assert_eq!(MimeType::from_type_str("application/octet-stream"), None);
    /// ```
    pub fn from_type_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Looks up the type registered for a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Looks up the type registered for the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
