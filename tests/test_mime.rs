use fileserve::http::mime::MimeType;
use std::path::Path;

#[test]
fn test_mime_from_type_str() {
    assert_eq!(MimeType::from_type_str("text/plain"), Some(MimeType::TextPlain));
    assert_eq!(MimeType::from_type_str(" text/html "), Some(MimeType::TextHtml));
    assert_eq!(MimeType::from_type_str("application/octet-stream"), None);
    assert_eq!(MimeType::from_type_str("text/plain; charset=utf-8"), None);
}

#[test]
fn test_mime_from_extension() {
    assert_eq!(MimeType::from_extension("txt"), Some(MimeType::TextPlain));
    assert_eq!(MimeType::from_extension("HTM"), Some(MimeType::TextHtml));
    assert_eq!(MimeType::from_extension("json"), Some(MimeType::ApplicationJson));
    assert_eq!(MimeType::from_extension("exe"), None);
}

#[test]
fn test_mime_from_path() {
    assert_eq!(MimeType::from_path(Path::new("/srv/a/notes.txt")), Some(MimeType::TextPlain));
    assert_eq!(MimeType::from_path(Path::new("/srv/index.html")), Some(MimeType::TextHtml));
    assert_eq!(MimeType::from_path(Path::new("/srv/Makefile")), None);
    assert_eq!(MimeType::from_path(Path::new("/srv/image.png")), None);
}

#[test]
fn test_mime_table_is_consistent() {
    for mime in MimeType::ALL {
        assert_eq!(MimeType::from_type_str(mime.as_str()), Some(mime));
        for ext in mime.extensions() {
            assert_eq!(MimeType::from_extension(ext), Some(mime));
        }
    }
}
