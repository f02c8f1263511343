/// File extensions the server accepts for upload. Kept in sync with the
/// conversion pipeline's own allow-list so obviously unprintable files are
/// rejected before any network call.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "png", "jpg", "jpeg", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "txt",
];

/// Case-insensitive extension check against [`ALLOWED_EXTENSIONS`].
/// A file without an extension is never allowed.
pub fn is_allowed_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_allowed_extension;

    #[test]
    fn accepts_known_extensions_case_insensitively() {
        assert!(is_allowed_extension("rapport.pdf"));
        assert!(is_allowed_extension("Photo.JPG"));
        assert!(is_allowed_extension("cours.DOCX"));
    }

    #[test]
    fn rejects_unknown_or_missing_extensions() {
        assert!(!is_allowed_extension("archive.zip"));
        assert!(!is_allowed_extension("Makefile"));
        assert!(!is_allowed_extension(".bashrc"));
    }
}
