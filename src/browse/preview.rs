//! Derives the backend view URL for the previewed file.
//!
//! Pure string templating over `GET /api/storage/view`; no caching and no
//! existence check. A dangling path simply yields a URL the backend answers
//! with 404.

/// Build the PDF view URL for `path`, percent-encoded as a single query
/// parameter.
pub fn view_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/api/storage/view?filepath={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_view_url() {
        assert_eq!(
            view_url("http://localhost:8080", "2024/invoice.pdf"),
            "http://localhost:8080/api/storage/view?filepath=2024%2Finvoice.pdf"
        );
    }

    #[test]
    fn trims_trailing_slash_on_base() {
        assert_eq!(
            view_url("http://localhost:8080/", "a.pdf"),
            "http://localhost:8080/api/storage/view?filepath=a.pdf"
        );
    }

    #[test]
    fn encodes_spaces_and_reserved_characters() {
        let url = view_url("http://s", "2024/Q1 report&summary.pdf");
        assert!(url.ends_with("filepath=2024%2FQ1%20report%26summary.pdf"));
    }

    #[test]
    fn dangling_path_still_yields_url() {
        // No validation: an unknown path produces a well-formed URL.
        let url = view_url("http://s", "gone/removed.pdf");
        assert!(url.contains("filepath=gone%2Fremoved.pdf"));
    }
}
