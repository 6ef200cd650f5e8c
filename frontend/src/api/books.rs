use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{
    client::ApiClient,
    types::{ApiError, Book},
};

/// Everything `encodeURIComponent` escapes.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub(crate) fn books_path(query: &str) -> String {
    format!("/books/?q={}", utf8_percent_encode(query, QUERY_VALUE))
}

impl ApiClient {
    pub async fn list_books(&self, query: &str) -> Result<Vec<Book>, ApiError> {
        self.get_json(&books_path(query)).await
    }
}

#[cfg(test)]
mod tests {
    use super::books_path;

    #[test]
    fn query_is_url_encoded() {
        assert_eq!(books_path(""), "/books/?q=");
        assert_eq!(books_path("dune"), "/books/?q=dune");
        assert_eq!(
            books_path("war & peace?"),
            "/books/?q=war%20%26%20peace%3F"
        );
        assert_eq!(books_path("café"), "/books/?q=caf%C3%A9");
    }
}
