//! Error mapping helpers for the HTTP content gateway.

use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderMap};

use crate::content::error::ContentError;
use crate::content::models::ContentId;

/// Longest response body kept in [`ContentError::HttpStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ContentError {
    if error.is_decode() {
        return ContentError::Decode {
            message: format!("{operation}: {error}"),
        };
    }

    ContentError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &str) -> ContentError {
    ContentError::HttpStatus {
        status,
        body: truncate_body(body),
    }
}

/// Turns a 404 from the single-article endpoint into [`ContentError::NotFound`]
/// and leaves every other failure untouched.
pub(super) fn map_article_error(id: &ContentId, error: ContentError) -> ContentError {
    match error {
        ContentError::HttpStatus { status, .. } if status == StatusCode::NOT_FOUND => {
            ContentError::NotFound {
                id: id.as_str().to_owned(),
            }
        }
        other => other,
    }
}

/// Accepts `application/json` and any `+json` structured syntax suffix.
pub(super) fn ensure_json_content_type(headers: &HeaderMap) -> Result<(), ContentError> {
    let Some(raw) = headers.get(CONTENT_TYPE) else {
        return Err(ContentError::UnexpectedContentType {
            content_type: "<missing>".to_owned(),
        });
    };

    let value = raw.to_str().unwrap_or_default();
    let media_type = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if media_type == "application/json" || media_type.ends_with("+json") {
        Ok(())
    } else {
        Err(ContentError::UnexpectedContentType {
            content_type: value.to_owned(),
        })
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_owned();
    }
    let mut truncated: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
    use rstest::rstest;

    use super::{ensure_json_content_type, map_article_error, map_status_error};
    use crate::content::error::ContentError;
    use crate::content::models::ContentId;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[rstest]
    #[case::plain("application/json")]
    #[case::with_charset("application/json; charset=utf-8")]
    #[case::upper_case("Application/JSON")]
    #[case::problem_json("application/problem+json")]
    fn accepts_json_media_types(#[case] content_type: &'static str) {
        assert!(ensure_json_content_type(&headers_with(content_type)).is_ok());
    }

    #[rstest]
    #[case::html("text/html; charset=utf-8")]
    #[case::plain_text("text/plain")]
    fn rejects_non_json_media_types(#[case] content_type: &'static str) {
        let error = ensure_json_content_type(&headers_with(content_type))
            .expect_err("non-JSON should be rejected");
        assert_eq!(
            error,
            ContentError::UnexpectedContentType {
                content_type: content_type.to_owned(),
            }
        );
    }

    #[rstest]
    fn rejects_missing_content_type() {
        let error =
            ensure_json_content_type(&HeaderMap::new()).expect_err("missing header should fail");
        assert!(matches!(error, ContentError::UnexpectedContentType { .. }));
    }

    #[rstest]
    fn article_not_found_is_distinguished_from_other_failures() {
        let id = ContentId::new("abc").expect("id should be valid");

        let missing = map_article_error(&id, map_status_error(StatusCode::NOT_FOUND, ""));
        assert_eq!(
            missing,
            ContentError::NotFound {
                id: "abc".to_owned()
            }
        );

        let broken = map_article_error(
            &id,
            map_status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        );
        assert!(
            matches!(
                broken,
                ContentError::HttpStatus {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    ..
                }
            ),
            "expected HttpStatus, got {broken:?}"
        );
    }

    #[rstest]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(2_000);
        let ContentError::HttpStatus { body: kept, .. } =
            map_status_error(StatusCode::BAD_GATEWAY, &body)
        else {
            panic!("expected HttpStatus");
        };
        assert_eq!(kept.chars().count(), 515, "512 chars plus ellipsis");
    }
}
