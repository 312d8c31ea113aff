//! Content type listing.

use std::io::{self, Write};

use blogline::{ContentApi, ContentError, discover_content_types};

use super::output::write_content_types;

/// Lists the content types in use on stdout.
///
/// # Errors
///
/// Returns the gateway's error when the scan request fails.
pub async fn run<A: ContentApi>(api: &A) -> Result<(), ContentError> {
    let mut stdout = io::stdout().lock();
    run_with_writer(api, &mut stdout).await
}

/// Lists the content types in use on `writer`.
pub async fn run_with_writer<A, W>(api: &A, writer: &mut W) -> Result<(), ContentError>
where
    A: ContentApi,
    W: Write,
{
    let content_types = discover_content_types(api).await?;
    tracing::debug!(count = content_types.len(), "discovered content types");
    write_content_types(writer, &content_types)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use blogline::{ContentApi, ContentError, ContentId, ContentItem, ListQuery};

    use super::run_with_writer;

    struct FixedPage(Vec<(&'static str, Option<&'static str>)>);

    #[async_trait]
    impl ContentApi for FixedPage {
        async fn list(&self, _query: &ListQuery) -> Result<Vec<ContentItem>, ContentError> {
            Ok(self
                .0
                .iter()
                .map(|(id, content_type)| {
                    let mut item =
                        ContentItem::with_id(ContentId::new(*id).expect("id should be valid"));
                    item.content_type = content_type.map(ToOwned::to_owned);
                    item
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn prints_distinct_content_types() {
        let api = FixedPage(vec![
            ("1", Some("online_course")),
            ("2", Some("article")),
            ("3", Some("article")),
            ("4", None),
        ]);
        let mut buffer = Vec::new();

        run_with_writer(&api, &mut buffer)
            .await
            .expect("listing content types should succeed");

        assert_eq!(
            String::from_utf8(buffer).expect("UTF-8"),
            "article\tarticle\nonline_course\tonline course\n"
        );
    }
}
