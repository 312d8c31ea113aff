//! Single article view.

use std::io::{self, Write};

use blogline::{ArticleGateway, BloglineConfig, ContentError};

use super::output::write_article;

/// Shows the configured article and its related articles on stdout.
///
/// # Errors
///
/// Returns [`ContentError::Configuration`] when no article is configured,
/// [`ContentError::NotFound`] when the article does not exist, and the
/// gateway's error for other failures.
pub async fn run<G: ArticleGateway>(
    config: &BloglineConfig,
    gateway: &G,
) -> Result<(), ContentError> {
    let mut stdout = io::stdout().lock();
    run_with_writer(config, gateway, &mut stdout).await
}

/// Shows the configured article on `writer`.
///
/// A failed related-articles lookup is logged and the section is omitted.
pub async fn run_with_writer<G, W>(
    config: &BloglineConfig,
    gateway: &G,
    writer: &mut W,
) -> Result<(), ContentError>
where
    G: ArticleGateway,
    W: Write,
{
    let id = config.require_article()?;
    let article = gateway.article(&id).await?;
    let related = match gateway.related(&id).await {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(%error, article = %id, "related articles unavailable");
            Vec::new()
        }
    };
    write_article(writer, &article, &related)
}
