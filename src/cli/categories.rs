//! Category listing.

use std::io::{self, Write};

use blogline::{ArticleGateway, ContentApi, ContentError, discover_categories};

use super::output::write_categories;

/// Lists the known categories on stdout.
///
/// # Errors
///
/// Returns the gateway's error when neither the stats endpoint nor the
/// fallback list request succeeds.
pub async fn run<G>(gateway: &G) -> Result<(), ContentError>
where
    G: ArticleGateway + ContentApi,
{
    let mut stdout = io::stdout().lock();
    run_with_writer(gateway, &mut stdout).await
}

/// Lists the known categories on `writer`.
pub async fn run_with_writer<G, W>(gateway: &G, writer: &mut W) -> Result<(), ContentError>
where
    G: ArticleGateway + ContentApi,
    W: Write,
{
    let categories = discover_categories(gateway, gateway).await?;
    tracing::debug!(count = categories.len(), "discovered categories");
    write_categories(writer, &categories)
}
