use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, render_text, FetchFailure, GalleryView, HttpProductCatalog, IgnoreReason,
    PageEvent, PageFetchController, PlainCardRenderer, ProductCatalog, Step,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Page through the product catalog in the terminal")]
struct Args {
    /// Base URL of the catalog API; overrides gallery.toml and CATALOG_URL.
    #[arg(long)]
    catalog_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Print the first page and exit instead of reading pager commands.
    #[arg(long)]
    once: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Event(PageEvent),
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "n" | "next" => Some(Command::Event(PageEvent::Next)),
        "p" | "prev" | "previous" => Some(Command::Event(PageEvent::Previous)),
        "q" | "quit" | "exit" => Some(Command::Quit),
        "h" | "help" | "?" => Some(Command::Help),
        _ => None,
    }
}

/// Runs the step the controller asked for until it settles, fetching as needed.
async fn drive(
    controller: &mut PageFetchController,
    catalog: &dyn ProductCatalog,
    mut step: Step,
) -> Step {
    while let Step::Fetch(request) = step {
        let outcome = catalog
            .list_products(request.page)
            .await
            .map_err(|err| {
                tracing::warn!(page = request.page, "product page fetch failed: {err}");
                FetchFailure::from(err)
            });
        step = controller.transition(PageEvent::Resolved {
            request: request.id,
            outcome,
        });
    }
    step
}

async fn run<R, W>(
    catalog: &dyn ProductCatalog,
    input: R,
    out: &mut W,
    interactive: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut controller = PageFetchController::new();
    let step = controller.transition(PageEvent::Mount);
    drive(&mut controller, catalog, step).await;
    write!(
        out,
        "{}",
        render_text(&GalleryView::from_controller(&controller), &PlainCardRenderer)
    )?;
    if !interactive {
        return Ok(());
    }

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await.context("failed to read command")? else {
            break;
        };
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) | None => {
                writeln!(out, "commands: n(ext), p(revious), q(uit)")?;
            }
            Some(Command::Event(event)) => {
                let step = controller.transition(event);
                match drive(&mut controller, catalog, step).await {
                    Step::Ignored(IgnoreReason::AtFirstPage) => {
                        writeln!(out, "Already on the first page.")?;
                    }
                    Step::Ignored(IgnoreReason::AtLastPage) => {
                        writeln!(out, "Already on the last page.")?;
                    }
                    _ => write!(
                        out,
                        "{}",
                        render_text(&GalleryView::from_controller(&controller), &PlainCardRenderer)
                    )?,
                }
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings()?.with_overrides(args.catalog_url, args.timeout_secs)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let catalog =
        HttpProductCatalog::from_settings(&settings).context("failed to build catalog client")?;
    tracing::info!(url = %catalog.listing_url(), "browsing product catalog");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run(&catalog, stdin, &mut stdout, !args.once).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{CatalogError, StatusCode};
    use shared::{
        domain::ProductId,
        protocol::{Product, ProductPage},
    };

    struct FixedCatalog {
        total_pages: u32,
        fail_page: Option<u32>,
    }

    #[async_trait::async_trait]
    impl ProductCatalog for FixedCatalog {
        async fn list_products(&self, page: u32) -> Result<ProductPage, CatalogError> {
            if self.fail_page == Some(page) {
                return Err(CatalogError::Status {
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    message: "network down".to_string(),
                });
            }
            Ok(ProductPage {
                products: (1..=2)
                    .map(|n| Product {
                        id: ProductId::from(i64::from(page * 10 + n)),
                        name: format!("Item {n}"),
                        description: None,
                        price: None,
                        image_url: None,
                    })
                    .collect(),
                total_pages: self.total_pages,
            })
        }
    }

    async fn run_script(catalog: &FixedCatalog, script: &str, interactive: bool) -> String {
        let mut out = Vec::new();
        run(catalog, script.as_bytes(), &mut out, interactive)
            .await
            .expect("run");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn parses_pager_commands() {
        assert_eq!(parse_command(" N "), Some(Command::Event(PageEvent::Next)));
        assert_eq!(
            parse_command("previous"),
            Some(Command::Event(PageEvent::Previous))
        );
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("jump"), None);
    }

    #[tokio::test]
    async fn once_prints_first_page_only() {
        let catalog = FixedCatalog {
            total_pages: 3,
            fail_page: None,
        };
        let out = run_script(&catalog, "n\n", false).await;

        assert!(out.contains("[11] Item 1"));
        assert!(out.contains("Page 1 of 3"));
        assert!(!out.contains("Page 2 of 3"));
    }

    #[tokio::test]
    async fn pages_forward_and_reports_boundaries() {
        let catalog = FixedCatalog {
            total_pages: 2,
            fail_page: None,
        };
        let out = run_script(&catalog, "p\nn\nn\nq\n", true).await;

        assert!(out.contains("Already on the first page."));
        assert!(out.contains("[21] Item 1"));
        assert!(out.contains("Page 2 of 2"));
        assert!(out.contains("Already on the last page."));
    }

    #[tokio::test]
    async fn initial_failure_prints_error_without_pager() {
        let catalog = FixedCatalog {
            total_pages: 3,
            fail_page: Some(1),
        };
        let out = run_script(&catalog, "", true).await;

        assert!(out.contains("Error fetching products: network down"));
        assert!(!out.contains("Page 1 of"));
    }
}
