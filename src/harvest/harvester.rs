//! Harvest orchestration - the four-level walk
//!
//! The harvester composes the link extractors, verse extractor, fetcher,
//! and join barrier into one pipeline:
//!
//! 1. Fetch the root page and discover translation listings.
//! 2. Gate each listing on the allow-list and the artifact-exists check
//!    before any book-level network activity.
//! 3. Per translation: fetch the listing, discover books, fan out one task
//!    per book; inside each book task, discover chapters (the book page
//!    itself stands in for chapter 1) and fan out one fetch per chapter.
//! 4. Join everything, then persist fragments in book -> chapter -> verse
//!    order, all-or-nothing per translation.

use crate::config::Config;
use crate::extract::{extract_verses, LinkExtractor};
use crate::harvest::fetcher::{build_http_client, fetch_page};
use crate::harvest::join::run_all;
use crate::markup::Tokenizer;
use crate::output::{HarvestReport, OutputStore, TranslationOutcome};
use crate::url::translation_code;
use crate::{HarvestError, Result};
use reqwest::Client;

/// Walks the corpus hierarchy and materializes translation artifacts
pub struct Harvester {
    config: Config,
    client: Client,
    store: OutputStore,
}

impl Harvester {
    /// Creates a harvester from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.fetcher)?;
        let store = OutputStore::new(&config.output.data_dir);
        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// Runs the harvest and reports the outcome per translation
    ///
    /// A failed translation is logged and reported, never fatal to the run;
    /// later listings are still considered. With the default policy the
    /// walk stops after the first translation that materializes.
    pub async fn run(&self) -> Result<HarvestReport> {
        let root_url = self.config.harvest.root_url.as_str();
        let root_page = fetch_page(&self.client, root_url).await?;
        let listings =
            LinkExtractor::translation_index().extract(Tokenizer::new(&root_page), root_url);

        if listings.is_empty() {
            return Err(HarvestError::NoTranslations {
                url: root_url.to_string(),
            });
        }
        tracing::info!("Discovered {} translation listings", listings.len());

        let mut report = HarvestReport::default();
        for listing_url in listings {
            let Some(code) = translation_code(&listing_url) else {
                // The acceptance pattern and the code pattern agree, so
                // this only happens for a root URL with an odd shape
                tracing::warn!("No translation code derivable from {}", listing_url);
                continue;
            };

            if !self.is_allowed(&code) {
                tracing::debug!("Skipping '{}': not on allow-list", code);
                report.record(code, TranslationOutcome::SkippedNotAllowed);
                continue;
            }

            if self.store.exists(&code) {
                tracing::info!("Skipping '{}': artifact already exists", code);
                report.record(code, TranslationOutcome::SkippedExisting);
                continue;
            }

            match self.harvest_translation(&code, &listing_url).await {
                Ok(()) => {
                    report.record(code, TranslationOutcome::Harvested);
                    if self.config.harvest.stop_after_first {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Translation '{}' failed: {}", code, e);
                    report.record(
                        code,
                        TranslationOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }

        Ok(report)
    }

    fn is_allowed(&self, code: &str) -> bool {
        self.config.harvest.translations.iter().any(|c| c == code)
    }

    /// Harvests one translation end to end
    ///
    /// All books and all chapters are fetched and joined before anything is
    /// committed; any book failure or empty book abandons the attempt and
    /// the staging sink cleans itself up, so no partial artifact survives.
    async fn harvest_translation(&self, code: &str, listing_url: &str) -> Result<()> {
        let listing_page = fetch_page(&self.client, listing_url).await?;
        let book_urls =
            LinkExtractor::book_index().extract(Tokenizer::new(&listing_page), listing_url);

        if book_urls.is_empty() {
            return Err(HarvestError::NoBooks {
                url: listing_url.to_string(),
            });
        }
        tracing::info!("Harvesting '{}': {} books", code, book_urls.len());

        let client = self.client.clone();
        let book_results = run_all(book_urls.clone(), move |book_url| {
            let client = client.clone();
            async move { harvest_book(client, book_url).await }
        })
        .await;

        let mut sink = self.store.create(code)?;
        for (book_url, result) in book_urls.iter().zip(book_results) {
            let fragments = result.map_err(|e| {
                tracing::warn!("Book {} failed: {}", book_url, e);
                HarvestError::BookFailed {
                    url: book_url.clone(),
                }
            })?;

            if fragments.is_empty() {
                return Err(HarvestError::EmptyBook {
                    url: book_url.clone(),
                });
            }

            for fragment in &fragments {
                sink.append(fragment)?;
            }
        }

        sink.commit()?;
        Ok(())
    }
}

/// Harvests one book: discovers its chapters and joins their extractions
///
/// Chapter 1 is the book's own listing page, not a discovered link, so the
/// book URL is submitted first and the `chap`-classed links follow in
/// document order. A failed chapter does not cancel its siblings; their
/// fragments are still extracted before the book is reported failed.
async fn harvest_book(client: Client, book_url: String) -> Result<Vec<String>> {
    let book_page = fetch_page(&client, &book_url).await?;

    let mut chapter_urls = vec![book_url.clone()];
    chapter_urls
        .extend(LinkExtractor::chapter_links().extract(Tokenizer::new(&book_page), &book_url));

    let chapter_results = run_all(chapter_urls.clone(), move |chapter_url| {
        let client = client.clone();
        async move { harvest_chapter(client, chapter_url).await }
    })
    .await;

    let mut fragments = Vec::new();
    let mut failed = false;
    for (chapter_url, result) in chapter_urls.iter().zip(chapter_results) {
        match result {
            Ok(chapter_fragments) => fragments.extend(chapter_fragments),
            Err(e) => {
                tracing::warn!("Chapter {} failed: {}", chapter_url, e);
                failed = true;
            }
        }
    }

    if failed {
        return Err(HarvestError::BookFailed { url: book_url });
    }
    Ok(fragments)
}

/// Fetches one chapter page and extracts its verse fragments in document
/// order
async fn harvest_chapter(client: Client, chapter_url: String) -> Result<Vec<String>> {
    let page = fetch_page(&client, &chapter_url).await?;
    let mut fragments = Vec::new();
    extract_verses(Tokenizer::new(&page), |text| {
        fragments.push(text.to_string())
    });
    Ok(fragments)
}
