// One scrape cycle: fetch, parse, filter, dedupe, enrich, notify
use crate::config::AppConfig;
use crate::fetcher::Scraper;
use crate::model::Ad;
use crate::notifier::Notifier;
use crate::parser::{KijijiParser, Parser, parse_ad_details};
use crate::storage::AdStore;
use futures::StreamExt;
use futures::future::join_all;
use futures::stream;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Detail pages fetched at once. The first cycle sees every listed ad as new.
const DETAIL_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: usize,
    pub new: usize,
    pub total: usize,
}

/// Drops ignored ads, and business ads when `no_business_ads` is set.
pub fn select_candidates(ads: Vec<Ad>, no_business_ads: bool) -> Vec<Ad> {
    ads.into_iter()
        .filter(|ad| !ad.is_ignored)
        .filter(|ad| !(no_business_ads && ad.is_business))
        .collect()
}

pub struct Watcher<S, N> {
    scraper: S,
    parser: KijijiParser,
    notifier: Arc<N>,
    store: Arc<Mutex<AdStore>>,
    config: Arc<AppConfig>,
}

impl<S: Scraper, N: Notifier> Watcher<S, N> {
    pub fn new(
        scraper: S,
        parser: KijijiParser,
        notifier: Arc<N>,
        store: Arc<Mutex<AdStore>>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { scraper, parser, notifier, store, config }
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let pages = join_all(self.config.urls.iter().map(|url| self.fetch_ads(url))).await;
        let fetched: Vec<Ad> = pages.into_iter().flatten().collect();
        let fetched_count = fetched.len();
        info!("fetched {} ads", fetched_count);

        let candidates = select_candidates(fetched, self.config.no_business_ads);
        debug!("{} ads left after ignore/business filtering", candidates.len());

        // Lock held for the whole add so concurrent cycles can't interleave.
        let (new_ads, total, first_cycle) = {
            let mut store = self.store.lock().await;
            let first_cycle = store.is_empty();
            let new_ads = store.add(candidates);
            (new_ads, store.len(), first_cycle)
        };
        if first_cycle {
            info!("Empty datastore, all {} listed ads count as new", new_ads.len());
        } else {
            info!("{} were new ads", new_ads.len());
        }

        let new_ads = if self.config.load_details {
            stream::iter(new_ads)
                .map(|ad| self.load_details(ad))
                .buffered(DETAIL_CONCURRENCY)
                .collect::<Vec<Ad>>()
                .await
        } else {
            new_ads
        };

        if !new_ads.is_empty() {
            if let Err(e) = self.notifier.notify_ads(&new_ads).await {
                warn!("Notification failed: {}", e);
            }
        }

        info!("Ads updated, total ads in datastore: {}", total);
        CycleReport { fetched: fetched_count, new: new_ads.len(), total }
    }

    async fn fetch_ads(&self, url: &str) -> Vec<Ad> {
        let html = match self.scraper.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Scraper error for {}: {}", url, e);
                return Vec::new();
            }
        };

        match self.parser.parse(&html, &self.config.ignores) {
            Ok(ads) => ads,
            Err(e) => {
                warn!("Parse error for {}: {}", url, e);
                Vec::new()
            }
        }
    }

    async fn load_details(&self, mut ad: Ad) -> Ad {
        let details = match self.scraper.fetch(&ad.url).await {
            Ok(html) => parse_ad_details(&html).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match details {
            Ok(details) => ad.apply_details(details),
            Err(e) => debug!("No additional details for {}: {}", ad.url, e),
        }
        ad
    }
}
