use crate::model::Ad;
use std::collections::HashSet;

/// Every ad seen since startup, in the order first seen.
///
/// Append-only: a changed title or price on a known url is not picked up.
#[derive(Debug, Default)]
pub struct AdStore {
    ads: Vec<Ad>,
    urls: HashSet<String>,
}

impl AdStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the ads whose url hasn't been seen yet and returns them, in
    /// batch order. Within a batch only the first ad for a url counts.
    pub fn add(&mut self, batch: impl IntoIterator<Item = Ad>) -> Vec<Ad> {
        let mut new_ads = Vec::new();

        for ad in batch {
            if self.urls.insert(ad.url.clone()) {
                self.ads.push(ad.clone());
                new_ads.push(ad);
            }
        }

        new_ads
    }

    pub fn len(&self) -> usize {
        self.ads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(url: &str, title: &str) -> Ad {
        Ad {
            url: url.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn urls(ads: &[Ad]) -> Vec<&str> {
        ads.iter().map(|a| a.url.as_str()).collect()
    }

    #[test]
    fn distinct_ads_into_empty_store_are_all_new() {
        let mut store = AdStore::new();
        let batch = vec![ad("/c", "c"), ad("/a", "a"), ad("/b", "b")];

        let new_ads = store.add(batch.clone());

        assert_eq!(new_ads, batch);
        assert_eq!(urls(&new_ads), vec!["/c", "/a", "/b"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn known_urls_are_dropped() {
        let mut store = AdStore::new();
        store.add(vec![ad("/a", "a"), ad("/b", "b")]);

        let new_ads = store.add(vec![ad("/b", "b with new price"), ad("/c", "c"), ad("/a", "a")]);

        assert_eq!(urls(&new_ads), vec!["/c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn first_duplicate_within_batch_wins() {
        let mut store = AdStore::new();

        let new_ads = store.add(vec![ad("/a", "first"), ad("/b", "b"), ad("/a", "second")]);

        assert_eq!(urls(&new_ads), vec!["/a", "/b"]);
        assert_eq!(new_ads[0].title, "first");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let mut store = AdStore::new();
        assert!(store.add(Vec::new()).is_empty());
        assert!(store.is_empty());

        store.add(vec![ad("/a", "a")]);
        assert!(store.add(Vec::new()).is_empty());
        assert_eq!(store.len(), 1);
    }
}
