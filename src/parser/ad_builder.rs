use crate::model::Ad;
use crate::normalizer::{determine_date_posted, matches_texts};
use crate::parser::FragmentReader;

/// Builds an `Ad` from one listing, flagging business postings and ads that
/// match one of the ignore phrases.
pub fn build_ad(fragment: &impl FragmentReader, ignores: &[String]) -> Ad {
    let title = fragment.title().trim().to_string();
    let description = fragment.description().trim().to_string();
    let is_ignored = matches_texts(&[title.as_str(), description.as_str()], ignores);

    Ad {
        url: fragment.url(),
        images: fragment.image_url().into_iter().collect(),
        location: fragment.location().trim().to_string(),
        price: fragment.price().trim().to_string(),
        date_posted: determine_date_posted(&fragment.date_posted()),
        is_business: fragment.is_third_party(),
        is_ignored,
        title,
        description,
        latitude: None,
        longitude: None,
    }
}
