/// Typed access to the fields of one listing, independent of how the
/// listing was parsed.
pub trait FragmentReader {
    /// Absolute detail page url.
    fn url(&self) -> String;
    fn image_url(&self) -> Option<String>;
    fn title(&self) -> String;
    fn description(&self) -> String;
    fn location(&self) -> String;
    fn price(&self) -> String;
    fn date_posted(&self) -> String;
    /// Listing is tagged as a third-party (business) posting.
    fn is_third_party(&self) -> bool;
}
