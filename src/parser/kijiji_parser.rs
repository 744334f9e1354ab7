// Kijiji-specific HTML parsing
use crate::model::{Ad, ParserError};
use crate::parser::{FragmentReader, build_ad};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

pub const KIJIJI_BASE_URL: &str = "https://www.kijiji.ca";

pub trait Parser {
    fn parse(&self, html: &str, ignores: &[String]) -> Result<Vec<Ad>, ParserError>;
}

struct Selectors {
    item: Selector,
    image: Selector,
    title: Selector,
    description: Selector,
    location: Selector,
    price: Selector,
    date_posted: Selector,
}

pub struct KijijiParser {
    base_url: String,
    selectors: Selectors,
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::Selector(format!("{css}: {e}")))
}

impl KijijiParser {
    pub fn new() -> Result<Self, ParserError> {
        Self::with_base_url(KIJIJI_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ParserError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            selectors: Selectors {
                item: selector("div.search-item")?,
                image: selector(".image source")?,
                title: selector("a.title")?,
                description: selector(".description")?,
                location: selector(".location")?,
                price: selector(".price")?,
                date_posted: selector(".date-posted")?,
            },
        })
    }
}

impl Parser for KijijiParser {
    fn parse(&self, html: &str, ignores: &[String]) -> Result<Vec<Ad>, ParserError> {
        let document = Html::parse_document(html);
        let mut ads = Vec::new();

        for element in document.select(&self.selectors.item) {
            let Some(path) = element.value().attr("data-vip-url") else {
                warn!("{}", ParserError::MissingField("data-vip-url".into()));
                continue;
            };

            let fragment = HtmlFragment {
                element,
                url: format!("{}{}", self.base_url, path),
                selectors: &self.selectors,
            };
            ads.push(build_ad(&fragment, ignores));
        }

        Ok(ads)
    }
}

/// One `div.search-item` of a search result page.
struct HtmlFragment<'a> {
    element: ElementRef<'a>,
    url: String,
    selectors: &'a Selectors,
}

impl HtmlFragment<'_> {
    fn text_of(&self, selector: &Selector) -> String {
        self.element
            .select(selector)
            .next()
            .map(|node| node.text().collect::<String>())
            .unwrap_or_default()
    }
}

impl FragmentReader for HtmlFragment<'_> {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn image_url(&self) -> Option<String> {
        self.element
            .select(&self.selectors.image)
            .next()
            .and_then(|node| node.value().attr("data-srcset"))
            .map(str::to_string)
    }

    fn title(&self) -> String {
        self.text_of(&self.selectors.title)
    }

    fn description(&self) -> String {
        self.text_of(&self.selectors.description)
    }

    fn location(&self) -> String {
        self.text_of(&self.selectors.location)
    }

    fn price(&self) -> String {
        self.text_of(&self.selectors.price)
    }

    fn date_posted(&self) -> String {
        self.text_of(&self.selectors.date_posted)
    }

    fn is_third_party(&self) -> bool {
        self.element
            .value()
            .attr("class")
            .is_some_and(|class| class.contains("third-party"))
    }
}
