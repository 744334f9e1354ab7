// Ad detail page: geolocation and the full image gallery
use crate::model::{AdDetails, ParserError};
use scraper::{Html, Selector};
use serde_json::Value;

const DATA_PREFIX: &str = "window.__data=";

pub fn parse_ad_details(html: &str) -> Result<AdDetails, ParserError> {
    let document = Html::parse_document(html);
    let script_selector = Selector::parse("#FesLoader script")
        .map_err(|e| ParserError::Selector(e.to_string()))?;

    let script = document
        .select(&script_selector)
        .next()
        .map(|node| node.text().collect::<String>())
        .ok_or_else(|| ParserError::MissingField("#FesLoader script".into()))?;

    let json = script.trim();
    let json = json.strip_prefix(DATA_PREFIX).unwrap_or(json);
    let json = json.strip_suffix(';').unwrap_or(json);
    let data: Value = serde_json::from_str(json)?;

    let item = data.pointer("/viewItemPage/viewItemData").unwrap_or(&Value::Null);

    let images = item
        .get("media")
        .and_then(Value::as_array)
        .map(|media| {
            media
                .iter()
                .filter(|m| m.get("type").and_then(Value::as_str) == Some("image"))
                .filter_map(|m| m.get("href").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(AdDetails {
        latitude: item.pointer("/adLocation/latitude").and_then(Value::as_f64),
        longitude: item.pointer("/adLocation/longitude").and_then(Value::as_f64),
        images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(data: &str) -> String {
        format!(
            "<html><body><div id=\"FesLoader\"><script>window.__data={};</script></div></body></html>",
            data
        )
    }

    #[test]
    fn reads_location_and_images() {
        let html = page(
            r#"{"viewItemPage":{"viewItemData":{
                "adLocation":{"latitude":43.65,"longitude":-79.38},
                "media":[
                    {"type":"image","href":"https://img/1.jpg"},
                    {"type":"video","href":"https://vid/1.mp4"},
                    {"type":"image","href":"https://img/2.jpg"}
                ]}}}"#,
        );

        let details = parse_ad_details(&html).unwrap();

        assert_eq!(details.latitude, Some(43.65));
        assert_eq!(details.longitude, Some(-79.38));
        assert_eq!(details.images, vec!["https://img/1.jpg", "https://img/2.jpg"]);
    }

    #[test]
    fn missing_paths_give_empty_details() {
        let details = parse_ad_details(&page(r#"{"viewItemPage":{}}"#)).unwrap();
        assert_eq!(details, AdDetails::default());
    }

    #[test]
    fn missing_script_is_an_error() {
        let err = parse_ad_details("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, ParserError::MissingField(_)));
    }

    #[test]
    fn broken_json_is_an_error() {
        let err = parse_ad_details(&page("{not json")).unwrap_err();
        assert!(matches!(err, ParserError::Json(_)));
    }
}
