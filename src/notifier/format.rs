// Rendering of "new ads" messages (Telegram HTML subset)
use crate::config::MapConfig;
use crate::model::Ad;

/// Telegram rejects messages over 4096 characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;
const MAX_DESCRIPTION_CHARS: usize = 1000;
const MAX_IMAGE_LINKS: usize = 10;

pub fn ads_found_message(count: usize) -> String {
    let pluralization = if count == 1 { "ad" } else { "ads" };
    format!("{} new {}", count, pluralization)
}

/// Summary plus every ad, packed into as few messages as the size limit
/// allows. Ad order is kept and an ad is never split across messages.
pub fn pack_messages(ads: &[Ad], map: &MapConfig) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = format!("<b>{}</b>", ads_found_message(ads.len()));
    let mut current_chars = current.chars().count();

    for ad in ads {
        let block = format_ad(ad, map);
        let block_chars = block.chars().count();

        if current_chars + 2 + block_chars <= MAX_MESSAGE_CHARS {
            current.push_str("\n\n");
            current.push_str(&block);
            current_chars += 2 + block_chars;
        } else {
            messages.push(std::mem::replace(&mut current, block));
            current_chars = block_chars;
        }
    }

    messages.push(current);
    messages
}

pub fn format_ad(ad: &Ad, map: &MapConfig) -> String {
    let mut lines = vec![
        format!(
            "<a href=\"{}\">{}</a> Price: {}",
            escape_html(&ad.url),
            escape_html(&ad.title),
            escape_html(&ad.price)
        ),
        escape_html(&ad.location),
        escape_html(&truncate(&ad.description, MAX_DESCRIPTION_CHARS)),
    ];

    if !ad.images.is_empty() {
        let links: Vec<String> = ad
            .images
            .iter()
            .take(MAX_IMAGE_LINKS)
            .enumerate()
            .map(|(i, image)| format!("<a href=\"{}\">image {}</a>", escape_html(image), i + 1))
            .collect();
        lines.push(links.join(" | "));
    }

    if let Some((lat, lng)) = ad.coordinates() {
        let item_location = format!("{},{}", lat, lng);
        let mut map_line = format!(
            "<a href=\"{}\">map</a>",
            escape_html(&format!("http://maps.google.com/?q={}", item_location))
        );
        if let Some((key, home)) = map.static_map_params() {
            map_line.push_str(&format!(
                " | <a href=\"{}\">distance from home</a>",
                escape_html(&static_map_url(key, home, &item_location))
            ));
        }
        lines.push(map_line);
    }

    lines.retain(|line| !line.is_empty());
    lines.join("\n")
}

fn static_map_url(key: &str, home: &str, item_location: &str) -> String {
    format!(
        "https://maps.googleapis.com/maps/api/staticmap?size=600x400&maptype=roadmap&key={}\
         &format=png&visual_refresh=true\
         &markers=size:tiny%7Ccolor:0xff0000%7C{}\
         &markers=size:mid%7Ccolor:0xff0000%7C{}",
        key, home, item_location
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
