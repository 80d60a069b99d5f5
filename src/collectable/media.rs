//! Media selection for card and gallery display

use super::Media;

/// URL shown on the card: the preview asset, else the lowest position asset
pub fn first_media(media: &[Media]) -> String {
    if let Some(preview) = media.iter().find(|m| m.is_preview) {
        return preview.url.clone();
    }

    media
        .iter()
        .min_by_key(|m| m.position)
        .map(|m| m.url.clone())
        .unwrap_or_default()
}

/// Gallery assets ordered by position, previews excluded
pub fn gallery_media(media: &[Media]) -> Vec<Media> {
    let mut sorted: Vec<Media> = media.iter().filter(|m| !m.is_preview).cloned().collect();
    sorted.sort_by_key(|m| m.position);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(url: &str, position: i64, is_preview: bool) -> Media {
        Media {
            url: url.to_string(),
            position,
            is_preview,
        }
    }

    #[test]
    fn test_first_media_prefers_preview() {
        let items = vec![media("a", 0, false), media("b", 5, true)];
        assert_eq!(first_media(&items), "b");
    }

    #[test]
    fn test_first_media_lowest_position() {
        let items = vec![media("a", 3, false), media("b", 1, false)];
        assert_eq!(first_media(&items), "b");
    }

    #[test]
    fn test_first_media_empty() {
        assert_eq!(first_media(&[]), "");
    }

    #[test]
    fn test_gallery_media_sorted_without_preview() {
        let items = vec![
            media("c", 3, false),
            media("p", 0, true),
            media("a", 1, false),
        ];
        let gallery = gallery_media(&items);
        let urls: Vec<&str> = gallery.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "c"]);
    }
}
