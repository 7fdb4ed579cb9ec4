use serde_json::Value;

/// Count attached photos, videos, and documents across both evidence shapes.
///
/// Sources are additive: items in the `ipfs_hashes` list are bucketed by
/// their type tag, then lengths of the `media_files` sub-lists are added on
/// top. Nothing is deduplicated between the two.
pub fn media_counts(submission: &Value) -> (u32, u32, u32) {
    let mut photos = 0;
    let mut videos = 0;
    let mut documents = 0;

    if let Some(items) = submission.get("ipfs_hashes").and_then(Value::as_array) {
        for item in items {
            let tag = item
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_lowercase();
            // Each item lands in at most one bucket, first match wins
            if tag.contains("photo") || tag.contains("image") {
                photos += 1;
            } else if tag.contains("video") {
                videos += 1;
            } else if tag.contains("document") || tag.contains("doc") || tag.contains("pdf") {
                documents += 1;
            }
        }
    }

    if let Some(media) = submission.get("media_files").and_then(Value::as_object) {
        photos += list_len(media.get("photos"));
        videos += list_len(media.get("videos"));
        documents += list_len(media.get("documents"));
    }

    (photos, videos, documents)
}

fn list_len(value: Option<&Value>) -> u32 {
    value.and_then(Value::as_array).map_or(0, |list| list.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_media() {
        assert_eq!(media_counts(&json!({})), (0, 0, 0));
    }

    #[test]
    fn test_ipfs_hashes_bucketing() {
        let submission = json!({
            "ipfs_hashes": [
                {"type": "photos", "filename": "a.jpg"},
                {"type": "image/png", "filename": "b.png"},
                {"type": "videos", "filename": "c.mp4"},
                {"type": "documents", "filename": "d.pdf"},
                {"type": "pdf", "filename": "e.pdf"},
            ]
        });
        assert_eq!(media_counts(&submission), (2, 1, 2));
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let submission = json!({
            "ipfs_hashes": [
                {"type": "Photo"},
                {"type": "VIDEO"},
            ]
        });
        assert_eq!(media_counts(&submission), (1, 1, 0));
    }

    #[test]
    fn test_unknown_tags_are_dropped() {
        let submission = json!({
            "ipfs_hashes": [
                {"type": "audio"},
                {"filename": "untagged.bin"},
            ]
        });
        assert_eq!(media_counts(&submission), (0, 0, 0));
    }

    #[test]
    fn test_media_files_lengths() {
        let submission = json!({
            "media_files": {
                "photos": ["a.jpg", "b.jpg", "c.jpg"],
                "videos": ["d.mp4"],
                "documents": []
            }
        });
        assert_eq!(media_counts(&submission), (3, 1, 0));
    }

    #[test]
    fn test_sources_are_additive() {
        let submission = json!({
            "ipfs_hashes": [
                {"type": "photos", "filename": "a.jpg"}
            ],
            "media_files": {
                "photos": ["a.jpg"]
            }
        });
        // Same file in both sources counts twice
        assert_eq!(media_counts(&submission), (2, 0, 0));
    }
}
