use uuid::Uuid;

const CREATIVE_ID_PREFIX: &str = "Video_Creative_";

/// Split a comma and/or whitespace separated value into its fragments,
/// keeping their order and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn unique_creative_id() -> String {
    format!("{CREATIVE_ID_PREFIX}{}", Uuid::new_v4())
}

pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
