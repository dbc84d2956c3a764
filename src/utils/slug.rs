use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy)]
pub struct BlobParts<'a> {
    pub title: &'a str,
    pub stack: &'a BTreeSet<String>,
    pub company: &'a str,
    pub curator_name: &'a str,
    pub year: i32,
    pub month: &'a str,
    pub day: u32,
}

pub fn derive_blob(parts: &BlobParts<'_>) -> String {
    let stack = parts
        .stack
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("-");

    kebab_case(&format!(
        "{} {} {} {} {} {} {}",
        parts.title, stack, parts.company, parts.curator_name, parts.year, parts.month, parts.day
    ))
}

/// Lowercases and joins the alphanumeric runs of `input` with single hyphens.
pub fn kebab_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
