// ABOUTME: Service URL extraction from `gcloud run deploy` output.
// ABOUTME: Prefers the "Service URL:" line, then any run.app link.

const SERVICE_URL_PREFIX: &str = "Service URL:";
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ')', ']', '\'', '"'];

/// Find the deployed service's URL in gcloud's output lines.
pub fn extract_service_url<'a>(lines: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let lines: Vec<&str> = lines.into_iter().collect();

    lines
        .iter()
        .filter_map(|line| line.trim().strip_prefix(SERVICE_URL_PREFIX))
        .find_map(|rest| https_tokens(rest).next())
        .or_else(|| {
            lines
                .iter()
                .flat_map(|line| https_tokens(line))
                .find(|url| url.contains(".run.app"))
        })
        .map(str::to_string)
}

fn https_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|token| token.trim_end_matches(TRAILING_PUNCTUATION))
        .filter(|token| token.starts_with("https://") && token.len() > "https://".len())
}
