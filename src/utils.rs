use regex::Regex;
use std::sync::OnceLock;
use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;
use url::Url;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_number(num: usize) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Mask the host of a site URL, keeping only its top-level domain.
pub fn redact_url(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => return url.to_string(),
        },
        Err(_) => return url.to_string(),
    };

    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() <= 1 {
        return host;
    }

    if parts[parts.len() - 2].len() <= 3 {
        return format!("???.{}", parts[parts.len() - 1]);
    }

    let redacted_parts: Vec<String> = parts[..parts.len() - 1]
        .iter()
        .map(|part| "*".repeat(part.len()))
        .collect();

    let mut result = redacted_parts.join(".");
    result.push('.');
    result.push_str(parts[parts.len() - 1]);
    result
}

/// Turn a URL into a filename-safe slug: scheme dropped, everything else
/// that is not alphanumeric becomes `-`.
pub fn url_for_filename(url: &str) -> String {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let scheme = SCHEME.get_or_init(|| Regex::new(r"^https?://").expect("valid scheme regex"));
    let unsafe_chars =
        UNSAFE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid slug regex"));

    let stripped = scheme.replace(url, "");
    unsafe_chars.replace_all(&stripped, "-").into_owned()
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.top == 0 {
        anyhow::bail!("--top must be greater than 0");
    }

    if let Some(url) = &args.url {
        if url.trim().is_empty() {
            anyhow::bail!("--url must not be empty");
        }
    }

    Ok(())
}
