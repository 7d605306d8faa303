/// Address the page was opened with. The query is kept verbatim
/// (including the leading `?` when present) so it can be forwarded as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    href: String,
    raw: String,
}

impl PageQuery {
    /// Bare query string, no full URL known.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let raw = if raw.is_empty() || raw.starts_with('?') {
            raw
        } else {
            format!("?{raw}")
        };
        Self {
            href: raw.clone(),
            raw,
        }
    }

    /// Take the query out of a full URL. Fragments are dropped.
    pub fn from_url(url: &str) -> Self {
        let without_fragment = url.split('#').next().unwrap_or_default();
        let raw = match without_fragment.split_once('?') {
            Some((_, q)) if !q.is_empty() => format!("?{q}"),
            _ => String::new(),
        };
        Self {
            href: url.to_string(),
            raw,
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// First value of `name`, undecoded.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.raw
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| match pair.split_once('=') {
                Some((k, v)) => Some((k, v)),
                None if !pair.is_empty() => Some((pair, "")),
                None => None,
            })
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }
}
