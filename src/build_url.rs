use crate::error::Error;
use url::Url;

/// Options for building URLs from a base URL and path segments.
///
/// The default preserves any existing query/fragment and does not
/// trim trailing empty path segments.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BuildUrlOptions {
    /// When true, clear any existing query string on the base URL.
    pub clear_query: bool,
    /// When true, clear any existing fragment (`#...`) on the base URL.
    pub clear_fragment: bool,
    /// When true, drop a trailing empty path segment before appending segments.
    pub pop_if_empty: bool,
}

impl BuildUrlOptions {
    /// Default options used when constructing request URLs.
    pub const REQUEST: Self = Self {
        clear_query: true,
        clear_fragment: true,
        pop_if_empty: true,
    };
}

/// Appends `segments` to `base_url`, percent-encoding each one.
pub(crate) fn build_url(
    base_url: &Url,
    segments: &[&str],
    options: BuildUrlOptions,
) -> Result<Url, Error> {
    let mut url = base_url.clone();
    if options.clear_query {
        url.set_query(None);
    }
    if options.clear_fragment {
        url.set_fragment(None);
    }
    {
        let mut path_segments = url
            .path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(base_url.to_string()))?;
        if options.pop_if_empty {
            path_segments.pop_if_empty();
        }
        for segment in segments {
            path_segments.push(segment);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_encoded_segments_and_drops_query() {
        let base = Url::parse("https://example.okta.com/?x=1#frag").expect("url");
        let url = build_url(
            &base,
            &["governance", "api", "v1", "campaigns", "a/b"],
            BuildUrlOptions::REQUEST,
        )
        .expect("build");
        assert_eq!(
            url.as_str(),
            "https://example.okta.com/governance/api/v1/campaigns/a%2Fb"
        );
    }

    #[test]
    fn keeps_query_with_default_options() {
        let base = Url::parse("https://example.okta.com/base?x=1").expect("url");
        let url = build_url(&base, &["v1"], BuildUrlOptions::default()).expect("build");
        assert_eq!(url.as_str(), "https://example.okta.com/base/v1?x=1");
    }

    #[test]
    fn rejects_cannot_be_a_base_urls() {
        let base = Url::parse("mailto:admin@example.com").expect("url");
        let err = build_url(&base, &["v1"], BuildUrlOptions::REQUEST).unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }
}
