use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::AddressError;
use crate::lookup::normalize_identifier;

/// Query parameter written when an identifier is mirrored into the address
pub const ID_PARAM: &str = "id";
/// Alternative parameter accepted on input (printed codes use `?plate=`)
pub const PLATE_PARAM: &str = "plate";

/// Page address (the scanned URL) of the lookup page.
///
/// Only what the lookup needs is modelled: reading an identifier out of the
/// address and producing a new address with the identifier reflected as `?id=`.
/// The path of the page itself is remembered so that it is never mistaken for
/// an identifier; only a segment past it can carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAddress {
    url: Url,
    page_path: String,
}

impl PageAddress {
    /// The lookup page at `address`. Its own path never reads as an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] unless `address` is an absolute URL with a path
    /// (`https://host/...`); bare words and `mailto:`-style addresses are refused.
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        let url = parse_url(address)?;
        let page_path = url.path().to_string();
        Ok(Self { url, page_path })
    }

    /// An address scanned for this page.
    ///
    /// When it sits below this page (same origin, path continuing this page's
    /// path) the extra trailing segment may carry an identifier. Any other
    /// address is treated as a page of its own.
    pub fn scanned(&self, address: &str) -> Result<Self, AddressError> {
        let url = parse_url(address)?;
        let below_page = url.origin() == self.url.origin()
            && path_segments(&url).starts_with(&path_segments(&self.url));
        let page_path = if below_page { self.page_path.clone() } else { url.path().to_string() };
        Ok(Self { url, page_path })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// First value of a query parameter, decoded
    pub fn param(&self, name: &str) -> Option<String> {
        self.url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
    }

    /// Identifier carried by the address.
    ///
    /// Checked in order: `?id=`, `?plate=`, then a path segment past the page
    /// path made only of ASCII letters and digits (so `index.html` is not
    /// mistaken for one).
    pub fn identifier(&self) -> Option<String> {
        for name in [ID_PARAM, PLATE_PARAM] {
            if let Some(value) = self.param(name) {
                let id = normalize_identifier(&value);
                if !id.is_empty() {
                    return Some(id);
                }
            }
        }

        let page_depth = self.page_path.split('/').filter(|s| !s.is_empty()).count();
        let segments = path_segments(&self.url);
        if segments.len() <= page_depth {
            return None;
        }
        let segment = percent_decode_str(segments.last()?).decode_utf8().ok()?;
        if segment.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Some(normalize_identifier(&segment));
        }
        None
    }

    /// The page address with `?id=<identifier>`, replacing any `id`/`plate`
    /// parameter and any identifier segment, keeping other parameters and the
    /// fragment in place.
    pub fn with_identifier(&self, identifier: &str) -> Self {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != ID_PARAM && key != PLATE_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut url = self.url.clone();
        url.set_path(&self.page_path);
        url.query_pairs_mut().clear().extend_pairs(kept).append_pair(ID_PARAM, identifier);

        Self { url, page_path: self.page_path.clone() }
    }
}

impl fmt::Display for PageAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn parse_url(address: &str) -> Result<Url, AddressError> {
    let address = address.trim();
    let url = Url::parse(address)
        .map_err(|source| AddressError::Invalid { address: address.to_string(), source })?;
    if url.cannot_be_a_base() {
        return Err(AddressError::NoPath(address.to_string()));
    }
    Ok(url)
}

/// Non-empty path segments, still percent-encoded
fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments().map(|segments| segments.filter(|s| !s.is_empty()).collect()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageAddress {
        PageAddress::parse("https://move.example.com/").unwrap()
    }

    #[test]
    fn test_identifier_from_id_param() {
        let address = PageAddress::parse("https://move.example.com/?id=a123b4").unwrap();
        assert_eq!(address.identifier().as_deref(), Some("A123B4"));
    }

    #[test]
    fn test_identifier_from_plate_param() {
        let address = PageAddress::parse("https://move.example.com/scan?plate=test01&src=qr").unwrap();
        assert_eq!(address.identifier().as_deref(), Some("TEST01"));
    }

    #[test]
    fn test_id_param_wins_over_plate() {
        let address = PageAddress::parse("https://move.example.com/?plate=B777X8&id=A123B4").unwrap();
        assert_eq!(address.identifier().as_deref(), Some("A123B4"));
    }

    #[test]
    fn test_blank_param_falls_through_to_path() {
        let address = page().scanned("https://move.example.com/C888D9?id=").unwrap();
        assert_eq!(address.identifier().as_deref(), Some("C888D9"));
    }

    #[test]
    fn test_identifier_from_segment_past_page_path() {
        assert_eq!(
            page().scanned("https://move.example.com/v/a696g1/").unwrap().identifier().as_deref(),
            Some("A696G1")
        );

        let nested = PageAddress::parse("https://user.github.io/scanmove/").unwrap();
        let scanned = nested.scanned("https://user.github.io/scanmove/TEST01").unwrap();
        assert_eq!(scanned.identifier().as_deref(), Some("TEST01"));
    }

    #[test]
    fn test_page_path_is_not_an_identifier() {
        let nested = PageAddress::parse("https://user.github.io/scanmove/").unwrap();
        assert_eq!(nested.identifier(), None);
        assert_eq!(nested.scanned("https://user.github.io/scanmove").unwrap().identifier(), None);
        // A page elsewhere is its own page
        assert_eq!(page().scanned("https://other.example.org/A1B2").unwrap().identifier(), None);
    }

    #[test]
    fn test_no_identifier() {
        assert_eq!(page().identifier(), None);
        assert_eq!(PageAddress::parse("https://move.example.com").unwrap().identifier(), None);
        assert_eq!(page().scanned("https://move.example.com/index.html").unwrap().identifier(), None);
    }

    #[test]
    fn test_rejects_addresses_without_scheme_or_path() {
        assert!(matches!(PageAddress::parse("localhost"), Err(AddressError::Invalid { .. })));
        assert!(PageAddress::parse("").is_err());
        assert!(page().scanned("/TEST01").is_err());
        assert!(matches!(PageAddress::parse("mailto:owner@example.com"), Err(AddressError::NoPath(_))));
    }

    #[test]
    fn test_percent_decoding() {
        let address = PageAddress::parse("https://move.example.com/?id=%20a1%2Bb%20&note=hello+world").unwrap();
        assert_eq!(address.param("note").as_deref(), Some("hello world"));
        assert_eq!(address.identifier().as_deref(), Some("A1+B"));
    }

    #[test]
    fn test_with_identifier_replaces_and_keeps_other_params() {
        let address = PageAddress::parse("https://move.example.com/?src=qr&plate=OLD1#top").unwrap();
        let updated = address.with_identifier("A123B4");

        assert_eq!(updated.to_string(), "https://move.example.com/?src=qr&id=A123B4#top");
        assert_eq!(updated.identifier().as_deref(), Some("A123B4"));
    }

    #[test]
    fn test_with_identifier_keeps_root_slash() {
        let address = PageAddress::parse("https://move.example.com").unwrap();
        assert_eq!(address.with_identifier("A1").to_string(), "https://move.example.com/?id=A1");
        assert_eq!(page().with_identifier("TEST01").as_str(), "https://move.example.com/?id=TEST01");
    }

    #[test]
    fn test_with_identifier_drops_identifier_segment() {
        let nested = PageAddress::parse("https://user.github.io/scanmove/").unwrap();
        let scanned = nested.scanned("https://user.github.io/scanmove/A696G1?src=qr").unwrap();

        assert_eq!(
            scanned.with_identifier("B777X8").to_string(),
            "https://user.github.io/scanmove/?src=qr&id=B777X8"
        );
    }

    #[test]
    fn test_with_identifier_encodes_value() {
        assert_eq!(page().with_identifier("A&B 1").to_string(), "https://move.example.com/?id=A%26B+1");
    }
}
