//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated backend base URL.
///
/// The URL must be absolute, use `http` or `https`, and have a host. A
/// trailing slash is dropped so endpoint paths can be appended directly.
///
/// # Example
///
/// ```
/// use tripkit_core::ApiUrl;
///
/// let api = ApiUrl::new("http://43.200.219.71:10375/").unwrap();
/// assert_eq!(api.endpoint("/ping"), "http://43.200.219.71:10375/ping");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path such as `/platform/session`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| {
            Error::from(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            })
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("must use http or https"));
        }
        if url.host_str().is_none() {
            return Err(invalid("must have a host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment"));
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_str().trim_end_matches('/'))
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_http_url_with_port() {
        let api = ApiUrl::new("http://43.200.219.71:10375").unwrap();
        assert_eq!(api.host(), Some("43.200.219.71"));
        assert_eq!(api.to_string(), "http://43.200.219.71:10375");
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = ApiUrl::new("https://api.example.com/").unwrap();
        assert_eq!(
            api.endpoint("/platform/locate/pin"),
            "https://api.example.com/platform/locate/pin"
        );
        assert_eq!(api.endpoint("ping"), "https://api.example.com/ping");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let api = ApiUrl::new("https://example.com/travel/").unwrap();
        assert_eq!(api.endpoint("/ping"), "https://example.com/travel/ping");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(ApiUrl::new("ftp://example.com").is_err());
        assert!(ApiUrl::new("file:///tmp/api").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(ApiUrl::new("/platform/session").is_err());
    }

    #[test]
    fn rejects_query() {
        assert!(ApiUrl::new("https://example.com/?debug=1").is_err());
    }
}
