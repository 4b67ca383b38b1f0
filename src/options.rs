//! Optional query parameters for endpoint calls
//!
//! Endpoints accept a slice of [`RequestOption`]s. Each call turns them into a
//! fresh query map; which options a given endpoint honors is documented on
//! the endpoint itself.

use std::collections::HashMap;

/// A single optional query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// Maximum number of items to return
    Limit(u32),
    /// Index of the first item to return
    Offset(u32),
    /// ISO 3166-1 alpha-2 market code, or "from_token"
    Market(String),
    /// ISO 3166-1 alpha-2 country code
    Country(String),
    /// ISO 639-1 language code plus country, e.g. "es_MX"
    Locale(String),
    /// ISO 8601 timestamp used by browse endpoints
    Timestamp(String),
    /// Field filter for playlist endpoints
    Fields(String),
}

impl RequestOption {
    /// Query parameter name
    pub fn key(&self) -> &'static str {
        match self {
            Self::Limit(_) => "limit",
            Self::Offset(_) => "offset",
            Self::Market(_) => "market",
            Self::Country(_) => "country",
            Self::Locale(_) => "locale",
            Self::Timestamp(_) => "timestamp",
            Self::Fields(_) => "fields",
        }
    }

    /// Query parameter value
    pub fn value(&self) -> String {
        match self {
            Self::Limit(n) | Self::Offset(n) => n.to_string(),
            Self::Market(s)
            | Self::Country(s)
            | Self::Locale(s)
            | Self::Timestamp(s)
            | Self::Fields(s) => s.clone(),
        }
    }
}

/// Limit option
pub fn limit(n: u32) -> RequestOption {
    RequestOption::Limit(n)
}

/// Offset option
pub fn offset(n: u32) -> RequestOption {
    RequestOption::Offset(n)
}

/// Market option
pub fn market(code: impl Into<String>) -> RequestOption {
    RequestOption::Market(code.into())
}

/// Country option
pub fn country(code: impl Into<String>) -> RequestOption {
    RequestOption::Country(code.into())
}

/// Locale option
pub fn locale(code: impl Into<String>) -> RequestOption {
    RequestOption::Locale(code.into())
}

/// Timestamp option
pub fn timestamp(ts: impl Into<String>) -> RequestOption {
    RequestOption::Timestamp(ts.into())
}

/// Fields option
pub fn fields(filter: impl Into<String>) -> RequestOption {
    RequestOption::Fields(filter.into())
}

/// Build the query map for one call. Later options override earlier ones.
pub fn process_options(opts: &[RequestOption]) -> HashMap<String, String> {
    opts.iter()
        .map(|opt| (opt.key().to_string(), opt.value()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_process_options_maps_keys() {
        let params = process_options(&[
            limit(20),
            offset(40),
            market("SE"),
            country("US"),
            locale("es_MX"),
            timestamp("2014-10-23T09:00:00"),
            fields("items(track(name))"),
        ]);

        assert_eq!(params.len(), 7);
        assert_eq!(params["limit"], "20");
        assert_eq!(params["offset"], "40");
        assert_eq!(params["market"], "SE");
        assert_eq!(params["country"], "US");
        assert_eq!(params["locale"], "es_MX");
        assert_eq!(params["timestamp"], "2014-10-23T09:00:00");
        assert_eq!(params["fields"], "items(track(name))");
    }

    #[test]
    fn test_process_options_last_wins() {
        let params = process_options(&[limit(10), limit(50)]);
        assert_eq!(params.get("limit"), Some(&"50".to_string()));
    }

    #[test]
    fn test_process_options_empty() {
        assert!(process_options(&[]).is_empty());
    }
}
