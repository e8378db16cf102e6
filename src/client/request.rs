//! Request descriptors and raw responses.

use std::fmt;

use serde_json::Value;

use crate::models::Endpoints;

/// HTTP method of a resource request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST with a JSON body
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Which API a suffix is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiBase {
    /// `{host}/trader/v1`: accounts, orders, user preferences
    Trader,
    /// `{host}/marketdata/v1`: quotes, instruments, movers, chains,
    /// price history, market hours
    MarketData,
}

impl ApiBase {
    pub(crate) fn url(&self, endpoints: &Endpoints) -> String {
        match self {
            ApiBase::Trader => endpoints.trader_base(),
            ApiBase::MarketData => endpoints.market_data_base(),
        }
    }
}

/// Query parameters with unique keys.
///
/// Inserting a key that is already present overwrites its value in place.
/// List values are comma-joined, which is how the provider documents
/// `symbols`, `fields` and `markets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Set a parameter when a value is present.
    pub fn insert_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Set a comma-joined list parameter; an empty list sets nothing.
    pub fn insert_list<S: AsRef<str>>(&mut self, key: impl Into<String>, values: &[S]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| v.as_ref())
                .collect::<Vec<_>>()
                .join(",");
            self.insert(key, joined);
        }
        self
    }

    /// Value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `application/x-www-form-urlencoded` form of the parameters.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// A resource request, built fresh for each call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// API the suffix is relative to
    pub base: ApiBase,
    /// Path appended to the base, starting with `/`
    pub suffix: String,
    /// Query parameters
    pub query: QueryParams,
    /// JSON body, sent with POST
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// A GET request with no parameters.
    pub fn get(base: ApiBase, suffix: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            base,
            suffix: suffix.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// A POST request carrying a JSON body.
    pub fn post(base: ApiBase, suffix: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            base,
            suffix: suffix.into(),
            query: QueryParams::new(),
            body: Some(body),
        }
    }

    /// Replace the query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Full URL: base, suffix, then `?` and the encoded query if any.
    pub fn url(&self, endpoints: &Endpoints) -> String {
        let mut url = format!("{}{}", self.base.url(endpoints), self.suffix);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query.encode());
        }
        url
    }
}

/// A successful response before any domain decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status
    pub status: u16,
    /// Decoded JSON body; `null` when the body was empty
    pub body: Value,
    /// `Location` header, if the provider sent one
    pub location: Option<String>,
}

/// Percent-encode a value used as a single path segment.
pub(crate) fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
