//! # Elasticsearch Gateway
//!
//! Maps gazette queries onto an Elasticsearch index. The HTTP exchange sits
//! behind [`SearchBackend`] so the query building and document mapping can
//! be exercised without a cluster.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::config::{ConfigError, ConfigResult};
use crate::gazettes::{
    GatewayError, GatewayResult, GazetteDataGateway, GazetteRecord, GazetteRecords,
};

/// Port assumed when the host carries neither scheme nor port
pub const DEFAULT_ELASTICSEARCH_PORT: u16 = 9200;

/// Timeout applied to every request made by [`HttpSearchBackend`]
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimal search API the gateway needs
pub trait SearchBackend: Send + Sync {
    /// Whether `index` exists
    fn index_exists(&self, index: &str) -> GatewayResult<bool>;

    /// Run a search request and return the raw response
    fn search(&self, index: &str, body: &Value) -> GatewayResult<Value>;
}

/// Blocking HTTP client for an Elasticsearch node.
///
/// Must not be used from inside an async task; the HTTP layer runs gateway
/// queries on blocking workers.
pub struct HttpSearchBackend {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSearchBackend {
    pub fn new(host: &str, timeout: Duration) -> ConfigResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::BackendUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url(host),
        })
    }
}

/// Resolve a configured host into a base URL.
///
/// A host without scheme gets `http://`, and a host without port gets the
/// default port. IPv6 literals are accepted bare (`::1`) or bracketed
/// (`[::1]`, `[::1]:9201`).
pub fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        return host.to_string();
    }

    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((_, port)) if port.starts_with(':') => format!("http://{}", host),
            _ => format!("http://{}:{}", host, DEFAULT_ELASTICSEARCH_PORT),
        };
    }

    match host.matches(':').count() {
        0 => format!("http://{}:{}", host, DEFAULT_ELASTICSEARCH_PORT),
        1 => format!("http://{}", host),
        _ => format!("http://[{}]:{}", host, DEFAULT_ELASTICSEARCH_PORT),
    }
}

impl SearchBackend for HttpSearchBackend {
    fn index_exists(&self, index: &str) -> GatewayResult<bool> {
        let response = self
            .client
            .head(format!("{}/{}", self.base_url, index))
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => Err(GatewayError::Backend(format!(
                "unexpected status {} checking index {}",
                status, index
            ))),
        }
    }

    fn search(&self, index: &str, body: &Value) -> GatewayResult<Value> {
        let response = self
            .client
            .post(format!("{}/{}/_search", self.base_url, index))
            .json(body)
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(GatewayError::Backend(format!("{}: {}", status, text)));
        }

        response
            .json::<Value>()
            .map_err(|e| GatewayError::MalformedDocument(e.to_string()))
    }
}

/// Build the search request body for one page of gazettes.
///
/// Results are sorted newest first. Keywords must all match the document
/// text. With no filter at all every document matches.
pub fn build_query(
    territory_id: Option<&str>,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    keywords: Option<&[String]>,
    page: usize,
    page_size: usize,
) -> Value {
    let mut must = Vec::new();

    if since.is_some() || until.is_some() {
        let mut range = Map::new();
        if let Some(since) = since {
            range.insert("gte".to_string(), json!(since.format(DATE_FORMAT).to_string()));
        }
        if let Some(until) = until {
            range.insert("lte".to_string(), json!(until.format(DATE_FORMAT).to_string()));
        }
        must.push(json!({ "range": { "date": range } }));
    }

    if let Some(territory_id) = territory_id {
        must.push(json!({ "term": { "territory_id": territory_id } }));
    }

    if let Some(keywords) = keywords.filter(|k| !k.is_empty()) {
        must.push(json!({
            "match": {
                "source_text": { "query": keywords.join(" "), "operator": "and" }
            }
        }));
    }

    let query = if must.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({ "bool": { "must": must } })
    };

    json!({
        "query": query,
        "from": page.saturating_mul(page_size),
        "size": page_size,
        "sort": [{ "date": { "order": "desc" } }],
    })
}

/// Gateway backed by an Elasticsearch index
pub struct ElasticSearchGateway<B: SearchBackend = HttpSearchBackend> {
    backend: B,
    index: String,
    url_prefix: Option<String>,
}

impl<B: SearchBackend> ElasticSearchGateway<B> {
    /// Create the gateway, failing if `index` does not exist
    pub fn new(backend: B, index: impl Into<String>) -> ConfigResult<Self> {
        let index = index.into();
        let exists = backend
            .index_exists(&index)
            .map_err(|e| ConfigError::BackendUnavailable(e.to_string()))?;
        if !exists {
            return Err(ConfigError::IndexNotFound(index));
        }

        Ok(Self {
            backend,
            index,
            url_prefix: None,
        })
    }

    /// Build file URLs as `{prefix}/{file_path}` when documents carry a path
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim().trim_end_matches('/');
        self.url_prefix = if prefix.is_empty() {
            None
        } else {
            Some(prefix.to_string())
        };
        self
    }

    fn search_hits(&self, body: &Value) -> GatewayResult<Vec<Value>> {
        let mut response = self.backend.search(&self.index, body)?;
        match response.pointer_mut("/hits/hits").map(Value::take) {
            Some(Value::Array(hits)) => Ok(hits),
            _ => Err(GatewayError::MalformedDocument(
                "search response without hits".to_string(),
            )),
        }
    }

    fn to_record(&self, hit: &Value) -> GatewayResult<GazetteRecord> {
        let source = hit
            .get("_source")
            .ok_or_else(|| GatewayError::MalformedDocument("hit without _source".to_string()))?;

        let text = |field: &str| source.get(field).and_then(Value::as_str);
        let required = |field: &str| {
            text(field).ok_or_else(|| {
                GatewayError::MalformedDocument(format!("missing field {}", field))
            })
        };

        let raw_date = required("date")?;
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
            GatewayError::MalformedDocument(format!("invalid date {}", raw_date))
        })?;

        let url = match (&self.url_prefix, text("file_path")) {
            (Some(prefix), Some(path)) => format!("{}/{}", prefix, path.trim_start_matches('/')),
            _ => required("url")?.to_string(),
        };

        let mut record = GazetteRecord::new(required("territory_id")?, date, url)?;
        if let Some(name) = text("territory_name") {
            record = record.with_territory_name(name);
        }
        if let Some(code) = text("state_code") {
            record = record.with_state_code(code);
        }
        Ok(record)
    }
}

/// Lazily fetched page of search hits
enum PageState {
    Pending(Value),
    Ready(VecDeque<Value>),
    Done,
}

struct SearchPage<'a, B: SearchBackend> {
    gateway: &'a ElasticSearchGateway<B>,
    state: PageState,
}

impl<B: SearchBackend> Iterator for SearchPage<'_, B> {
    type Item = GatewayResult<GazetteRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, PageState::Done) {
                PageState::Pending(body) => match self.gateway.search_hits(&body) {
                    Ok(hits) => self.state = PageState::Ready(hits.into()),
                    Err(e) => return Some(Err(e)),
                },
                PageState::Ready(mut hits) => {
                    let hit = hits.pop_front()?;
                    self.state = PageState::Ready(hits);
                    return Some(self.gateway.to_record(&hit));
                }
                PageState::Done => return None,
            }
        }
    }
}

impl<B: SearchBackend> GazetteDataGateway for ElasticSearchGateway<B> {
    fn get_gazettes(
        &self,
        territory_id: Option<&str>,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        keywords: Option<&[String]>,
        page: usize,
        page_size: usize,
    ) -> GazetteRecords<'_> {
        let body = build_query(territory_id, since, until, keywords, page, page_size);
        Box::new(SearchPage {
            gateway: self,
            state: PageState::Pending(body),
        })
    }
}

/// Create a gateway talking to `host` over HTTP.
///
/// Host and index are trimmed; either being blank is a configuration error.
pub fn create_elasticsearch_gateway(
    host: &str,
    index: &str,
) -> ConfigResult<ElasticSearchGateway<HttpSearchBackend>> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ConfigError::MissingHost);
    }
    let index = index.trim();
    if index.is_empty() {
        return Err(ConfigError::MissingIndex);
    }

    let backend = HttpSearchBackend::new(host, DEFAULT_REQUEST_TIMEOUT)?;
    ElasticSearchGateway::new(backend, index)
}
