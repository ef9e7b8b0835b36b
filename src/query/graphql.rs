// GraphQL client for the public character API
//
// Sends one POST per page: {"query": ..., "variables": {"page": N, "filter": {...}}}
// and maps the `characters { info { next } results { ... } }` shape onto a Page.

use super::{PageQuery, QueryError, QueryService};
use crate::model::{Character, Page};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Default public endpoint
pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

const CHARACTERS_QUERY: &str = r#"
query Characters($page: Int, $filter: FilterCharacter) {
  characters(page: $page, filter: $filter) {
    info {
      next
    }
    results {
      id
      name
      status
      species
      gender
      origin {
        name
      }
    }
  }
}
"#;

/// Maximum number of response-body bytes echoed into error messages
const MAX_ERROR_BODY: usize = 200;

pub struct GraphqlService {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphqlService {
    /// Create a client for the given endpoint
    ///
    /// The whole request is bounded by the fetch executor; the client only
    /// limits connection setup so a dead host cannot hang the socket.
    pub fn new(endpoint: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeout_secs.max(1)))
            .user_agent(concat!("mortydex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        tracing::debug!("GraphQL service initialized: {}", endpoint);

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

/// Build the `variables` object for a page query
pub(crate) fn build_variables(query: &PageQuery) -> Value {
    let mut filter = Map::new();
    if let Some(status) = query.filters.status {
        filter.insert("status".to_string(), json!(status.as_api_str()));
    }
    if let Some(species) = &query.filters.species {
        filter.insert("species".to_string(), json!(species));
    }

    json!({
        "page": query.page,
        "filter": Value::Object(filter),
    })
}

/// Messages from a GraphQL `errors` array, if any
fn error_messages(response: &Value) -> Vec<&str> {
    response
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

/// Convert a response body into a page
///
/// Only a body that is not JSON at all, or one carrying errors and no data,
/// is an error. A `characters` payload of the wrong shape ends pagination
/// with an empty page (`has_next = false`); the API reports "no matches"
/// with a null payload. Records that fail to decode are skipped so one bad
/// entry does not discard the rest of the page.
pub(crate) fn parse_page(body: &str) -> Result<Page, QueryError> {
    let response: Value =
        serde_json::from_str(body).map_err(|e| QueryError::Decode(e.to_string()))?;
    let errors = error_messages(&response);

    let data = match response.get("data") {
        Some(data) if !data.is_null() => data,
        _ if errors.is_empty() => {
            return Err(QueryError::Decode("response has no data".to_string()))
        }
        _ => return Err(QueryError::Api(errors.join("; "))),
    };

    if !errors.is_empty() {
        tracing::warn!(
            "GraphQL returned {} error(s) alongside data: {}",
            errors.len(),
            errors[0]
        );
    }

    let Some(characters) = data.get("characters").filter(|c| c.is_object()) else {
        tracing::warn!("Response without characters payload, treating as last page");
        return Ok(Page::default());
    };

    let Some(records) = characters.get("results").and_then(Value::as_array) else {
        tracing::warn!("Response without a results list, treating as last page");
        return Ok(Page::default());
    };

    let has_next = match characters.get("info").and_then(|info| info.get("next")) {
        None | Some(Value::Null) => false,
        Some(next) if next.is_u64() => true,
        Some(next) => {
            tracing::warn!("Unexpected info.next {}, treating as last page", next);
            false
        }
    };

    let mut results = Vec::with_capacity(records.len());
    for record in records {
        match Character::deserialize(record) {
            Ok(character) => results.push(character),
            Err(e) => tracing::warn!("Skipping malformed character record: {}", e),
        }
    }

    Ok(Page { results, has_next })
}

#[async_trait]
impl QueryService for GraphqlService {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, QueryError> {
        let payload = json!({
            "query": CHARACTERS_QUERY,
            "variables": build_variables(query),
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    QueryError::Network(format!("connection failed: {}", e))
                } else {
                    QueryError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        if !status.is_success() {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while end > 0 && !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(QueryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        parse_page(&body)
    }

    fn name(&self) -> &str {
        "graphql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{fetcher, PageRequest};
    use crate::model::{FilterState, Status};
    use crate::query::SharedQueryService;
    use std::sync::Arc;

    #[test]
    fn test_variables_include_only_active_filters() {
        let query = PageQuery {
            filters: FilterState::new(Some(Status::Unknown), None),
            page: 3,
        };
        let vars = build_variables(&query);
        assert_eq!(vars["page"], 3);
        assert_eq!(vars["filter"]["status"], "unknown");
        assert!(vars["filter"].get("species").is_none());

        let query = PageQuery {
            filters: FilterState::default(),
            page: 1,
        };
        assert_eq!(build_variables(&query)["filter"], json!({}));
    }

    #[test]
    fn test_parse_full_page() {
        let body = r#"{"data":{"characters":{"info":{"next":2},"results":[
            {"id":"1","name":"Rick Sanchez","status":"Alive","species":"Human",
             "gender":"Male","origin":{"name":"Earth (C-137)"}}
        ]}}}"#;
        let page = parse_page(body).unwrap();
        assert!(page.has_next);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].origin.name, "Earth (C-137)");
    }

    #[test]
    fn test_parse_last_page_has_no_next() {
        let body = r#"{"data":{"characters":{"info":{"next":null},"results":[]}}}"#;
        let page = parse_page(body).unwrap();
        assert!(!page.has_next);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_parse_null_characters_is_empty_last_page() {
        let body = r#"{"errors":[{"message":"404: Not Found"}],"data":{"characters":null}}"#;
        let page = parse_page(body).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_parse_wrong_shapes_end_pagination() {
        let bodies = [
            r#"{"data":{"characters":{"info":{"next":2},"results":{}}}}"#,
            r#"{"data":{"characters":"nope"}}"#,
            r#"{"data":{"characters":{"info":{"next":2},"results":null}}}"#,
        ];
        for body in bodies {
            assert_eq!(parse_page(body).unwrap(), Page::default(), "{}", body);
        }
    }

    #[test]
    fn test_parse_unexpected_next_is_last_page() {
        let body = r#"{"data":{"characters":{"info":{"next":"x"},"results":[
            {"id":"1","name":"Rick Sanchez"}
        ]}}}"#;
        let page = parse_page(body).unwrap();
        assert!(!page.has_next);
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_parse_skips_malformed_records() {
        let body = r#"{"data":{"characters":{"info":{"next":3},"results":[
            {"id":"1","name":null},
            {"id":"2","name":"Morty Smith","status":"Alive"},
            42
        ]}}}"#;
        let page = parse_page(body).unwrap();
        assert!(page.has_next);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].name, "Morty Smith");
    }

    #[test]
    fn test_parse_missing_info_is_last_page() {
        let body = r#"{"data":{"characters":{"results":[{"id":"9","name":"Ants in my Eyes Johnson"}]}}}"#;
        let page = parse_page(body).unwrap();
        assert!(!page.has_next);
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_parse_errors_without_data() {
        let body = r#"{"errors":[{"message":"Variable \"$page\" got invalid value"}]}"#;
        match parse_page(body) {
            Err(QueryError::Api(msg)) => assert!(msg.contains("invalid value")),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_page("<html>"), Err(QueryError::Decode(_))));
    }

    #[tokio::test]
    async fn test_silent_server_reports_timeout() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let service: SharedQueryService =
            Arc::new(GraphqlService::new(&format!("http://{}/graphql", addr), 1).unwrap());
        let request = PageRequest {
            generation: 1,
            page: 1,
            filters: FilterState::default(),
        };
        let result = fetcher::fetch(&service, &request, Duration::from_millis(1500)).await;
        assert!(
            matches!(result, Err(QueryError::Timeout { .. })),
            "unexpected result: {:?}",
            result
        );
    }
}
