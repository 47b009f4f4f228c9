//! Elasticsearch over its HTTP API.
//!
//! Requests are rendered with `serde_json::json!` and responses are read through small
//! `Deserialize` structs that only name the fields the locator consumes.

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    engine::{SearchEngine, SearchHit, TermVectors},
    error::EngineError,
    query::{CONTENT_FIELD, SpanClause, SpanSearch},
};

/// Connection settings for [`ElasticsearchEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticsearchOptions {
    /// Base URL, e.g. `http://localhost:9200`.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Basic-auth user name.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
}

impl Default for ElasticsearchOptions {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            timeout: Duration::from_secs(60),
            username: None,
            password: None,
        }
    }
}

/// A [`SearchEngine`] backed by an Elasticsearch cluster.
#[derive(Debug, Clone)]
pub struct ElasticsearchEngine {
    /// Shared HTTP client.
    client: Client,
    /// Connection settings.
    options: ElasticsearchOptions,
}

impl ElasticsearchEngine {
    /// Creates a client for the cluster described by `options`.
    pub fn new(options: ElasticsearchOptions) -> Result<Self, EngineError> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { client, options })
    }

    /// Builds the URL for `path` below the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.options.url.trim_end_matches('/'), path)
    }

    /// Attaches basic auth when a user name is configured.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.options.username {
            Some(user) => request.basic_auth(user, self.options.password.as_deref()),
            None => request,
        }
    }

    /// Sends a request and maps non-success statuses to [`EngineError::Status`].
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, EngineError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(EngineError::Status {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SearchEngine for ElasticsearchEngine {
    async fn index(&self, collection: &str, content: &str) -> Result<String, EngineError> {
        let url = self.url(&format!("{collection}/_doc?refresh=wait_for"));
        debug!(%url, "indexing scratch document");
        let body = json!({ CONTENT_FIELD: content });
        let response = self
            .send("index", self.client.post(url).json(&body))
            .await?;
        let written: WriteResponse = response.json().await?;
        Ok(written.id)
    }

    async fn search(
        &self,
        collection: &str,
        search: &SpanSearch,
    ) -> Result<Option<SearchHit>, EngineError> {
        let url = self.url(&format!("{collection}/_search"));
        let body = render(search);
        debug!(%url, request = %body, "span search");
        let response = self
            .send("search", self.client.post(url).json(&body))
            .await?;
        let value: Value = response.json().await?;
        read_search_response(value, &search.field)
    }

    async fn term_vectors(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<TermVectors, EngineError> {
        let url = self.url(&format!("{collection}/_termvectors/{document_id}"));
        debug!(%url, "fetching term vectors");
        let response = self.send("term vectors", self.client.get(url)).await?;
        let value: Value = response.json().await?;
        read_term_vectors(value, CONTENT_FIELD)
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), EngineError> {
        let url = self.url(&format!("{collection}/_doc/{document_id}"));
        debug!(%url, "deleting scratch document");
        self.send("delete", self.client.delete(url)).await?;
        Ok(())
    }
}

/// Response of a document write.
#[derive(Debug, Deserialize)]
struct WriteResponse {
    /// Identifier assigned to the document.
    #[serde(rename = "_id")]
    id: String,
}

/// Search response envelope.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Hit container.
    hits: Hits,
}

/// Hit container of a search response.
#[derive(Debug, Deserialize)]
struct Hits {
    /// Matching documents.
    #[serde(default)]
    hits: Vec<Hit>,
}

/// One search hit, restricted to the fields requested by [`render`].
#[derive(Debug, Deserialize)]
struct Hit {
    /// Score explanation tree.
    #[serde(rename = "_explanation")]
    explanation: Option<Explanation>,
    /// Highlighted fragments per field.
    #[serde(default)]
    highlight: BTreeMap<String, Vec<String>>,
}

/// A node of the score explanation tree.
#[derive(Debug, Deserialize)]
struct Explanation {
    /// Child explanations.
    #[serde(default)]
    details: Vec<ExplanationDetail>,
}

/// A child explanation; only its description is read.
#[derive(Debug, Deserialize)]
struct ExplanationDetail {
    /// Human-readable description, e.g. `weight(spanNear([...]) ...)`.
    description: String,
}

/// Term vectors envelope.
#[derive(Debug, Deserialize)]
struct TermVectorsResponse {
    /// Per-field term vectors; absent when the document has none.
    #[serde(default)]
    term_vectors: BTreeMap<String, FieldVectors>,
}

/// Term vectors of one field.
#[derive(Debug, Deserialize)]
struct FieldVectors {
    /// Terms of the field.
    #[serde(default)]
    terms: BTreeMap<String, TermEntry>,
}

/// One term of a field's term vectors.
#[derive(Debug, Deserialize)]
struct TermEntry {
    /// Token occurrences; present when offsets are stored.
    #[serde(default)]
    tokens: Vec<TokenEntry>,
}

/// One token occurrence.
#[derive(Debug, Deserialize)]
struct TokenEntry {
    /// Start offset in UTF-16 code units.
    start_offset: Option<usize>,
}

/// Renders a span search into the Elasticsearch query DSL.
pub(crate) fn render(search: &SpanSearch) -> Value {
    let field = search.field.as_str();
    let clauses: Vec<Value> = search
        .clauses
        .iter()
        .map(|clause| match clause {
            SpanClause::Term(value) => json!({ "span_term": { field: value } }),
            SpanClause::Fuzzy(fuzzy) => json!({
                "span_multi": {
                    "match": {
                        "fuzzy": {
                            field: {
                                "value": fuzzy.value,
                                "fuzziness": fuzzy.fuzziness.to_string(),
                                "prefix_length": fuzzy.prefix_length,
                                "max_expansions": fuzzy.max_expansions,
                                "transpositions": fuzzy.transpositions,
                            }
                        }
                    }
                }
            }),
        })
        .collect();

    json!({
        "query": {
            "bool": {
                "filter": { "ids": { "values": [search.document_id] } },
                "must": {
                    "span_near": {
                        "clauses": clauses,
                        "slop": search.slop,
                        "in_order": true,
                    }
                }
            }
        },
        "explain": true,
        "_source": false,
        "highlight": {
            "fields": {
                field: {
                    "type": "plain",
                    "fragment_size": search.highlight.fragment_size,
                    "pre_tags": [search.highlight.pre_tag],
                    "post_tags": [search.highlight.post_tag],
                }
            }
        }
    })
}

/// Reads the top hit of a search response.
///
/// The explanation is the first child of the hit's explanation tree (the span clause
/// weight); the highlight is the last fragment of `field`.
fn read_search_response(value: Value, field: &str) -> Result<Option<SearchHit>, EngineError> {
    let response: SearchResponse = serde_json::from_value(value)
        .map_err(|e| EngineError::response("search", e.to_string()))?;
    let Some(mut hit) = response.hits.hits.into_iter().last() else {
        return Ok(None);
    };

    let explanation = hit
        .explanation
        .and_then(|explanation| explanation.details.into_iter().next())
        .map(|detail| detail.description)
        .ok_or_else(|| EngineError::response("search", "hit has no explanation details"))?;

    let highlighted = hit
        .highlight
        .remove(field)
        .and_then(|mut fragments| fragments.pop())
        .ok_or_else(|| {
            EngineError::response("search", format!("hit has no highlight for '{field}'"))
        })?;

    Ok(Some(SearchHit {
        explanation,
        highlighted,
    }))
}

/// Reads the term vectors of `field` from a term vectors response.
fn read_term_vectors(value: Value, field: &str) -> Result<TermVectors, EngineError> {
    let mut response: TermVectorsResponse = serde_json::from_value(value)
        .map_err(|e| EngineError::response("term vectors", e.to_string()))?;
    let Some(field_vectors) = response.term_vectors.remove(field) else {
        return Ok(TermVectors::default());
    };

    let terms = field_vectors
        .terms
        .into_iter()
        .map(|(term, entry)| {
            let offsets = entry
                .tokens
                .into_iter()
                .filter_map(|token| token.start_offset)
                .collect();
            (term, offsets)
        })
        .collect();
    Ok(TermVectors { terms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Fuzziness, FuzzyTerm};

    fn fuzzy(value: &str) -> SpanClause {
        SpanClause::Fuzzy(FuzzyTerm {
            value: value.to_string(),
            fuzziness: Fuzziness::Auto,
            prefix_length: 0,
            max_expansions: 100,
            transpositions: true,
        })
    }

    #[test]
    fn renders_span_near_query() {
        let search = SpanSearch::new("doc-1", vec![SpanClause::term("to"), fuzzy("meet")], 2);
        let body = render(&search);

        assert_eq!(body["query"]["bool"]["filter"]["ids"]["values"][0], "doc-1");
        let span_near = &body["query"]["bool"]["must"]["span_near"];
        assert_eq!(span_near["slop"], 2);
        assert_eq!(span_near["in_order"], true);
        assert_eq!(span_near["clauses"][0]["span_term"]["content"], "to");

        let fuzzy = &span_near["clauses"][1]["span_multi"]["match"]["fuzzy"]["content"];
        assert_eq!(fuzzy["value"], "meet");
        assert_eq!(fuzzy["fuzziness"], "AUTO");
        assert_eq!(fuzzy["prefix_length"], 0);
        assert_eq!(fuzzy["max_expansions"], 100);
        assert_eq!(fuzzy["transpositions"], true);

        assert_eq!(body["explain"], true);
        assert_eq!(body["_source"], false);
        let highlight = &body["highlight"]["fields"]["content"];
        assert_eq!(highlight["type"], "plain");
        assert_eq!(highlight["fragment_size"], 10_000_000);
        assert_eq!(highlight["pre_tags"][0], "<em>");
        assert_eq!(highlight["post_tags"][0], "</em>");
    }

    #[test]
    fn reads_top_hit() {
        let response = json!({
            "hits": {
                "total": { "value": 1 },
                "hits": [{
                    "_id": "doc-1",
                    "_explanation": {
                        "value": 1.2,
                        "description": "sum of:",
                        "details": [
                            { "value": 1.2, "description": "weight(spanNear([content:to, content:meet], 2, true) in 0) [PerFieldSimilarity], result of:" },
                            { "value": 0.0, "description": "match on required clause" }
                        ]
                    },
                    "highlight": { "content": ["nice <em>to</em> <em>meet</em> you"] }
                }]
            }
        });

        let hit = read_search_response(response, "content").unwrap().unwrap();
        assert!(hit.explanation.starts_with("weight(spanNear([content:to"));
        assert_eq!(hit.highlighted, "nice <em>to</em> <em>meet</em> you");
    }

    #[test]
    fn no_hits_is_none() {
        let response = json!({ "hits": { "hits": [] } });
        assert_eq!(read_search_response(response, "content").unwrap(), None);
    }

    #[test]
    fn hit_without_highlight_is_error() {
        let response = json!({
            "hits": { "hits": [{
                "_explanation": { "details": [{ "description": "weight(content:to in 0)" }] }
            }]}
        });
        let err = read_search_response(response, "content").unwrap_err();
        assert!(err.to_string().contains("no highlight"));
    }

    #[test]
    fn reads_term_vector_offsets() {
        let response = json!({
            "_id": "doc-1",
            "found": true,
            "term_vectors": {
                "content": {
                    "terms": {
                        "beautiful": { "term_freq": 1, "tokens": [{ "position": 2, "start_offset": 10, "end_offset": 14 }] },
                        "cute": { "term_freq": 1, "tokens": [{ "position": 2, "start_offset": 10, "end_offset": 14 }] }
                    }
                }
            }
        });
        let vectors = read_term_vectors(response, "content").unwrap();
        assert_eq!(vectors.terms["beautiful"], vec![10]);
        assert_eq!(vectors.terms["cute"], vec![10]);
    }

    #[test]
    fn missing_term_vectors_are_empty() {
        let response = json!({ "_id": "doc-1", "found": true });
        assert!(read_term_vectors(response, "content").unwrap().terms.is_empty());
    }

    #[test]
    fn url_joins_without_double_slash() {
        let engine = ElasticsearchEngine::new(ElasticsearchOptions {
            url: "http://localhost:9200/".to_string(),
            ..ElasticsearchOptions::default()
        })
        .unwrap();
        assert_eq!(
            engine.url("text-search/_search"),
            "http://localhost:9200/text-search/_search"
        );
    }
}
