// src/github/client.rs
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use regex::Regex;
use reqwest::header;
use serde::de::DeserializeOwned;

use crate::github::error::RequestError;
use crate::github::types::{OrgMember, RawContributor, UserProfile};

/// Records requested per page on paginated endpoints.
pub const PER_PAGE: u32 = 100;

/// Hard bound on `rel="next"` follows per call; see `RequestError::PageLimit`.
pub const MAX_PAGES: usize = 100;

/// The three upstream reads the refresh pipeline needs. Seam for tests:
/// the pipeline only ever sees `dyn ContributorApi`.
#[async_trait]
pub trait ContributorApi: Send + Sync {
    /// All contributors of `repo` ("owner/name"), every page concatenated.
    async fn repo_contributors(&self, repo: &str) -> Result<Vec<RawContributor>, RequestError>;

    /// Full membership of `org`, every page concatenated.
    async fn org_members(&self, org: &str) -> Result<Vec<OrgMember>, RequestError>;

    /// Profile detail for one user.
    async fn user(&self, login: &str) -> Result<UserProfile, RequestError>;
}

/// Authenticated GitHub REST client. The base URL is configurable so
/// tests can point it at a local fixture server.
pub struct GithubClient {
    http: reqwest::Client,
    base: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base("https://api.github.com", token)
    }

    pub fn with_base(base: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base,
            token: token.into(),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RequestError> {
        let resp = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::USER_AGENT, "contributor-board")
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| RequestError::transport(url, e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(RequestError::RateLimited {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }

    /// GET `path` and follow the `Link` header's `rel="next"` URL until
    /// absent, concatenating parsed records in request order. A failure
    /// on any page fails the whole call; nothing partial is returned.
    async fn get_paged<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, RequestError> {
        let mut url = format!("{}{}?per_page={}", self.base, path, PER_PAGE);
        let mut out: Vec<T> = Vec::new();

        for _ in 0..MAX_PAGES {
            let resp = self.get(&url).await?;
            let next = resp
                .headers()
                .get(header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_next_link);

            let body = resp
                .text()
                .await
                .map_err(|e| RequestError::transport(&url, e))?;

            // Schema drift on a 2xx page counts as zero records for
            // that page, not a hard failure.
            match serde_json::from_str::<Vec<T>>(&body) {
                Ok(mut page) => out.append(&mut page),
                Err(e) => {
                    tracing::warn!(error = %e, url = %url, "unexpected page schema; treating page as empty");
                }
            }

            match next {
                Some(n) => url = n,
                None => return Ok(out),
            }
        }

        Err(RequestError::PageLimit {
            url,
            max: MAX_PAGES,
        })
    }
}

#[async_trait]
impl ContributorApi for GithubClient {
    async fn repo_contributors(&self, repo: &str) -> Result<Vec<RawContributor>, RequestError> {
        self.get_paged(&format!("/repos/{repo}/contributors")).await
    }

    async fn org_members(&self, org: &str) -> Result<Vec<OrgMember>, RequestError> {
        self.get_paged(&format!("/orgs/{org}/members")).await
    }

    async fn user(&self, login: &str) -> Result<UserProfile, RequestError> {
        let url = format!("{}/users/{}", self.base, login);
        let resp = self.get(&url).await?;
        resp.json().await.map_err(|e| RequestError::transport(&url, e))
    }
}

/// Extract the `rel="next"` target from a `Link` header value, e.g.
/// `<https://api.github.com/...&page=2>; rel="next", <...>; rel="last"`.
pub fn parse_next_link(value: &str) -> Option<String> {
    static RE: OnceCell<Regex> = OnceCell::new();
    let re = RE.get_or_init(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).unwrap());
    re.captures(value).map(|c| c[1].to_string())
}
