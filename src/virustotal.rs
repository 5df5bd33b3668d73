use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{redirect, StatusCode};
use serde::Deserialize;

use crate::Error;

pub const DEFAULT_API_BASE: &str = "https://www.virustotal.com";

/// One page of the v3 subdomains collection.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<ApiObject>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Deserialize)]
struct ApiObject {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    next: Option<String>,
}

/// The v2 domain report, of which we only care about the subdomains field.
#[derive(Debug, Deserialize)]
struct DomainReport {
    subdomains: Option<Vec<String>>,
}

pub struct VirusTotal {
    client: Client,
    api_key: String,
    api_base: String,
}

impl VirusTotal {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(4))
            .timeout(timeout)
            .build()?;

        Ok(VirusTotal {
            client,
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Returns every subdomain the v3 API knows for `domain`, in arrival
    /// order, following `links.next` until the last page.
    ///
    /// Any transport error, non-200 status or undecodable body aborts the
    /// whole fetch; pages already retrieved are discarded.
    pub fn subdomains(&self, domain: &str) -> Result<Vec<String>, Error> {
        let mut subdomains = Vec::new();
        let mut url = format!("{}/api/v3/domains/{}/subdomains", self.api_base, domain);

        loop {
            let response = self
                .client
                .get(&url)
                .header("x-apikey", &self.api_key)
                .send()?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(Error::InvalidHttpResponse {
                    status,
                    body: response.text().unwrap_or_default(),
                });
            }

            let page: ApiResponse = response.json()?;
            subdomains.extend(page.data.into_iter().map(|object| object.id));

            // the next link already carries the cursor, so it is used as-is
            match page.links.next {
                Some(next) if !next.is_empty() => url = next,
                _ => break,
            }
        }

        Ok(subdomains)
    }

    /// Single request against the legacy v2 report endpoint. No pagination;
    /// a report without subdomains is a normal empty result.
    pub fn subdomains_legacy(&self, domain: &str) -> Result<Vec<String>, Error> {
        let url = format!("{}/vtapi/v2/domain/report", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("domain", domain)])
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::InvalidHttpResponse {
                status,
                body: response.text().unwrap_or_default(),
            });
        }

        let report: DomainReport = response.json()?;
        Ok(report.subdomains.unwrap_or_default())
    }
}
