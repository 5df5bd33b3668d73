use serde::Serialize;

use crate::Error;

pub const TOOL_NAME: &str = "virustotal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    Txt,
    Csv,
    Json,
}

/// One queried domain and every subdomain found for it.
#[derive(Debug, Serialize)]
pub struct ResultEntry {
    pub domain_name: String,
    pub results: Vec<String>,
}

/// Envelope for `--json` output.
#[derive(Debug, Serialize)]
pub struct Report {
    pub tool_name: &'static str,
    pub result: Vec<ResultEntry>,
}

impl Report {
    pub fn new(result: Vec<ResultEntry>) -> Self {
        Report {
            tool_name: TOOL_NAME,
            result,
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Default output: one subdomain per line, prefixed with the queried domain
/// unless silent mode asked for bare lines.
pub fn render_plain(domain: &str, subdomains: &[String], silent: bool) -> String {
    subdomains
        .iter()
        .map(|subdomain| {
            if silent {
                subdomain.clone()
            } else {
                format!("[{}] {}", domain, subdomain)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_txt(entries: &[ResultEntry]) -> String {
    entries
        .iter()
        .flat_map(|entry| entry.results.iter().cloned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `domain,subdomain` per line. No header, no quoting.
pub fn render_csv(entries: &[ResultEntry]) -> String {
    entries
        .iter()
        .flat_map(|entry| {
            entry
                .results
                .iter()
                .map(move |subdomain| format!("{},{}", entry.domain_name, subdomain))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Legacy v2 output: sorted bare lines, or the explicit empty-result
/// message. The caller prints this and still exits 0 either way.
pub fn render_legacy(domain: &str, mut subdomains: Vec<String>) -> String {
    if subdomains.is_empty() {
        return format!("No domains found for {}", domain);
    }

    subdomains.sort();
    subdomains.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<ResultEntry> {
        vec![ResultEntry {
            domain_name: "example.com".to_string(),
            results: vec!["a.example.com".to_string(), "b.example.com".to_string()],
        }]
    }

    #[test]
    fn plain_prefixes_with_domain() {
        let subdomains = vec!["a.example.com".to_string()];
        assert_eq!(
            render_plain("example.com", &subdomains, false),
            "[example.com] a.example.com"
        );
    }

    #[test]
    fn plain_silent_prints_bare_lines() {
        let subdomains = vec!["a.example.com".to_string()];
        assert_eq!(
            render_plain("example.com", &subdomains, true),
            "a.example.com"
        );
    }

    #[test]
    fn txt_is_one_subdomain_per_line() {
        assert_eq!(render_txt(&entries()), "a.example.com\nb.example.com");
    }

    #[test]
    fn csv_pairs_domain_with_subdomain() {
        assert_eq!(
            render_csv(&entries()),
            "example.com,a.example.com\nexample.com,b.example.com"
        );
    }

    #[test]
    fn legacy_empty_result_reports_no_domains_found() {
        assert_eq!(
            render_legacy("example.com", Vec::new()),
            "No domains found for example.com"
        );
    }

    #[test]
    fn legacy_output_is_sorted() {
        let subdomains = vec!["b.example.com".to_string(), "a.example.com".to_string()];
        assert_eq!(
            render_legacy("example.com", subdomains),
            "a.example.com\nb.example.com"
        );
    }

    #[test]
    fn json_report_shape() {
        let report = Report::new(entries());
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["tool_name"], "virustotal");
        assert_eq!(value["result"][0]["domain_name"], "example.com");
        assert_eq!(
            value["result"][0]["results"],
            serde_json::json!(["a.example.com", "b.example.com"])
        );
    }
}
