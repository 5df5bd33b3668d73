use std::time::Duration;
use std::{env, fs};

use tracing::warn;

use crate::args::Args;
use crate::output::{self, Format, Report, ResultEntry};
use crate::virustotal::VirusTotal;
use crate::Error;

pub fn run(args: Args) -> Result<(), Error> {
    // flag conflicts are usage errors and must fire before any request
    let format = args.format()?;

    if !args.silent {
        print_banner();
    }

    let api_key = env::var("VT_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or(Error::MissingApiKey)?;
    let domains = resolve_domains(&args)?;

    let vt = VirusTotal::new(api_key, Duration::from_secs(args.timeout))?;

    if args.legacy {
        return run_legacy(&vt, &domains);
    }

    let mut results = Vec::new();
    for domain in &domains {
        let subdomains = match vt.subdomains(domain) {
            Ok(subdomains) => subdomains,
            Err(err) => {
                warn!("fetching subdomains for {}: {}", domain, err);
                continue;
            }
        };

        if format == Format::Plain {
            let lines = output::render_plain(domain, &subdomains, args.silent);
            if !lines.is_empty() {
                println!("{}", lines);
            }
        } else {
            results.push(ResultEntry {
                domain_name: domain.clone(),
                results: subdomains,
            });
        }
    }

    match format {
        Format::Plain => {}
        Format::Txt => {
            let lines = output::render_txt(&results);
            if !lines.is_empty() {
                println!("{}", lines);
            }
        }
        Format::Csv => {
            let lines = output::render_csv(&results);
            if !lines.is_empty() {
                println!("{}", lines);
            }
        }
        Format::Json => println!("{}", Report::new(results).to_json()?),
    }

    Ok(())
}

/// Legacy v2 mode: one request per domain, sorted bare lines, and an empty
/// report is a normal outcome rather than an error.
fn run_legacy(vt: &VirusTotal, domains: &[String]) -> Result<(), Error> {
    for domain in domains {
        match vt.subdomains_legacy(domain) {
            Ok(subdomains) => println!("{}", output::render_legacy(domain, subdomains)),
            Err(err) => warn!("fetching subdomains for {}: {}", domain, err),
        }
    }

    Ok(())
}

fn resolve_domains(args: &Args) -> Result<Vec<String>, Error> {
    // an empty --domain counts as absent, same as the original's flag check
    let domain = args
        .domain
        .as_deref()
        .map(str::trim)
        .filter(|domain| !domain.is_empty());
    if let Some(domain) = domain {
        return Ok(vec![domain.to_string()]);
    }

    if let Some(path) = &args.list {
        let contents = fs::read_to_string(path)?;
        let domains: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        return Ok(domains);
    }

    Err(Error::MissingTarget)
}

fn print_banner() {
    println!(
        r#"
        _
 __   _| |_ ___ _ __  _   _ _ __ ___
 \ \ / | __/ _ \ '_ \| | | | '_ ` _ \
  \ V /| ||  __/ | | | |_| | | | | | |
   \_/  \__\___|_| |_|\__,_|_| |_| |_|
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn no_domain_and_no_list_is_a_usage_error() {
        let args = Args::parse_from(["vtenum"]);
        assert!(matches!(
            resolve_domains(&args),
            Err(Error::MissingTarget)
        ));
    }

    #[test]
    fn empty_domain_flag_is_treated_as_absent() {
        let args = Args::parse_from(["vtenum", "--domain", ""]);
        assert!(matches!(
            resolve_domains(&args),
            Err(Error::MissingTarget)
        ));
    }

    #[test]
    fn empty_domain_flag_falls_through_to_list() {
        let path = std::env::temp_dir().join("vtenum-empty-domain-test.txt");
        fs::write(&path, "example.com\n").unwrap();

        let args = Args::parse_from(["vtenum", "--domain", "", "--list", path.to_str().unwrap()]);
        let domains = resolve_domains(&args).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(domains, vec!["example.com"]);
    }

    #[test]
    fn single_domain_flag_wins_over_list() {
        let args = Args::parse_from(["vtenum", "--domain", "example.com", "--list", "/nope"]);
        assert_eq!(resolve_domains(&args).unwrap(), vec!["example.com"]);
    }

    #[test]
    fn list_file_is_split_on_lines_and_blanks_dropped() {
        let path = std::env::temp_dir().join("vtenum-domains-test.txt");
        fs::write(&path, "example.com\n\n  kerkour.com  \n").unwrap();

        let args = Args::parse_from(["vtenum", "--list", path.to_str().unwrap()]);
        let domains = resolve_domains(&args).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(domains, vec!["example.com", "kerkour.com"]);
    }

    #[test]
    fn unreadable_list_file_is_fatal() {
        let args = Args::parse_from(["vtenum", "--list", "/definitely/not/a/file"]);
        assert!(matches!(resolve_domains(&args), Err(Error::Io(_))));
    }
}
