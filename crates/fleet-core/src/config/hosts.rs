//! Host list files: one host per line, `#` comments and blank lines ignored.

use std::path::Path;

use anyhow::{Context, Result};

use super::schema::validate_host;

pub fn parse_host_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading host file: {}", path.display()))?;
    parse_host_list(&contents).with_context(|| format!("parsing host file: {}", path.display()))
}

pub fn parse_host_list(contents: &str) -> Result<Vec<String>> {
    let mut hosts: Vec<String> = Vec::new();
    for line in contents.lines() {
        let trimmed = line.split('#').next().unwrap_or_default().trim();
        if trimmed.is_empty() {
            continue;
        }
        validate_host(trimmed)?;
        if !hosts.iter().any(|h| h == trimmed) {
            hosts.push(trimmed.to_string());
        }
    }
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_list() {
        let hosts = parse_host_list(
            "# masters\nm1\n\n  m2  # standby\nm1\n   \n",
        )
        .unwrap();
        assert_eq!(hosts, vec!["m1", "m2"]);
    }

    #[test]
    fn test_rejects_embedded_whitespace() {
        assert!(parse_host_list("host one\n").is_err());
    }

    #[test]
    fn test_parse_missing_file() {
        assert!(parse_host_file(Path::new("/nonexistent/workers")).is_err());
    }
}
