//! Output assembly: preserved header plus a freshly written `rules:` block.
//!
//! The rules block is written as raw text rather than through a YAML
//! serializer so rule values are never re-quoted.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Section key of the provider definitions.
pub const PROVIDERS_KEY: &str = "rule-providers:";
/// Section key of the rule list.
pub const RULES_KEY: &str = "rules:";

const MERGE_MARKER: &str = "_merge";

/// Byte offset of the first line starting (after trimming) with a section key.
///
/// Returns `text.len()` when neither key is present.
pub fn header_end(text: &str) -> usize {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with(PROVIDERS_KEY) || trimmed.starts_with(RULES_KEY) {
            return offset;
        }
        offset += line.len();
    }
    text.len()
}

/// Everything before the provider/rules sections, byte-for-byte.
pub fn preserved_header(text: &str) -> &str {
    &text[..header_end(text)]
}

/// Render the output document.
pub fn render(header: &str, rules: &[String]) -> String {
    let mut out = String::with_capacity(header.len() + rules.len() * 48);
    out.push_str(header);
    out.push('\n');
    out.push_str(RULES_KEY);
    out.push('\n');
    for rule in rules {
        out.push_str("  - ");
        out.push_str(rule);
        out.push('\n');
    }
    out
}

/// Derive the output path: `name.yaml` becomes `name_merge.yaml`, anything
/// else gets `_merge` appended.
///
/// The result never equals `input`.
pub fn output_path(input: &Path) -> PathBuf {
    let is_yaml = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    match (is_yaml, input.file_stem(), input.extension()) {
        (true, Some(stem), Some(ext)) => {
            let mut name = OsString::from(stem);
            name.push(MERGE_MARKER);
            name.push(".");
            name.push(ext);
            input.with_file_name(name)
        }
        _ => {
            let mut name = input.as_os_str().to_os_string();
            name.push(MERGE_MARKER);
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_end() {
        let text = "port: 7890\nmode: rule\nrule-providers:\n  a:\n    url: x\nrules:\n  - MATCH,DIRECT\n";
        assert_eq!(preserved_header(text), "port: 7890\nmode: rule\n");

        let text = "port: 7890\nrules:\n  - MATCH,DIRECT\nrule-providers:\n  a: {}\n";
        assert_eq!(preserved_header(text), "port: 7890\n");
    }

    #[test]
    fn test_header_keeps_crlf_and_indented_key() {
        let text = "# top\r\nport: 7890\r\n  rules:\r\n";
        assert_eq!(preserved_header(text), "# top\r\nport: 7890\r\n");
    }

    #[test]
    fn test_header_without_sections() {
        let text = "port: 7890\nmode: rule";
        assert_eq!(header_end(text), text.len());
        assert_eq!(preserved_header(text), text);
    }

    #[test]
    fn test_header_at_start() {
        assert_eq!(preserved_header("rules:\n  - MATCH,DIRECT\n"), "");
    }

    #[test]
    fn test_render() {
        let rules = vec![
            "MATCH,DIRECT".to_string(),
            "IP-CIDR,1.2.3.0/24,Reject,no-resolve".to_string(),
        ];
        assert_eq!(
            render("port: 7890\n", &rules),
            "port: 7890\n\nrules:\n  - MATCH,DIRECT\n  - IP-CIDR,1.2.3.0/24,Reject,no-resolve\n"
        );
        assert_eq!(render("", &[]), "\nrules:\n");
    }

    #[test]
    fn test_render_does_not_quote() {
        let rules = vec!["DOMAIN,*.example.com: weird,Proxy".to_string()];
        assert!(render("", &rules).contains("  - DOMAIN,*.example.com: weird,Proxy\n"));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("clashstga.yaml")),
            PathBuf::from("clashstga_merge.yaml")
        );
        assert_eq!(
            output_path(Path::new("/etc/clash/config.yml")),
            PathBuf::from("/etc/clash/config_merge.yml")
        );
        assert_eq!(
            output_path(Path::new("dir.yaml/config.YAML")),
            PathBuf::from("dir.yaml/config_merge.YAML")
        );
        assert_eq!(output_path(Path::new("config")), PathBuf::from("config_merge"));
        assert_eq!(
            output_path(Path::new("config.txt")),
            PathBuf::from("config.txt_merge")
        );
    }

    #[test]
    fn test_output_path_differs() {
        for input in ["a.yaml", "a", ".yaml", "a.yaml.bak", "x/y.yml", "a_merge.yaml"] {
            assert_ne!(output_path(Path::new(input)), PathBuf::from(input));
        }
    }
}
