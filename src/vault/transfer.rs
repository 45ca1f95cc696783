//! Bulk import and export transforms.
//!
//! Imports turn one input line into one credential tagged with the import marker note.
//! Exports are pure projections returning deduplicated, lexicographically sorted strings.

use crate::core::credential::{Credential, CredentialFields, IMPORT_MARKER};
use crate::core::defaults::Defaults;
use crate::core::set::CredentialSet;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::BTreeSet;

fn strip_newline(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Split `domain/rest` on the first slash when requested.
fn split_domain(line: &str, domain_split: bool) -> (Option<String>, &str) {
    if domain_split {
        if let Some((domain, rest)) = line.split_once('/') {
            return (Some(domain.to_string()), rest);
        }
    }
    (None, line)
}

fn imported(fields: CredentialFields) -> Credential {
    Credential::new(
        CredentialFields {
            note: Some(IMPORT_MARKER.to_string()),
            ..fields
        },
        0,
        None,
    )
}

pub fn import_usernames<'a, I>(lines: I, domain_split: bool) -> CredentialSet
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| {
            let (domain, username) = split_domain(strip_newline(line), domain_split);
            imported(CredentialFields {
                username: Some(username.to_string()),
                domain,
                ..Default::default()
            })
        })
        .collect()
}

pub fn import_passwords<'a, I>(lines: I) -> CredentialSet
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| {
            imported(CredentialFields {
                password: Some(strip_newline(line).to_string()),
                ..Default::default()
            })
        })
        .collect()
}

/// Lines of `user<sep>password`, optionally prefixed with `domain/`. Without a separator the
/// whole line is the username.
pub fn import_userpass<'a, I>(lines: I, separator: &str, domain_split: bool) -> CredentialSet
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(|line| {
            let (domain, rest) = split_domain(strip_newline(line), domain_split);
            let (username, password) = match rest.split_once(separator) {
                Some((u, p)) if !separator.is_empty() => (u, Some(p.to_string())),
                _ => (rest, None),
            };
            imported(CredentialFields {
                username: Some(username.to_string()),
                password,
                domain,
                ..Default::default()
            })
        })
        .collect()
}

fn sorted_unique<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    items
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn export_usernames(set: &CredentialSet) -> Vec<String> {
    sorted_unique(set.iter().filter_map(|c| c.username.clone()))
}

pub fn export_passwords(set: &CredentialSet) -> Vec<String> {
    sorted_unique(set.iter().filter_map(|c| c.password_str().map(str::to_string)))
}

pub fn export_domains(set: &CredentialSet, defaults: &Defaults) -> Vec<String> {
    sorted_unique(
        set.iter()
            .filter_map(|c| c.domain.clone())
            .chain(defaults.domain.clone()),
    )
}

pub fn export_urls(set: &CredentialSet, defaults: &Defaults) -> Vec<String> {
    sorted_unique(
        set.iter()
            .filter_map(|c| c.url.clone())
            .chain(defaults.url.clone()),
    )
}

/// `domain/username` for each credential with a username; the default domain stands in for a
/// missing one, and without any domain the bare username is used.
pub fn export_user_domain(set: &CredentialSet, defaults: &Defaults) -> Vec<String> {
    sorted_unique(set.iter().filter_map(|c| {
        let username = c.username.as_deref()?;
        Some(match c.domain.as_deref().or(defaults.domain.as_deref()) {
            Some(domain) => format!("{domain}/{username}"),
            None => username.to_string(),
        })
    }))
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub separator: String,
    /// Combine every username with every password instead of only within a record.
    pub mix: bool,
    /// Prefix usernames with `domain/`.
    pub with_domain: bool,
    /// Base64 encode each pair, as used by HTTP basic auth.
    pub basic: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            separator: ":".to_string(),
            mix: false,
            with_domain: false,
            basic: false,
        }
    }
}

pub fn export_user_pass(
    set: &CredentialSet,
    defaults: &Defaults,
    opts: &ExportOptions,
) -> Vec<String> {
    let users: Vec<&Credential> = set.iter().filter(|c| c.username.is_some()).collect();
    let mut pairs: Vec<(&Credential, &str)> = Vec::new();
    for user in &users {
        if opts.mix {
            pairs.extend(set.iter().filter_map(|c| c.password_str()).map(|p| (*user, p)));
        } else if let Some(p) = user.password_str() {
            pairs.push((*user, p));
        }
    }

    let lines = sorted_unique(pairs.into_iter().map(|(user, password)| {
        let prefix = if opts.with_domain {
            user.domain
                .as_deref()
                .or(defaults.domain.as_deref())
                .map(|d| format!("{d}/"))
                .unwrap_or_default()
        } else {
            String::new()
        };
        let username = user.username.as_deref().unwrap_or_default();
        format!("{prefix}{username}{}{password}", opts.separator)
    }));

    if opts.basic {
        lines.into_iter().map(|l| STANDARD.encode(l)).collect()
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cred(user: Option<&str>, pass: Option<&str>, domain: Option<&str>) -> Credential {
        Credential::new(
            CredentialFields {
                username: user.map(str::to_string),
                password: pass.map(str::to_string),
                domain: domain.map(str::to_string),
                ..Default::default()
            },
            1,
            None,
        )
    }

    #[test]
    fn import_usernames_splits_on_first_slash() {
        let set = import_usernames(["alice/bob\n", "carol\n"], true);
        let sorted = set.sorted();
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].domain.as_deref(), Some("alice"));
        assert_eq!(sorted[0].username.as_deref(), Some("bob"));
        assert_eq!(sorted[1].domain, None);
        assert_eq!(sorted[1].username.as_deref(), Some("carol"));
        assert!(sorted.iter().all(|c| c.note == IMPORT_MARKER));
    }

    #[test]
    fn import_usernames_keeps_slashes_without_domain_split() {
        let set = import_usernames(["corp/a/b"], false);
        assert_eq!(set.get(1).unwrap().username.as_deref(), Some("corp/a/b"));

        let set = import_usernames(["corp/a/b"], true);
        let c = set.get(1).unwrap();
        assert_eq!(c.domain.as_deref(), Some("corp"));
        assert_eq!(c.username.as_deref(), Some("a/b"));
    }

    #[test]
    fn import_passwords_one_per_line() {
        let set = import_passwords(["hunter2\n", "s3cret\r\n", "hunter2\n"]);
        assert_eq!(set.len(), 2);
        assert_eq!(export_passwords(&set), vec!["hunter2", "s3cret"]);
    }

    #[test]
    fn import_userpass_splits_on_first_separator() {
        let set = import_userpass(
            ["corp/admin:pa:ss\n", "guest\n", "svc:\n"],
            ":",
            true,
        );
        let sorted = set.sorted();
        assert_eq!(sorted[0].domain.as_deref(), Some("corp"));
        assert_eq!(sorted[0].username.as_deref(), Some("admin"));
        assert_eq!(sorted[0].password_str(), Some("pa:ss"));
        assert_eq!(sorted[1].username.as_deref(), Some("guest"));
        assert_eq!(sorted[1].password_str(), None);
        assert_eq!(sorted[2].username.as_deref(), Some("svc"));
        assert_eq!(sorted[2].password_str(), None);
    }

    #[test]
    fn user_pass_skips_records_without_password() {
        let set: CredentialSet = [cred(Some("a"), Some("1"), None), cred(Some("b"), None, None)]
            .into_iter()
            .collect();
        let out = export_user_pass(&set, &Defaults::default(), &ExportOptions::default());
        assert_eq!(out, vec!["a:1"]);
    }

    #[test]
    fn user_pass_mix_builds_cartesian_product() {
        let set: CredentialSet = [
            cred(Some("a"), Some("1"), None),
            cred(Some("b"), None, None),
            cred(None, Some("2"), None),
        ]
        .into_iter()
        .collect();
        let opts = ExportOptions {
            mix: true,
            ..Default::default()
        };
        let out = export_user_pass(&set, &Defaults::default(), &opts);
        assert_eq!(out, vec!["a:1", "a:2", "b:1", "b:2"]);
    }

    #[test]
    fn user_pass_domain_prefix_and_basic_encoding() {
        let set: CredentialSet = [
            cred(Some("a"), Some("1"), Some("corp")),
            cred(Some("b"), Some("2"), None),
        ]
        .into_iter()
        .collect();
        let defaults = Defaults::new(None, Some("default.org".into()));
        let opts = ExportOptions {
            with_domain: true,
            separator: "/".into(),
            ..Default::default()
        };
        assert_eq!(
            export_user_pass(&set, &defaults, &opts),
            vec!["corp/a/1", "default.org/b/2"]
        );

        let basic = ExportOptions {
            basic: true,
            ..Default::default()
        };
        assert_eq!(
            export_user_pass(&set, &Defaults::default(), &basic),
            vec!["YTox", "Yjoy"]
        );
    }

    #[test]
    fn domain_and_url_exports_include_defaults() {
        let set: CredentialSet = [
            cred(Some("a"), None, Some("corp")),
            cred(Some("b"), None, Some("corp")),
        ]
        .into_iter()
        .collect();
        let defaults = Defaults::new(Some("https://default.org".into()), Some("default.org".into()));
        assert_eq!(export_domains(&set, &defaults), vec!["corp", "default.org"]);
        assert_eq!(export_urls(&set, &defaults), vec!["https://default.org"]);
        assert!(export_urls(&set, &Defaults::default()).is_empty());
    }

    #[test]
    fn user_domain_falls_back_to_default_then_bare_name() {
        let set: CredentialSet = [
            cred(Some("a"), None, Some("corp")),
            cred(Some("b"), None, None),
            cred(None, Some("x"), None),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            export_user_domain(&set, &Defaults::default()),
            vec!["b", "corp/a"]
        );
        let defaults = Defaults::new(None, Some("default.org".into()));
        assert_eq!(
            export_user_domain(&set, &defaults),
            vec!["corp/a", "default.org/b"]
        );
    }

    #[test]
    fn usernames_are_sorted_and_unique() {
        let set: CredentialSet = [
            cred(Some("zed"), Some("1"), None),
            cred(Some("amy"), Some("2"), None),
            cred(Some("zed"), Some("3"), None),
        ]
        .into_iter()
        .collect();
        assert_eq!(export_usernames(&set), vec!["amy", "zed"]);
    }
}
