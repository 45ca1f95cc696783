use crate::core::credential::Credential;
use crate::core::set::CredentialSet;

const ORDINAL_WIDTH: usize = 4;
const ELLIPSIS: &str = "...";

/// Column widths of a picker row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub user_width: usize,
    pub url_width: usize,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            user_width: 20,
            url_width: 30,
        }
    }
}

/// Left-justify `item` to `width` characters. Items longer than `width - 5` are cut to that
/// length and get a `...` suffix, which always leaves at least two spaces of padding.
pub fn pad_truncate(item: &str, width: usize) -> String {
    let keep = width.saturating_sub(5);
    let shown: String = if item.chars().count() > keep {
        item.chars().take(keep).chain(ELLIPSIS.chars()).collect()
    } else {
        item.to_string()
    };
    format!("{shown:<width$}")
}

pub fn render_row(credential: &Credential, layout: &RowLayout) -> String {
    let id = format!(
        "{:<width$}",
        format!("{}.", credential.ordinal),
        width = ORDINAL_WIDTH
    );
    let user = pad_truncate(credential.display_name(), layout.user_width);
    let url = pad_truncate(credential.url.as_deref().unwrap_or(""), layout.url_width);
    let note = credential.note.replace('\n', " ");
    format!(
        "{id}{user}{url}  {}  {note}",
        credential.property_flags()
    )
}

/// Rows in ordinal order; row `i` belongs to the i-th credential of [`CredentialSet::sorted`].
pub fn render_rows(set: &CredentialSet, layout: &RowLayout) -> Vec<String> {
    set.sorted()
        .into_iter()
        .map(|c| render_row(c, layout))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credential::CredentialFields;

    #[test]
    fn short_values_are_padded() {
        assert_eq!(pad_truncate("tony", 10), "tony      ");
        assert_eq!(pad_truncate("", 4), "    ");
    }

    #[test]
    fn long_values_are_cut_with_ellipsis() {
        let out = pad_truncate("averyveryverylongusername", 20);
        assert_eq!(out, "averyveryverylo...  ");
        assert_eq!(out.chars().count(), 20);
    }

    #[test]
    fn row_layout_matches_columns() {
        let mut c = Credential::new(
            CredentialFields {
                username: Some("tony".into()),
                password: Some("pw".into()),
                url: Some("https://example.com".into()),
                domain: Some("example.com".into()),
                note: Some("this is tony".into()),
                ..Default::default()
            },
            1,
            None,
        );
        c.ordinal = 2;
        let row = render_row(&c, &RowLayout::default());
        let expected = format!(
            "2.  {:<20}{:<30}  PD   this is tony",
            "tony", "https://example.com"
        );
        assert_eq!(row, expected);
    }

    #[test]
    fn alias_replaces_username() {
        let c = Credential::new(
            CredentialFields {
                username: Some("administrator".into()),
                alias: Some("admin".into()),
                note: Some("n".into()),
                ..Default::default()
            },
            1,
            None,
        );
        let row = render_row(
            &c,
            &RowLayout {
                user_width: 8,
                url_width: 6,
            },
        );
        assert_eq!(
            row,
            format!("0.  adm...  {}  {}  n", " ".repeat(6), " ".repeat(3))
        );
    }
}
