//! Breadcrumbs derived from the active route.

/// Root route of the dashboard.
pub const DASHBOARD_ROOT: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub href: String,
    pub label: String,
    /// The last crumb is the current page and is not a link.
    pub is_last: bool,
}

fn humanize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('-', " "),
        None => String::new(),
    }
}

/// Builds breadcrumbs for `path`.
///
/// A leading `dashboard` segment is the root and is not repeated. The root
/// itself (and `/`) yields no crumbs.
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .enumerate()
        .filter(|&(i, s)| !(i == 0 && s == "dashboard"))
        .map(|(_, s)| s)
        .collect();

    let mut crumbs = Vec::with_capacity(segments.len() + 1);
    if path != DASHBOARD_ROOT && path != "/" {
        crumbs.push(Breadcrumb {
            href: DASHBOARD_ROOT.to_string(),
            label: "Dashboard".to_string(),
            is_last: false,
        });
    }

    for (i, segment) in segments.iter().enumerate() {
        crumbs.push(Breadcrumb {
            href: format!("{}/{}", DASHBOARD_ROOT, segments[..=i].join("/")),
            label: humanize(segment),
            is_last: i == segments.len() - 1,
        });
    }

    crumbs
}
