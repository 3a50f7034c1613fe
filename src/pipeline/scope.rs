// src/pipeline/scope.rs
//! Moving the start directory around: cluster drill-down and breadcrumbs.

/// Prefix Graphviz cluster ids carry in rendered titles.
pub const CLUSTER_PREFIX: &str = "cluster_";

/// Path of a rendered cluster, relative to the current start directory.
///
/// Returns `None` for titles that are not cluster titles.
#[must_use]
pub fn cluster_path(title: &str) -> Option<&str> {
    title.strip_prefix(CLUSTER_PREFIX).filter(|p| !p.is_empty())
}

/// New start directory after drilling into `cluster` from `start_dir`.
#[must_use]
pub fn descend(start_dir: &str, cluster: &str) -> String {
    if start_dir.is_empty() {
        cluster.to_string()
    } else {
        format!("{start_dir}/{cluster}")
    }
}

/// One step of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    /// Start directory this crumb navigates to. Empty for the root.
    pub path: String,
    /// The last crumb is the current location and is not a link.
    pub current: bool,
}

pub const ROOT_LABEL: &str = "(root)";

/// Breadcrumb trail for a start directory, always starting at the root.
#[must_use]
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: ROOT_LABEL.to_string(),
        path: String::new(),
        current: path.is_empty(),
    }];
    if path.is_empty() {
        return crumbs;
    }

    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        crumbs.push(Crumb {
            label: (*segment).to_string(),
            path: segments[..=i].join("/"),
            current: i == last,
        });
    }
    crumbs
}
