//! Site-directory consumer.
//!
//! FTPRush keeps its configured sites in `RushSite.xml`, a hierarchical
//! document of `GROUP` elements containing `SITE` elements. This module
//! extracts the distinct site names, skipping the client-managed `History`
//! group. Failures to locate or parse the file degrade to an empty set;
//! nothing here propagates errors to the automation layer.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::warn;

/// File name of the site directory inside the client's config directory.
pub const SITE_FILE_NAME: &str = "RushSite.xml";

/// Group name the client uses for its connection history; never a
/// user-configured site group.
const HISTORY_GROUP: &str = "History";

#[derive(Debug, Error)]
enum SiteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Locate the per-user `RushSite.xml`, if one exists.
#[must_use]
pub fn default_site_file() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("FTPRush").find_config_file(SITE_FILE_NAME)
}

/// Load the distinct site names from the site directory.
///
/// With no explicit `path`, the per-user configuration location is tried.
/// Sites under a group named `History` are excluded. Any failure — missing
/// file, unreadable file, malformed document — yields an empty set after a
/// warning event.
#[must_use]
pub fn site_names(path: Option<&Path>) -> BTreeSet<String> {
    let Some(file) = path.map(Path::to_path_buf).or_else(default_site_file) else {
        warn!("no {SITE_FILE_NAME} found in the user configuration directory");
        return BTreeSet::new();
    };
    read_site_names(&file).unwrap_or_else(|err| {
        warn!(file = %file.display(), %err, "failed to load site directory");
        BTreeSet::new()
    })
}

fn read_site_names(file: &Path) -> Result<BTreeSet<String>, SiteError> {
    let text = fs::read_to_string(file)?;
    let doc = roxmltree::Document::parse(&text)?;
    let names = doc
        .descendants()
        .filter(|node| {
            node.has_tag_name("GROUP") && node.attribute("NAME") != Some(HISTORY_GROUP)
        })
        .flat_map(|group| {
            group
                .descendants()
                .filter(|node| node.has_tag_name("SITE"))
                .filter_map(|site| site.attribute("NAME"))
        })
        .map(str::to_owned)
        .collect();
    Ok(names)
}
