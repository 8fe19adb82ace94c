use crate::domain::{GerritServer, ServerError, ServerSelector, VerdictCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry of a single-selection list: display name plus submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub name: String,
    pub value: String,
}

impl From<&VerdictCategory> for ListItem {
    fn from(category: &VerdictCategory) -> Self {
        Self {
            name: category.description().to_string(),
            value: category.value().to_string(),
        }
    }
}

/// Collects the verdict categories visible for `selector`.
///
/// With [`ServerSelector::Any`] every server is walked in order and the first
/// category seen for each value wins. A named server's list is returned as
/// configured, duplicates included.
pub fn collect_categories<'a>(
    servers: &'a [GerritServer],
    selector: &ServerSelector,
) -> Result<Vec<&'a VerdictCategory>, ServerError> {
    match selector {
        ServerSelector::Any => {
            let mut seen = HashSet::new();
            Ok(servers
                .iter()
                .flat_map(|server| server.categories.iter())
                .filter(|&category| seen.insert(category.value()))
                .collect())
        }
        ServerSelector::Named(name) => {
            let server = servers
                .iter()
                .find(|server| &server.name == name)
                .ok_or_else(|| ServerError::NotFound(name.clone()))?;
            Ok(server.categories.iter().collect())
        }
    }
}

/// Fills the verdict category drop-down for the server chosen in `selector`.
pub fn fill_verdict_category_items(
    servers: &[GerritServer],
    selector: &str,
) -> Result<Vec<ListItem>, ServerError> {
    let selector = ServerSelector::from(selector);
    let categories = collect_categories(servers, &selector)?;
    log::debug!(
        "Filled {} verdict categories for {}",
        categories.len(),
        selector
    );
    Ok(categories.into_iter().map(ListItem::from).collect())
}
