use crate::domain::VerdictCategory;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Selector value meaning "every configured server".
pub const ANY_SERVER: &str = "__ANY__";

/// A configured upstream Gerrit server and the verdict categories it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GerritServer {
    /// Unique server name.
    pub name: String,
    /// Categories in configuration-declared order.
    #[serde(default)]
    pub categories: Vec<VerdictCategory>,
}

impl GerritServer {
    pub fn new(name: impl Into<String>, categories: Vec<VerdictCategory>) -> Self {
        Self {
            name: name.into(),
            categories,
        }
    }
}

/// Which servers a category lookup should span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServerSelector {
    #[default]
    Any,
    Named(String),
}

impl fmt::Display for ServerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerSelector::Any => write!(f, "{ANY_SERVER}"),
            ServerSelector::Named(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for ServerSelector {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(input))
    }
}

impl From<&str> for ServerSelector {
    fn from(input: &str) -> Self {
        if input == ANY_SERVER {
            ServerSelector::Any
        } else {
            ServerSelector::Named(input.to_string())
        }
    }
}
