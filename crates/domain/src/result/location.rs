//! Location targets for results that point somewhere else

use serde::{Deserialize, Serialize};

use crate::route_values::RouteValues;

/// Where a redirect, created, or accepted result points.
///
/// A result either carries a raw URL or a routed target (action name,
/// controller name, route values). Keeping the two apart lets assertions
/// distinguish "has a location" from "has an action name" without any
/// runtime casting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationTarget {
    /// A raw URL, absolute or relative.
    Url(String),
    /// A routed target resolved by the framework.
    Route {
        /// Action name, if the route names one.
        action: Option<String>,
        /// Controller name, if the route names one.
        controller: Option<String>,
        /// Route values attached to the target.
        #[serde(default)]
        route_values: RouteValues,
    },
}

impl LocationTarget {
    /// Creates a URL target.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Creates a routed target with an action name.
    #[must_use]
    pub fn action(action: impl Into<String>) -> Self {
        Self::Route {
            action: Some(action.into()),
            controller: None,
            route_values: RouteValues::new(),
        }
    }

    /// Creates a routed target with action and controller names.
    #[must_use]
    pub fn action_in(action: impl Into<String>, controller: impl Into<String>) -> Self {
        Self::Route {
            action: Some(action.into()),
            controller: Some(controller.into()),
            route_values: RouteValues::new(),
        }
    }

    /// Attaches route values to a routed target; no-op for URL targets.
    #[must_use]
    pub fn with_route_values(mut self, values: RouteValues) -> Self {
        if let Self::Route { route_values, .. } = &mut self {
            *route_values = values;
        }
        self
    }

    /// Returns the raw URL when this is a URL target.
    #[must_use]
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Route { .. } => None,
        }
    }

    /// Returns the action name when this is a routed target naming one.
    #[must_use]
    pub fn action_name(&self) -> Option<&str> {
        match self {
            Self::Route { action, .. } => action.as_deref(),
            Self::Url(_) => None,
        }
    }

    /// Returns the controller name when this is a routed target naming one.
    #[must_use]
    pub fn controller_name(&self) -> Option<&str> {
        match self {
            Self::Route { controller, .. } => controller.as_deref(),
            Self::Url(_) => None,
        }
    }

    /// Returns the route values when this is a routed target.
    #[must_use]
    pub fn route_values(&self) -> Option<&RouteValues> {
        match self {
            Self::Route { route_values, .. } => Some(route_values),
            Self::Url(_) => None,
        }
    }
}
