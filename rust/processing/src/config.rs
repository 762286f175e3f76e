// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analysis configuration loaded from environment variables.

use pipenet_sizing::SizingConfig;
use pipenet_topology::{
    ConnectivityConfig, IntersectionMode, Strategy, Tolerance, TraversalOrder, TreeConfig,
};

use crate::error::Result;

/// Analysis configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    /// Endpoint coincidence tolerance in drawing units.
    pub tolerance: Tolerance,
    /// How graph nodes are derived from segments.
    pub strategy: Strategy,
    /// Which intersection points become junctions (explicit-node only).
    pub intersections: IntersectionMode,
    /// Tree traversal order.
    pub traversal: TraversalOrder,
    /// Optional traversal depth guard.
    pub max_depth: Option<usize>,
    /// Lookup tables and curves for diameter selection.
    pub sizing: SizingConfig,
}

impl AnalysisConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Values | Default |
    /// |---|---|---|
    /// | `PIPENET_TOLERANCE` | positive number | `1e-6` |
    /// | `PIPENET_STRATEGY` | `line-as-node`, `explicit-node` | `line-as-node` |
    /// | `PIPENET_INTERSECTIONS` | `none`, `bounded`, `extended` | `bounded` |
    /// | `PIPENET_TRAVERSAL` | `depth-first`, `breadth-first` | `depth-first` |
    /// | `PIPENET_MAX_DEPTH` | integer | unlimited |
    /// | `PIPENET_INTERPOLATION` | `true`, `false` | `false` |
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let tolerance = var("PIPENET_TOLERANCE")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .and_then(|eps| Tolerance::new(eps).ok())
            .unwrap_or_default();

        let strategy = match var("PIPENET_STRATEGY").as_deref().map(normalize).as_deref() {
            Some("explicit-node") => Strategy::ExplicitNode,
            Some("line-as-node") => Strategy::LineAsNode,
            _ => Strategy::default(),
        };

        let intersections = var("PIPENET_INTERSECTIONS").as_deref().map(normalize);
        let intersections = match intersections.as_deref() {
            Some("none") => IntersectionMode::None,
            Some("bounded") => IntersectionMode::Bounded,
            Some("extended") => IntersectionMode::Extended,
            _ => IntersectionMode::default(),
        };

        let traversal = match var("PIPENET_TRAVERSAL").as_deref().map(normalize).as_deref() {
            Some("breadth-first" | "bfs") => TraversalOrder::BreadthFirst,
            Some("depth-first" | "dfs") => TraversalOrder::DepthFirst,
            _ => TraversalOrder::default(),
        };

        let max_depth = var("PIPENET_MAX_DEPTH").and_then(|v| v.trim().parse().ok());

        let sizing = SizingConfig {
            interpolation_enabled: var("PIPENET_INTERPOLATION")
                .unwrap_or_else(|| "false".into())
                .trim()
                .parse()
                .unwrap_or(false),
            ..SizingConfig::default()
        };

        Self {
            tolerance,
            strategy,
            intersections,
            traversal,
            max_depth,
            sizing,
        }
    }

    /// Replaces the sizing tables with a validated JSON document.
    pub fn with_sizing_json(mut self, json: &str) -> Result<Self> {
        self.sizing = SizingConfig::from_json(json)?;
        Ok(self)
    }

    pub fn connectivity(&self) -> ConnectivityConfig {
        ConnectivityConfig {
            tolerance: self.tolerance,
            strategy: self.strategy,
            intersections: self.intersections,
        }
    }

    pub fn tree(&self) -> TreeConfig {
        TreeConfig {
            order: self.traversal,
            max_depth: self.max_depth,
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = AnalysisConfig::from_lookup(|_| None);
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.strategy, Strategy::LineAsNode);
        assert_eq!(config.traversal, TraversalOrder::DepthFirst);
        assert_eq!(config.tolerance.epsilon(), 1e-6);
    }

    #[test]
    fn reads_every_variable() {
        let config = AnalysisConfig::from_lookup(lookup(&[
            ("PIPENET_TOLERANCE", "0.5"),
            ("PIPENET_STRATEGY", "EXPLICIT_NODE"),
            ("PIPENET_INTERSECTIONS", "extended"),
            ("PIPENET_TRAVERSAL", "bfs"),
            ("PIPENET_MAX_DEPTH", "64"),
            ("PIPENET_INTERPOLATION", "true"),
        ]));
        assert_eq!(config.tolerance.epsilon(), 0.5);
        assert_eq!(config.strategy, Strategy::ExplicitNode);
        assert_eq!(config.intersections, IntersectionMode::Extended);
        assert_eq!(config.traversal, TraversalOrder::BreadthFirst);
        assert_eq!(config.max_depth, Some(64));
        assert!(config.sizing.interpolation_enabled);

        assert_eq!(config.tree().max_depth, Some(64));
        assert_eq!(config.connectivity().strategy, Strategy::ExplicitNode);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = AnalysisConfig::from_lookup(lookup(&[
            ("PIPENET_TOLERANCE", "-3"),
            ("PIPENET_STRATEGY", "graph"),
            ("PIPENET_MAX_DEPTH", "deep"),
            ("PIPENET_INTERPOLATION", "yes"),
        ]));
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn sizing_json_overrides_tables() {
        let config = AnalysisConfig::default()
            .with_sizing_json(r#"{"interpolation_enabled": true}"#)
            .unwrap();
        assert!(config.sizing.interpolation_enabled);

        let err = AnalysisConfig::default()
            .with_sizing_json(r#"{"capacity_table": {"entries": []}}"#)
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Sizing(_)));
    }
}
