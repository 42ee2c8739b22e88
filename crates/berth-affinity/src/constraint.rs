//! The affinity constraint model.

use std::fmt;

/// One placement rule, by kind.
///
/// Only `HostLabel` is evaluated by the filter. The container kinds are
/// recognized by the parser and carried through ordering, but the filter
/// skips them; that capability gap is deliberate and documented, not a
/// bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffinityRule {
    /// Require (or, under anti-affinity, forbid) a host label.
    ///
    /// Both fields are non-empty; the parser rejects anything else.
    HostLabel { key: String, value: String },
    /// Recognized but inert: a label expression on running containers.
    ContainerLabel { expr: String },
    /// Recognized but inert: the name of a running container.
    ContainerName { name: String },
}

impl AffinityRule {
    /// The kind token as it appears in label definitions.
    pub fn kind(&self) -> &'static str {
        match self {
            AffinityRule::HostLabel { .. } => "host_label",
            AffinityRule::ContainerLabel { .. } => "container_label",
            AffinityRule::ContainerName { .. } => "container",
        }
    }

    /// Whether this rule targets containers rather than hosts.
    pub fn is_container_kind(&self) -> bool {
        matches!(
            self,
            AffinityRule::ContainerLabel { .. } | AffinityRule::ContainerName { .. }
        )
    }
}

/// One placement rule together with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityConstraint {
    pub rule: AffinityRule,
    /// Best-effort: applied only if at least one candidate survives.
    pub soft: bool,
    /// Inverted match polarity (anti-affinity).
    pub anti: bool,
}

impl fmt::Display for AffinityConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "affinity kind={} soft={} anti={}",
            self.rule.kind(),
            self.soft,
            self.anti
        )?;
        match &self.rule {
            AffinityRule::HostLabel { key, value } => write!(f, " {key}={value}"),
            AffinityRule::ContainerLabel { expr } => write!(f, " {expr}"),
            AffinityRule::ContainerName { name } => write!(f, " {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tokens_match_label_grammar() {
        let host = AffinityRule::HostLabel {
            key: "zone".to_string(),
            value: "a".to_string(),
        };
        let label = AffinityRule::ContainerLabel {
            expr: "tier=web".to_string(),
        };
        let name = AffinityRule::ContainerName {
            name: "db".to_string(),
        };

        assert_eq!(host.kind(), "host_label");
        assert_eq!(label.kind(), "container_label");
        assert_eq!(name.kind(), "container");

        assert!(!host.is_container_kind());
        assert!(label.is_container_kind());
        assert!(name.is_container_kind());
    }

    #[test]
    fn display_includes_modifiers() {
        let constraint = AffinityConstraint {
            rule: AffinityRule::HostLabel {
                key: "zone".to_string(),
                value: "a".to_string(),
            },
            soft: true,
            anti: true,
        };

        let rendered = constraint.to_string();
        assert!(rendered.contains("soft=true"));
        assert!(rendered.contains("anti=true"));
        assert!(rendered.contains("zone=a"));
    }
}
