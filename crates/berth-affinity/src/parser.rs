//! Label grammar to constraints.
//!
//! A label key starting with [`AFFINITY_LABEL_PREFIX`] declares one
//! constraint definition after a `:` separator, tokenized on `_`:
//!
//! ```text
//! io.rancher.scheduler.affinity:host_label_soft_ne = zone=a,zone=b
//!                               ^kind     ^modifiers  ^one constraint per element
//! ```
//!
//! The label value is a comma-separated list; every element yields an
//! independent constraint sharing the key's kind and modifiers.

use std::collections::HashMap;

use tracing::warn;

use crate::constraint::{AffinityConstraint, AffinityRule};
use crate::error::{AffinityError, AffinityResult};

/// Label-key prefix that marks a scheduling affinity declaration.
pub const AFFINITY_LABEL_PREFIX: &str = "io.rancher.scheduler.affinity";

/// The constraint shape encoded in a label key, before value expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffinityTemplate {
    kind: TemplateKind,
    soft: bool,
    anti: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemplateKind {
    HostLabel,
    ContainerLabel,
    ContainerName,
}

impl AffinityTemplate {
    /// Parse the definition encoded in an affinity label key.
    pub fn parse(key: &str) -> AffinityResult<Self> {
        let Some((_, definition)) = key.split_once(':') else {
            return Err(AffinityError::MissingDefinition {
                key: key.to_string(),
            });
        };

        let tokens: Vec<&str> = definition.split('_').collect();
        let (kind, modifiers) = match tokens.as_slice() {
            ["host", "label", rest @ ..] => (TemplateKind::HostLabel, rest),
            ["container", "label", rest @ ..] => (TemplateKind::ContainerLabel, rest),
            ["container", rest @ ..] => (TemplateKind::ContainerName, rest),
            _ => {
                return Err(AffinityError::UnknownKind {
                    key: key.to_string(),
                });
            }
        };

        let mut soft = false;
        let mut anti = false;
        for modifier in modifiers {
            match *modifier {
                "soft" => soft = true,
                "ne" => anti = true,
                // Unknown modifiers are ignored for forward compatibility.
                _ => {}
            }
        }

        Ok(Self { kind, soft, anti })
    }

    /// Build the constraint for one element of the label's value list.
    ///
    /// Host-label elements must split on `=` into exactly two non-empty
    /// parts; anything else is malformed.
    pub fn instantiate(&self, element: &str) -> AffinityResult<AffinityConstraint> {
        let rule = match self.kind {
            TemplateKind::HostLabel => {
                let parts: Vec<&str> = element.split('=').collect();
                match parts.as_slice() {
                    [key, value] if !key.is_empty() && !value.is_empty() => {
                        AffinityRule::HostLabel {
                            key: (*key).to_string(),
                            value: (*value).to_string(),
                        }
                    }
                    _ => {
                        return Err(AffinityError::MalformedHostLabel {
                            value: element.to_string(),
                        });
                    }
                }
            }
            TemplateKind::ContainerLabel => AffinityRule::ContainerLabel {
                expr: element.to_string(),
            },
            TemplateKind::ContainerName => AffinityRule::ContainerName {
                name: element.to_string(),
            },
        };

        Ok(AffinityConstraint {
            rule,
            soft: self.soft,
            anti: self.anti,
        })
    }
}

/// Parse one affinity label into its constraints, strictly.
///
/// The first malformed value element fails the whole label. The serving
/// path uses [`collect_affinities`] instead, which contains failures to
/// the offending element.
pub fn parse_affinity_label(key: &str, value: &str) -> AffinityResult<Vec<AffinityConstraint>> {
    let template = AffinityTemplate::parse(key)?;
    value.split(',').map(|e| template.instantiate(e)).collect()
}

/// Collect the constraints declared across a request's label maps.
///
/// Malformed declarations are logged and skipped; every well-formed
/// constraint in the request still applies, including siblings of a
/// malformed element within the same label.
pub fn collect_affinities<'a, I>(label_maps: I) -> Vec<AffinityConstraint>
where
    I: IntoIterator<Item = &'a HashMap<String, String>>,
{
    let mut constraints = Vec::new();

    for labels in label_maps {
        for (key, value) in labels {
            if !key.starts_with(AFFINITY_LABEL_PREFIX) {
                continue;
            }

            let template = match AffinityTemplate::parse(key) {
                Ok(template) => template,
                Err(err) => {
                    warn!(label = %key, error = %err, "skipping malformed affinity label");
                    continue;
                }
            };

            for element in value.split(',') {
                match template.instantiate(element) {
                    Ok(constraint) => constraints.push(constraint),
                    Err(err) => {
                        warn!(label = %key, error = %err, "skipping malformed affinity value");
                    }
                }
            }
        }
    }

    constraints
}
