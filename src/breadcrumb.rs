//! Breadcrumb derivation.
//!
//! Converts a [`MatchResult`] into an ordered trail of [`BreadcrumbPart`]s.
//! The trail is never empty and its last part never carries an `href`: it
//! is the current location and renders as plain text.
//!
//! | Match | Trail |
//! |-------|-------|
//! | `ExactTop` on the root | `Dashboard` |
//! | `ExactTop` | `Dashboard › entry` |
//! | `ExactSub` | `Dashboard › parent › sub` |
//! | `PrefixSub` | `Dashboard › parent › sub › Edit` |
//! | `NoMatch` under the root | `Dashboard › Segment [› Segment]` |
//! | `NoMatch` elsewhere | `Page` |
//!
//! A parent crumb links only when the parent has a url of its own.

use crate::config::NavConfig;
use crate::filter::FilteredNavEntry;
use crate::matcher::MatchResult;
use crate::path::{join, normalize_path, segments_under};
use serde::Serialize;
use std::collections::BTreeMap;

/// One element of the trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbPart {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl BreadcrumbPart {
    /// A crumb rendered as plain text.
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }

    /// A clickable crumb.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    fn with_href(label: &str, href: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            href: href.map(str::to_string),
        }
    }
}

/// Display labels for raw path segments.
///
/// A closed table (`edit` → `Edit`, `new` → `New`, plus whatever the
/// configuration adds) with a single fallback: uppercase the first
/// character and keep the rest verbatim.
///
/// ```
/// use dashboard_nav::SegmentLabels;
///
/// let labels = SegmentLabels::builtin().with("categories", "All Categories");
/// assert_eq!(labels.label_for("edit"), "Edit");
/// assert_eq!(labels.label_for("categories"), "All Categories");
/// assert_eq!(labels.label_for("unknown-section"), "Unknown-section");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentLabels {
    labels: BTreeMap<String, String>,
}

impl SegmentLabels {
    pub fn builtin() -> Self {
        let labels = [("edit", "Edit"), ("new", "New")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { labels }
    }

    /// Add or override one entry.
    pub fn with(mut self, segment: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(segment.into(), label.into());
        self
    }

    /// Built-in table merged with the configured overrides.
    pub fn from_config(config: &NavConfig) -> Self {
        config
            .segment_labels
            .iter()
            .fold(Self::builtin(), |labels, (segment, label)| {
                labels.with(segment.as_str(), label.as_str())
            })
    }

    pub fn label_for(&self, segment: &str) -> String {
        self.labels
            .get(segment)
            .cloned()
            .unwrap_or_else(|| capitalize(segment))
    }
}

impl Default for SegmentLabels {
    fn default() -> Self {
        Self::builtin()
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds trails for one configuration.
#[derive(Debug, Clone)]
pub struct BreadcrumbBuilder {
    root: String,
    root_label: String,
    fallback_label: String,
    labels: SegmentLabels,
}

impl BreadcrumbBuilder {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            root: normalize_path(&config.dashboard_root).into_owned(),
            root_label: config.root_label.clone(),
            fallback_label: config.fallback_label.clone(),
            labels: SegmentLabels::from_config(config),
        }
    }

    pub fn labels(&self) -> &SegmentLabels {
        &self.labels
    }

    fn root_link(&self) -> BreadcrumbPart {
        BreadcrumbPart::link(&self.root_label, &self.root)
    }

    /// Derive the trail for a match.
    ///
    /// `tree` is the filtered tree the match was taken from; it supplies
    /// titles for the `NoMatch` heuristic.
    pub fn build(
        &self,
        result: &MatchResult<'_>,
        tree: &[FilteredNavEntry],
        current_path: &str,
    ) -> Vec<BreadcrumbPart> {
        let mut parts = match result {
            MatchResult::ExactTop { entry } => {
                let at_root = entry
                    .url
                    .as_deref()
                    .is_some_and(|url| normalize_path(url) == self.root.as_str());
                if at_root {
                    vec![BreadcrumbPart::text(&self.root_label)]
                } else {
                    vec![self.root_link(), BreadcrumbPart::text(&entry.title)]
                }
            }
            MatchResult::ExactSub { parent, sub_entry } => vec![
                self.root_link(),
                BreadcrumbPart::with_href(&parent.title, parent.url.as_deref()),
                BreadcrumbPart::text(&sub_entry.title),
            ],
            MatchResult::PrefixSub {
                parent,
                sub_entry,
                trailing_segment,
            } => vec![
                self.root_link(),
                BreadcrumbPart::with_href(&parent.title, parent.url.as_deref()),
                BreadcrumbPart::with_href(&sub_entry.title, sub_entry.url.as_deref()),
                BreadcrumbPart::text(self.labels.label_for(trailing_segment)),
            ],
            MatchResult::NoMatch => self.fallback(tree, current_path),
        };

        if parts.is_empty() {
            parts.push(BreadcrumbPart::text(&self.fallback_label));
        }
        if let Some(last) = parts.last_mut() {
            last.href = None;
        }
        parts
    }

    fn fallback(&self, tree: &[FilteredNavEntry], current_path: &str) -> Vec<BreadcrumbPart> {
        let path = normalize_path(current_path);
        if path == self.root.as_str() {
            return vec![BreadcrumbPart::text(&self.root_label)];
        }

        let Some(segments) = segments_under(&path, &self.root) else {
            return vec![BreadcrumbPart::text(&self.fallback_label)];
        };

        let first = segments[0];
        let first_href = join(&self.root, first);
        let first_label = tree
            .iter()
            .find(|entry| {
                entry
                    .url
                    .as_deref()
                    .is_some_and(|url| normalize_path(url) == first_href.as_str())
            })
            .map_or_else(|| self.labels.label_for(first), |entry| entry.title.clone());

        let mut parts = vec![self.root_link()];
        match segments.get(1) {
            Some(second) => {
                parts.push(BreadcrumbPart::link(first_label, first_href));
                parts.push(BreadcrumbPart::text(self.labels.label_for(second)));
            }
            None => parts.push(BreadcrumbPart::text(first_label)),
        }
        parts
    }
}

/// One-shot convenience over [`BreadcrumbBuilder`].
pub fn build_breadcrumbs(
    result: &MatchResult<'_>,
    tree: &[FilteredNavEntry],
    current_path: &str,
    config: &NavConfig,
) -> Vec<BreadcrumbPart> {
    BreadcrumbBuilder::new(config).build(result, tree, current_path)
}
