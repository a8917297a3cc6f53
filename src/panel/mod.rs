//! Panel descriptors, manifest parsing, and the panel/node registry.
//!
//! A manifest is a JSON channel listing: each record carries an image
//! source URL with an embedded `1024` resolution token. Records map to
//! [`Panel`]s through an explicit schema; a record without a usable
//! source is a hard error rather than a silently broken panel.

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::WallError;
use crate::options::LayoutOptions;
use crate::scene::{NodeId, SceneGraph, PLACEHOLDER_NAME};

/// Resolution token embedded in manifest source URLs.
const RESOLUTION_TOKEN: &str = "1024";
/// Screen width below which the reduced tiers are served.
const NARROW_SCREEN_PX: f32 = 512.0;

/// Stable identifier of a panel within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub u32);

impl PanelId {
    /// Registry slot index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Image source of one manifest record.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    /// Image URL carrying the resolution token. Absent on malformed
    /// records.
    #[serde(default)]
    pub url: Option<String>,
}

/// One raw record of the channel manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRecord {
    /// Upstream record id, informational only.
    #[serde(default)]
    pub id: Option<u64>,
    /// Explicit order index; `-1` (or absent) means "assign in manifest
    /// order".
    #[serde(default = "unassigned_position")]
    pub position: i64,
    /// Image source block.
    #[serde(default)]
    pub source: Option<SourceRecord>,
}

const fn unassigned_position() -> i64 {
    -1
}

/// The channel manifest as fetched from the gallery API.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Panel records in upstream order.
    pub contents: Vec<ManifestRecord>,
}

impl Manifest {
    /// Parse a manifest from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, WallError> {
        serde_json::from_str(text)
            .map_err(|e| WallError::Manifest(e.to_string()))
    }
}

/// One wall panel: an ordered slot plus its tiered image sources.
#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    position: usize,
    source: String,
}

impl Panel {
    /// Registry identifier.
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Grid order index, `0..count`.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The canonical source URL (query string stripped, token intact).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Thumbnail-tier URL: the token becomes `512` on narrow screens,
    /// `1024` otherwise.
    #[must_use]
    pub fn thumbnail_src(&self, screen_width: f32) -> String {
        let tier = if screen_width < NARROW_SCREEN_PX {
            "512"
        } else {
            "1024"
        };
        self.source.replacen(RESOLUTION_TOKEN, tier, 1)
    }

    /// Zoom-tier URL: the token becomes `1024` on narrow screens, `2560`
    /// otherwise.
    #[must_use]
    pub fn zoom_src(&self, screen_width: f32) -> String {
        let tier = if screen_width < NARROW_SCREEN_PX {
            "1024"
        } else {
            "2560"
        };
        self.source.replacen(RESOLUTION_TOKEN, tier, 1)
    }
}

/// Ordered panel collection plus the panel/scene-node cross-reference.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
    node_of: FxHashMap<PanelId, NodeId>,
    panel_of: FxHashMap<NodeId, PanelId>,
}

impl PanelRegistry {
    /// Build a registry from a parsed manifest.
    ///
    /// Records with an explicit non-negative `position` keep it; the rest
    /// are assigned their manifest-order index. A record without a source
    /// URL fails the whole load.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, WallError> {
        let mut panels = Vec::with_capacity(manifest.contents.len());
        for (index, record) in manifest.contents.iter().enumerate() {
            let url = record
                .source
                .as_ref()
                .and_then(|s| s.url.as_deref())
                .ok_or_else(|| {
                    WallError::Manifest(format!(
                        "record {index} (id {:?}) has no source url",
                        record.id
                    ))
                })?;
            let source = strip_query(url).to_owned();
            let position = if record.position >= 0 {
                record.position as usize
            } else {
                index
            };
            panels.push(Panel {
                id: PanelId(index as u32),
                position,
                source,
            });
        }
        log::info!("manifest loaded: {} panels", panels.len());
        Ok(Self {
            panels,
            node_of: FxHashMap::default(),
            panel_of: FxHashMap::default(),
        })
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the registry holds no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panel lookup by id.
    #[must_use]
    pub fn panel(&self, id: PanelId) -> &Panel {
        &self.panels[id.index()]
    }

    /// Iterate panels in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    /// The panel occupying grid position `position`, if any.
    #[must_use]
    pub fn panel_at_position(&self, position: usize) -> Option<PanelId> {
        self.panels
            .iter()
            .find(|p| p.position == position)
            .map(Panel::id)
    }

    /// Grid position one step to the right of `from`, wrapping at the
    /// last panel.
    #[must_use]
    pub fn next_position(&self, from: usize) -> usize {
        (from + 1) % self.panels.len().max(1)
    }

    /// Grid position one step to the left of `from`, wrapping at the
    /// first panel.
    #[must_use]
    pub fn previous_position(&self, from: usize) -> usize {
        let count = self.panels.len().max(1);
        (from + count - 1) % count
    }

    /// Instantiate the wall: one frame group per panel at its grid slot,
    /// each holding a sized placeholder node. Returns the wall group.
    ///
    /// Both the frame group and its placeholder are bound to the panel so
    /// picking can resolve either.
    pub fn instantiate(
        &mut self,
        scene: &mut SceneGraph,
        layout: &LayoutOptions,
    ) -> NodeId {
        let wall =
            scene.add_node(scene.root(), "wall", Vec3::ZERO, Vec3::ZERO);
        let count = self.panels.len();
        for panel in &self.panels {
            let group = scene.add_node(
                wall,
                "frame",
                layout.slot(panel.position, count),
                Vec3::ZERO,
            );
            let placeholder = scene.add_node(
                group,
                PLACEHOLDER_NAME,
                Vec3::ZERO,
                Vec3::new(
                    layout.panel_size[0],
                    layout.panel_size[1],
                    layout.panel_depth,
                ),
            );
            scene.node_mut(group).panel = Some(panel.id);
            scene.node_mut(placeholder).panel = Some(panel.id);
            let _ = self.node_of.insert(panel.id, group);
            let _ = self.panel_of.insert(group, panel.id);
            let _ = self.panel_of.insert(placeholder, panel.id);
        }
        wall
    }

    /// The frame group node instantiated for `panel`.
    #[must_use]
    pub fn node_for_panel(&self, panel: PanelId) -> Option<NodeId> {
        self.node_of.get(&panel).copied()
    }

    /// The panel bound to `node` (frame group or placeholder).
    #[must_use]
    pub fn panel_for_node(&self, node: NodeId) -> Option<PanelId> {
        self.panel_of.get(&node).copied()
    }
}

/// Drop everything from the first `?` on.
fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(count: usize) -> Manifest {
        let contents = (0..count)
            .map(|i| ManifestRecord {
                id: Some(i as u64),
                position: -1,
                source: Some(SourceRecord {
                    url: Some(format!("images/1024/photo-{i}.jpg?w=900")),
                }),
            })
            .collect();
        Manifest { contents }
    }

    #[test]
    fn test_positions_assigned_in_manifest_order() {
        let registry = PanelRegistry::from_manifest(&manifest(12)).unwrap();
        for (i, panel) in registry.iter().enumerate() {
            assert_eq!(panel.position(), i);
        }
    }

    #[test]
    fn test_explicit_position_is_kept() {
        let mut m = manifest(3);
        m.contents[1].position = 7;
        let registry = PanelRegistry::from_manifest(&m).unwrap();
        assert_eq!(registry.panel(PanelId(1)).position(), 7);
        assert_eq!(registry.panel_at_position(7), Some(PanelId(1)));
    }

    #[test]
    fn test_missing_source_url_is_an_error() {
        let mut m = manifest(2);
        m.contents[1].source = None;
        assert!(matches!(
            PanelRegistry::from_manifest(&m),
            Err(WallError::Manifest(_))
        ));
    }

    #[test]
    fn test_query_string_is_stripped() {
        let registry = PanelRegistry::from_manifest(&manifest(1)).unwrap();
        assert_eq!(
            registry.panel(PanelId(0)).source(),
            "images/1024/photo-0.jpg"
        );
    }

    #[test]
    fn test_resolution_tiers() {
        let registry = PanelRegistry::from_manifest(&manifest(1)).unwrap();
        let panel = registry.panel(PanelId(0));

        assert_eq!(
            panel.thumbnail_src(480.0),
            "images/512/photo-0.jpg"
        );
        assert_eq!(panel.zoom_src(480.0), "images/1024/photo-0.jpg");
        assert_eq!(
            panel.thumbnail_src(1024.0),
            "images/1024/photo-0.jpg"
        );
        assert_eq!(panel.zoom_src(1024.0), "images/2560/photo-0.jpg");
    }

    #[test]
    fn test_only_first_token_is_replaced() {
        let m = Manifest {
            contents: vec![ManifestRecord {
                id: None,
                position: -1,
                source: Some(SourceRecord {
                    url: Some("cdn/1024/1024-shot.jpg".to_owned()),
                }),
            }],
        };
        let registry = PanelRegistry::from_manifest(&m).unwrap();
        assert_eq!(
            registry.panel(PanelId(0)).zoom_src(1024.0),
            "cdn/2560/1024-shot.jpg"
        );
    }

    #[test]
    fn test_navigation_wraps_both_ways() {
        let registry = PanelRegistry::from_manifest(&manifest(12)).unwrap();
        assert_eq!(registry.next_position(5), 6);
        assert_eq!(registry.next_position(11), 0);
        assert_eq!(registry.previous_position(0), 11);
        assert_eq!(registry.previous_position(6), 5);
    }

    #[test]
    fn test_instantiate_binds_nodes_both_ways() {
        let mut registry = PanelRegistry::from_manifest(&manifest(4)).unwrap();
        let mut scene = SceneGraph::new();
        let wall = registry.instantiate(&mut scene, &LayoutOptions::default());

        assert_eq!(scene.children(wall).len(), 4);
        for panel in 0..4u32 {
            let group = registry.node_for_panel(PanelId(panel)).unwrap();
            assert_eq!(registry.panel_for_node(group), Some(PanelId(panel)));
            let placeholder =
                scene.child_by_name(group, PLACEHOLDER_NAME).unwrap();
            assert_eq!(
                registry.panel_for_node(placeholder),
                Some(PanelId(panel))
            );
            assert_eq!(scene.node(placeholder).panel, Some(PanelId(panel)));
        }
    }

    #[test]
    fn test_manifest_json_parsing() {
        let text = r#"{
            "contents": [
                { "id": 9, "source": { "url": "a/1024/x.jpg?q=1" } },
                { "id": 10, "position": 0, "source": { "url": "a/1024/y.jpg" } }
            ]
        }"#;
        let manifest = Manifest::from_json(text).unwrap();
        assert_eq!(manifest.contents.len(), 2);
        assert_eq!(manifest.contents[0].position, -1);
        assert_eq!(manifest.contents[1].position, 0);
    }
}
