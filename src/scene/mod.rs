//! Minimal scene-node arena standing in for the renderer's graph.
//!
//! The real scene graph is owned by an external renderer; the core only
//! needs enough structure to anchor camera moves and answer ray queries:
//! a name tag (placeholder identification), world position, extents,
//! parent/children links, an optional panel back-reference, and the
//! transient per-panel zoom flags.

use glam::Vec3;

use crate::panel::PanelId;

/// Name tag carried by the swappable-image node inside a panel's frame.
pub const PLACEHOLDER_NAME: &str = "image-placeholder";

/// Index of a node in the [`SceneGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena slot index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle to a texture owned by the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Axis-aligned bounding volume as reported to the framing solver.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    /// Volume center in world space.
    pub center: Vec3,
    /// Full extents along each axis.
    pub size: Vec3,
}

/// A world-space ray for placeholder picking.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Normalized direction.
    pub dir: Vec3,
}

/// One ray/node intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// The node that was hit.
    pub node: NodeId,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
}

/// One node in the arena.
#[derive(Debug)]
pub struct Node {
    /// Name tag; placeholder nodes contain `"placeholder"`.
    pub name: String,
    /// Position relative to the parent node.
    pub position: Vec3,
    /// Local extents; zero for pure grouping nodes (not hit-testable).
    pub size: Vec3,
    /// Owning panel, set on per-panel group nodes.
    pub panel: Option<PanelId>,
    /// True once the camera has settled on this panel.
    pub approach_done: bool,
    /// Cached high-resolution texture, populated by the prefetch flow.
    pub zoom_texture: Option<TextureHandle>,
    /// Cached thumbnail texture, restored when a zoom session ends.
    pub index_texture: Option<TextureHandle>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Flat arena of scene nodes with parent/children links.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    root: NodeId,
}

impl SceneGraph {
    /// Create a graph containing only a root group node.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            name: "root".to_owned(),
            position: Vec3::ZERO,
            size: Vec3::ZERO,
            panel: None,
            approach_done: false,
            zoom_texture: None,
            index_texture: None,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// The root group node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Add a child node under `parent`.
    pub fn add_node(
        &mut self,
        parent: NodeId,
        name: &str,
        position: Vec3,
        size: Vec3,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_owned(),
            position,
            size,
            panel: None,
            approach_done: false,
            zoom_texture: None,
            index_texture: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Immutable access to a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Mutable access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// The node's parent, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// The node's direct children.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// First direct child whose name matches exactly.
    #[must_use]
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Node position in world space (sum of ancestor positions).
    #[must_use]
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        let mut position = Vec3::ZERO;
        let mut current = Some(id);
        while let Some(node) = current {
            position += self.nodes[node.index()].position;
            current = self.nodes[node.index()].parent;
        }
        position
    }

    /// Axis-aligned bounds of a node's subtree in world space.
    ///
    /// Pure grouping nodes contribute nothing themselves; a subtree with
    /// no sized nodes collapses to a point at the node's world position.
    #[must_use]
    pub fn bounds(&self, id: NodeId) -> Bounds {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        self.accumulate_bounds(id, self.world_position(id), &mut min, &mut max);

        if min.x > max.x {
            let center = self.world_position(id);
            return Bounds {
                center,
                size: Vec3::ZERO,
            };
        }
        Bounds {
            center: (min + max) * 0.5,
            size: max - min,
        }
    }

    fn accumulate_bounds(
        &self,
        id: NodeId,
        world: Vec3,
        min: &mut Vec3,
        max: &mut Vec3,
    ) {
        let node = &self.nodes[id.index()];
        if node.size.length_squared() > 0.0 {
            let half = node.size * 0.5;
            *min = min.min(world - half);
            *max = max.max(world + half);
        }
        for &child in &node.children {
            let child_world = world + self.nodes[child.index()].position;
            self.accumulate_bounds(child, child_world, min, max);
        }
    }

    /// Intersect a ray against every sized node under `root`, recursively.
    ///
    /// Hits are ordered nearest-first. Grouping nodes (zero size) are
    /// never reported.
    #[must_use]
    pub fn intersect(&self, ray: &Ray, root: NodeId) -> Vec<Hit> {
        let mut hits = Vec::new();
        self.intersect_into(ray, root, self.world_position(root), &mut hits);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn intersect_into(
        &self,
        ray: &Ray,
        id: NodeId,
        world: Vec3,
        hits: &mut Vec<Hit>,
    ) {
        let node = &self.nodes[id.index()];
        if node.size.length_squared() > 0.0 {
            let half = node.size * 0.5;
            if let Some(distance) =
                ray_aabb(ray, world - half, world + half)
            {
                hits.push(Hit { node: id, distance });
            }
        }
        for &child in &node.children {
            let child_world = world + self.nodes[child.index()].position;
            self.intersect_into(ray, child, child_world, hits);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Slab test against an axis-aligned box. Returns the entry distance.
fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray.dir.recip();
    let t1 = (min - ray.origin) * inv;
    let t2 = (max - ray.origin) * inv;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    if t_far >= t_near.max(0.0) {
        Some(t_near.max(0.0))
    } else {
        None
    }
}
