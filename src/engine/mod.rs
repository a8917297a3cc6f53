//! The wall engine: single-threaded orchestration of scene, camera,
//! interaction, and prefetch.
//!
//! One [`tick`](WallEngine::tick) per display refresh drives everything:
//! prefetch responses are drained onto this thread, the move timeline
//! advances, the integrators produce the frame's camera pose, the settle
//! condition fires pending approach work, and ambient drift restarts
//! itself whenever nothing else owns the camera.
//!
//! The engine keeps its own clock, advanced by the reported frame delta.
//! Timelines therefore progress in frame time, not wall time, which keeps
//! slow frames from skipping portions of a move.

pub mod command;

pub use command::{Direction, WallCommand};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_time::{Duration, Instant};

use crate::camera::{
    Camera, CameraPose, Choreographer, MoveContext, MoveOptions, MoveTarget,
};
use crate::error::WallError;
use crate::interact::{
    ApproachAction, InputEvent, InteractionMachine, PickContext, ZoomSession,
    ZoomState, ZoomTarget,
};
use crate::options::Options;
use crate::panel::{Manifest, PanelId, PanelRegistry};
use crate::prefetch::{
    FetchedImage, ImageFetcher, PrefetchBridge, RequestToken,
};
use crate::scene::{
    NodeId, SceneGraph, TextureHandle, PLACEHOLDER_NAME,
};

/// Renderer-side operations the engine needs.
pub trait RenderBackend {
    /// Decode and upload fetched image bytes, returning a handle.
    fn upload_texture(&mut self, image: &FetchedImage) -> TextureHandle;
    /// Bind `texture` as the material of `node`.
    fn set_material(&mut self, node: NodeId, texture: TextureHandle);
}

/// Host-provided startup parameters.
#[derive(Debug, Clone, Copy)]
pub struct ViewerSetup {
    /// Initial viewport size in pixels.
    pub viewport: Vec2,
    /// Whether the host is a touch device.
    pub is_touch: bool,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// The photo wall core, generic over the render backend.
pub struct WallEngine<B: RenderBackend> {
    backend: B,
    scene: SceneGraph,
    registry: PanelRegistry,
    wall: NodeId,
    camera: Camera,
    choreographer: Choreographer,
    machine: InteractionMachine,
    session: ZoomSession,
    prefetch: PrefetchBridge,
    options: Options,
    viewport: Vec2,
    rng: StdRng,
    now: Instant,
    generation: u64,
    live_request: Option<RequestToken>,
}

impl<B: RenderBackend> WallEngine<B> {
    /// Build the wall from a manifest and spawn the prefetch worker.
    pub fn new<F: ImageFetcher>(
        backend: B,
        fetcher: F,
        manifest: &Manifest,
        options: Options,
        setup: ViewerSetup,
    ) -> Result<Self, WallError> {
        let mut registry = PanelRegistry::from_manifest(manifest)?;
        let mut scene = SceneGraph::new();
        let wall = registry.instantiate(&mut scene, &options.layout);
        let camera = Camera::new(setup.viewport, &options.camera);
        let choreographer =
            Choreographer::new(camera.eye, camera.target, &options.motion);
        let machine = InteractionMachine::new(&options.motion);
        let prefetch = PrefetchBridge::spawn(fetcher)?;
        let rng = match setup.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            backend,
            scene,
            registry,
            wall,
            camera,
            choreographer,
            machine,
            session: ZoomSession::new(setup.is_touch),
            prefetch,
            options,
            viewport: setup.viewport,
            rng,
            now: Instant::now(),
            generation: 0,
            live_request: None,
        })
    }

    /// The scene graph.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The panel registry.
    #[must_use]
    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    /// The current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current phase of the zoom session, derived from the scene.
    #[must_use]
    pub fn zoom_state(&self) -> ZoomState {
        self.session.state(&self.scene)
    }

    /// Whether the hover affordance should currently be shown.
    #[must_use]
    pub fn affordance_visible(&self) -> bool {
        self.machine.affordance().is_visible(self.now)
    }

    /// The placeholder node of `panel`, once the wall is instantiated.
    #[must_use]
    pub fn placeholder_for_panel(&self, panel: PanelId) -> Option<NodeId> {
        self.registry
            .node_for_panel(panel)
            .and_then(|group| self.scene.child_by_name(group, PLACEHOLDER_NAME))
    }

    /// Register a loaded thumbnail texture for `panel` and bind it.
    pub fn attach_thumbnail(&mut self, panel: PanelId, texture: TextureHandle) {
        let Some(group) = self.registry.node_for_panel(panel) else {
            return;
        };
        self.scene.node_mut(group).index_texture = Some(texture);
        if let Some(placeholder) =
            self.scene.child_by_name(group, PLACEHOLDER_NAME)
        {
            self.backend.set_material(placeholder, texture);
        }
    }

    /// Feed one input event through the interaction machine, applying the
    /// resulting command. Returns it for host-side introspection.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<WallCommand> {
        let ctx = PickContext {
            scene: &self.scene,
            camera: &self.camera,
            viewport: self.viewport,
        };
        let command =
            self.machine
                .handle_event(event, &ctx, &self.session, self.now)?;
        self.execute(command);
        Some(command)
    }

    /// Apply one command.
    pub fn execute(&mut self, command: WallCommand) {
        match command {
            WallCommand::ZoomTo { node, via_key } => {
                self.zoom_to_node(node, via_key);
            }
            WallCommand::ExitZoom => self.exit_zoom(),
            WallCommand::Navigate { direction } => self.navigate(direction),
            WallCommand::Overview => {
                self.animate(MoveTarget::Group, MoveOptions::default());
            }
        }
    }

    /// Advance one frame. `dt_ms` must be positive.
    ///
    /// Returns the camera pose for the renderer; the engine's own camera
    /// is updated to match before any picking in this frame's events.
    pub fn tick(&mut self, dt_ms: f32) -> CameraPose {
        self.now += Duration::from_secs_f32(dt_ms / 1000.0);
        self.drain_prefetch();
        let _ = self.choreographer.advance(self.now);
        let pose = self.choreographer.integrate(dt_ms);
        self.camera.eye = pose.eye;
        self.camera.target = pose.look;

        if self.choreographer.velocity()
            < self.options.motion.settle_threshold
        {
            self.fire_approach();
        }

        // Ambient drift chains itself while nothing owns the camera.
        if self.session.target.is_none() && !self.choreographer.is_moving() {
            self.animate(MoveTarget::Random, MoveOptions::default());
        }
        pose
    }

    /// Update the viewport, re-framing the zoomed panel if any.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.camera.resize(width, height);
        if let Some(target) = self.session.target {
            self.animate(
                MoveTarget::Node(target.placeholder),
                MoveOptions::default(),
            );
        }
    }

    fn zoom_to_node(&mut self, node: NodeId, via_key: bool) {
        let Some(panel) = self.registry.panel_for_node(node) else {
            log::warn!("zoom issued against a node with no panel");
            return;
        };
        let Some(group) = self.scene.parent(node) else {
            return;
        };

        if self.scene.node(group).zoom_texture.is_none() {
            self.generation += 1;
            let token = RequestToken {
                panel,
                generation: self.generation,
            };
            self.live_request = Some(token);
            let url = self.registry.panel(panel).zoom_src(self.viewport.x);
            self.prefetch.request(token, url);
        }

        if let Some(previous) = self.session.target {
            if let Some(previous_group) =
                self.scene.parent(previous.placeholder)
            {
                self.scene.node_mut(previous_group).approach_done = false;
            }
        }
        self.session.approach = Some(ApproachAction { placeholder: node });
        self.session.target = Some(ZoomTarget { panel, placeholder: node });
        self.animate(MoveTarget::Node(node), MoveOptions { key: via_key });
    }

    fn exit_zoom(&mut self) {
        let Some(target) = self.session.target.take() else {
            return;
        };
        self.session.approach = None;
        if let Some(group) = self.scene.parent(target.placeholder) {
            self.scene.node_mut(group).approach_done = false;
            if let Some(texture) = self.scene.node(group).index_texture {
                self.backend.set_material(target.placeholder, texture);
            }
        }
        log::debug!("zoom session ended; drift resumes");
    }

    fn navigate(&mut self, direction: Direction) {
        let Some(target) = self.session.target else {
            return;
        };
        let position = self.registry.panel(target.panel).position();
        let next = match direction {
            Direction::Previous => self.registry.previous_position(position),
            Direction::Next => self.registry.next_position(position),
        };
        let Some(panel) = self.registry.panel_at_position(next) else {
            log::warn!("no panel occupies position {next}");
            return;
        };
        if let Some(placeholder) = self.placeholder_for_panel(panel) {
            self.zoom_to_node(placeholder, true);
        }
    }

    /// Run the deferred approach work once motion has settled and the
    /// zoom texture is in. Leaves the action pending while the fetch is
    /// still in flight.
    fn fire_approach(&mut self) {
        let Some(action) = self.session.approach else {
            return;
        };
        let Some(group) = self.scene.parent(action.placeholder) else {
            return;
        };
        let Some(texture) = self.scene.node(group).zoom_texture else {
            return;
        };
        self.session.approach = None;
        self.scene.node_mut(group).approach_done = true;
        self.backend.set_material(action.placeholder, texture);
        log::debug!("approach settled; zoom texture bound");
    }

    /// Marshal prefetch responses onto this thread, dropping any whose
    /// token no longer matches the live request.
    fn drain_prefetch(&mut self) {
        while let Some(response) = self.prefetch.try_recv() {
            if self.live_request != Some(response.token) {
                log::debug!("stale prefetch response dropped");
                continue;
            }
            self.live_request = None;
            match response.result {
                Ok(image) => {
                    let texture = self.backend.upload_texture(&image);
                    if let Some(group) =
                        self.registry.node_for_panel(response.token.panel)
                    {
                        self.scene.node_mut(group).zoom_texture =
                            Some(texture);
                    }
                }
                Err(e) => log::warn!("prefetch failed: {e}"),
            }
        }
    }

    fn animate(&mut self, target: MoveTarget, move_options: MoveOptions) {
        let ctx = MoveContext {
            scene: &self.scene,
            wall: self.wall,
            viewport: self.viewport,
            fovy: self.camera.fovy,
            zfar: self.camera.zfar,
            eye: self.camera.eye,
            motion: &self.options.motion,
        };
        self.choreographer.animate_to(
            target,
            move_options,
            &ctx,
            &mut self.session,
            self.now,
            &mut self.rng,
        );
    }
}
