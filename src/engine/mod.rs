//! Per-frame orchestration: the world clock, runtime options, the scene
//! graph and the command vocabulary that mutates them.

pub mod command;

pub use command::ViewerCommand;

use crate::camera::Camera;
use crate::error::LatticeError;
use crate::gpu::RenderContext;
use crate::options::Options;
use crate::renderer::impostor::CutMode;
use crate::renderer::{FloorRenderable, FrameRenderer, LatticeRenderable};
use crate::scene::{default_scene, DrawList, FrameContext, SceneNode};
use crate::time::{FrameTiming, WorldClock};

/// Crystal side-length change per grow/shrink command.
const SIDE_LENGTH_STEP: f32 = 2.0;
/// Cells-per-axis change per add/remove command.
const CELLS_STEP: i32 = 2;
/// Eye distance change per camera command.
const RENDER_DISTANCE_STEP: f32 = 5.0;

/// The diamond-lattice viewer engine.
///
/// Owns the world clock, the options every frame reads and the scene graph.
/// A frame is produced in two steps: [`prepare_frame`](Self::prepare_frame)
/// samples the clock once and records the scene's draws, then a
/// [`FrameRenderer`] replays them. Commands issued between frames take
/// effect on the next one.
///
/// # Usage
///
/// ```ignore
/// let mut engine = LatticeEngine::with_gpu(
///     &context, &renderer, &lattice_shader, &floor_shader, options,
/// )?;
/// // per frame:
/// engine.render_to_surface(&context, &mut renderer)?;
/// // per key press:
/// if let Some(cmd) = input.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
pub struct LatticeEngine {
    clock: WorldClock,
    options: Options,
    scene: SceneNode,
    frame_timing: FrameTiming,
    draws: DrawList,
}

impl LatticeEngine {
    /// Engine driven by the system wall clock.
    #[must_use]
    pub fn new(options: Options, scene: SceneNode) -> Self {
        Self::with_clock(options, scene, WorldClock::new())
    }

    /// Engine driven by the given world clock. The playback options'
    /// initial rate and freeze state are applied to it.
    #[must_use]
    pub fn with_clock(
        options: Options,
        scene: SceneNode,
        mut clock: WorldClock,
    ) -> Self {
        clock.set_playback_rate(options.playback.initial_rate);
        clock.set_frozen(options.playback.start_frozen);
        let frame_timing =
            FrameTiming::new(options.playback.frame_report_interval);
        Self {
            clock,
            options,
            scene,
            frame_timing,
            draws: DrawList::new(),
        }
    }

    /// Build the default floor-and-crystal scene on the GPU.
    ///
    /// Both shaders must export `vs_main`/`fs_main` and bind the renderer's
    /// [`uniform_layout`](FrameRenderer::uniform_layout) at group 0.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::Geometry`] if the unit cell cannot be
    /// generated from `options.geometry`.
    pub fn with_gpu(
        context: &RenderContext,
        renderer: &FrameRenderer,
        lattice_shader: &wgpu::ShaderModule,
        floor_shader: &wgpu::ShaderModule,
        options: Options,
    ) -> Result<Self, LatticeError> {
        let layout = renderer.uniform_layout();
        let lattice = LatticeRenderable::new(
            context,
            lattice_shader,
            layout,
            &options.geometry,
        )?;
        let floor = FloorRenderable::new(
            context,
            floor_shader,
            layout,
            options.display.floor_size,
        );
        Ok(Self::new(options, default_scene(floor, lattice)))
    }

    /// Apply a command.
    pub fn execute(&mut self, cmd: ViewerCommand) {
        log::debug!("execute {cmd:?}");
        let rate = self.clock.playback_rate();
        let lattice = &mut self.options.lattice;
        let display = &mut self.options.display;
        match cmd {
            ViewerCommand::ToggleFreeze => {
                let frozen = self.clock.is_frozen();
                self.clock.set_frozen(!frozen);
            }
            ViewerCommand::HalvePlaybackRate => {
                self.clock.set_playback_rate(rate * 0.5);
            }
            ViewerCommand::DoublePlaybackRate => {
                self.clock.set_playback_rate(rate * 2.0);
            }
            ViewerCommand::ReversePlayback => {
                self.clock.set_playback_rate(-rate);
            }
            ViewerCommand::SetPlaybackRate { rate } => {
                self.clock.set_playback_rate(rate);
            }
            ViewerCommand::ToggleCut(mode) => {
                lattice.cut_mode = lattice.cut_mode.toggled(mode);
            }
            ViewerCommand::ClearCut => lattice.cut_mode = CutMode::Off,
            ViewerCommand::CycleColorMode => {
                lattice.color_mode = lattice.color_mode.next();
            }
            ViewerCommand::CycleImpostorMode => {
                lattice.impostor_mode = lattice.impostor_mode.next();
            }
            ViewerCommand::GrowCrystal => {
                lattice.adjust_side_length(SIDE_LENGTH_STEP);
            }
            ViewerCommand::ShrinkCrystal => {
                lattice.adjust_side_length(-SIDE_LENGTH_STEP);
            }
            ViewerCommand::AddCells => lattice.adjust_cells(CELLS_STEP),
            ViewerCommand::RemoveCells => lattice.adjust_cells(-CELLS_STEP),
            ViewerCommand::ToggleLattice => {
                display.lattice_enabled = !display.lattice_enabled;
            }
            ViewerCommand::ToggleFloor => {
                display.floor_enabled = !display.floor_enabled;
            }
            ViewerCommand::MoveCloser => self
                .options
                .camera
                .adjust_render_distance(-RENDER_DISTANCE_STEP),
            ViewerCommand::MoveAway => self
                .options
                .camera
                .adjust_render_distance(RENDER_DISTANCE_STEP),
        }
    }

    /// Sample the world clock and record this frame's draws.
    ///
    /// Returns `None` without touching the clock for a zero-sized
    /// framebuffer.
    pub fn prepare_frame(
        &mut self,
        width: u32,
        height: u32,
    ) -> Option<&DrawList> {
        let transforms =
            Camera::from_options(&self.options.camera).transforms(width, height)?;
        let time = self.clock.sample_time();
        let frame = FrameContext {
            time,
            options: &self.options,
        };
        self.draws.clear();
        self.scene.render(&frame, &transforms, &mut self.draws);
        Some(&self.draws)
    }

    /// Mark the end of a presented frame. Returns the mean frame duration
    /// whenever a report window completes.
    pub fn end_frame(&mut self) -> Option<web_time::Duration> {
        self.frame_timing.end_frame()
    }

    /// Prepare, draw and present one frame to the context's surface.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain texture could be
    /// acquired. Callers usually resize on `Lost`/`Outdated` and retry on
    /// the next frame.
    pub fn render_to_surface(
        &mut self,
        context: &RenderContext,
        renderer: &mut FrameRenderer,
    ) -> Result<(), wgpu::SurfaceError> {
        let (width, height) = context.size();
        let Some(draws) = self.prepare_frame(width, height) else {
            return Ok(());
        };
        let frame = context.next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(context, &view, draws);
        frame.present();
        let _ = self.end_frame();
        Ok(())
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable options; changes apply from the next frame.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// The world clock.
    #[must_use]
    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// Mutable world clock.
    pub fn clock_mut(&mut self) -> &mut WorldClock {
        &mut self.clock
    }

    /// The scene graph root.
    #[must_use]
    pub fn scene(&self) -> &SceneNode {
        &self.scene
    }

    /// Mutable scene graph root.
    pub fn scene_mut(&mut self) -> &mut SceneNode {
        &mut self.scene
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Release every drawable in the scene. Later frames record nothing.
    pub fn close(&mut self) {
        self.scene.close();
        self.draws.clear();
    }
}
