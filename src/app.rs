use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use c_str_macro::c_str;
use gl;
use log::{info, warn};
use na::{Matrix4, Vector3};
use nalgebra as na;
use sdl2;

use crate::camera::{grid_models, Camera};
use crate::config::Opt;
use crate::controls::Controls;
use crate::quad::{self, Quad};
use crate::render_gl::{self, Gl, GlBackend, Program, RenderContext};
use crate::resources::Resources;

const TEXTURE_UNIT: u32 = 0;

/// Everything drawn each frame: one program, one texture, one quad mesh.
pub struct Scene {
    ctx: RenderContext<Gl>,
    program: Program,
    texture: render_gl::Texture,
    quad: Quad,
    camera: Camera,
    models: Vec<Matrix4<f32>>,
    color_buffer: render_gl::ColorBuffer,
}

impl Scene {
    /// Loads the GL resources. A broken shader or texture is logged and the
    /// scene still runs.
    pub fn new(mut ctx: RenderContext<Gl>, res: &Resources, opt: &Opt) -> Self {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
        }

        let color_buffer = render_gl::ColorBuffer::from_color(Vector3::zeros());
        color_buffer.set_used();

        let program = Program::from_res(&mut ctx, res, &opt.vertex, &opt.fragment);
        if !program.is_valid() {
            warn!(
                "shader program {} is invalid ({} errors), nothing will be drawn",
                program.name(),
                program.diagnostics().len()
            );
        }
        program.bind(&mut ctx);

        let texture = render_gl::Texture::from_res(res, &opt.texture);
        if !texture.is_valid() {
            warn!("texture {} is missing, quads will sample black", opt.texture);
        }
        texture.bind_to_unit(TEXTURE_UNIT);
        program.set_uniform(&mut ctx, c_str!("tex"), &(TEXTURE_UNIT as i32));

        info!(
            "scene ready: program id {}, texture id {}",
            program.id(),
            texture.id()
        );

        let quad = Quad::new();
        let camera = Camera::orthographic(400.0, opt.rot_speed, opt.move_speed);

        Self {
            ctx,
            program,
            texture,
            quad,
            camera,
            models: grid_models(),
            color_buffer,
        }
    }

    /// Clears, applies input for `dt` seconds and draws the grid.
    pub fn frame(&mut self, controls: &Controls, dt: f32) {
        self.color_buffer.clear();

        self.camera.update(controls, dt);

        self.texture.bind_to_unit(TEXTURE_UNIT);
        draw_grid(
            &mut self.ctx,
            &self.program,
            self.camera.projection(),
            &self.models,
            self.quad.vertex_array(),
        );
    }

    pub fn destroy(self) {
        let Scene { mut ctx, program, .. } = self;
        program.destroy(&mut ctx);
    }
}

/// Uploads `projection * model` to `pvm` and draws the quad in `vao`, once
/// per model. Draws nothing unless `program` is the bound program.
/// Returns the number of draw calls issued.
pub fn draw_grid<B: GlBackend>(
    ctx: &mut RenderContext<B>,
    program: &Program,
    projection: &Matrix4<f32>,
    models: &[Matrix4<f32>],
    vao: gl::types::GLuint,
) -> usize {
    if !program.is_bound(ctx) {
        return 0;
    }
    for model in models {
        let pvm = projection * model;
        program.set_uniform(ctx, c_str!("pvm"), &pvm);
        quad::draw(ctx.backend_mut(), vao);
    }
    models.len()
}

pub fn run(opt: &Opt) -> Result<()> {
    let res = Resources::from_relative_exe_path(&opt.assets).context("resource path error")?;
    info!("asset root: {}", res.root().display());

    let sdl = sdl2::init().map_err(|e| anyhow!(e)).context("sdl init error")?;
    let video_subsystem = sdl
        .video()
        .map_err(|e| anyhow!(e))
        .context("sdl video init error")?;

    {
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_multisample_samples(0);
        let (major, minor) = gl_attr.context_version();
        info!("init OpenGL: version={}.{}", major, minor);
    }

    let window = video_subsystem
        .window("quadgrid", opt.width, opt.height)
        .opengl()
        .position_centered()
        .build()
        .context("window creation error")?;

    let _gl_context = window
        .gl_create_context()
        .map_err(|e| anyhow!(e))
        .context("gl context creation error")?;
    gl::load_with(|s| video_subsystem.gl_get_proc_address(s) as *const std::os::raw::c_void);

    let interval = if opt.no_vsync {
        sdl2::video::SwapInterval::Immediate
    } else {
        sdl2::video::SwapInterval::VSync
    };
    if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
        warn!("failed to set swap interval: {}", e);
    }

    let viewport = render_gl::Viewport::for_window(opt.width as i32, opt.height as i32);
    viewport.set_used();

    let ctx = RenderContext::new(Gl, opt.verbose);
    let mut scene = Scene::new(ctx, &res, opt);

    let mut event_pump = sdl.event_pump().map_err(|e| anyhow!(e))?;
    let mut last_frame = Instant::now();
    'main: loop {
        for event in event_pump.poll_iter() {
            if let sdl2::event::Event::Quit { .. } = event {
                break 'main;
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        let controls = Controls::from_keyboard(&event_pump.keyboard_state());
        if controls.quit {
            break 'main;
        }

        scene.frame(&controls, dt);

        window.gl_swap_window();
    }

    scene.destroy();
    info!("bye");

    Ok(())
}
