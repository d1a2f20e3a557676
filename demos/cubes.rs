//! Ten rotating textured cubes lit by a point light, plus a translucent flag
//! and a vertex-colored tetrahedron.
//!
//! Controls: `W`/`S`/`A`/`D` move, `Space`/`C` rise and sink, the mouse
//! looks around, `1` switches to Phong shading and `2` to Gouraud. `Escape`
//! quits.
//!
//! Textures are read from `assets/wall.jpg` and `assets/flag.png`; missing
//! files are replaced with generated patterns.
//!
//! ```sh
//! RUST_LOG=prism_sandbox=debug cargo run --example cubes
//! ```

use prism_sandbox::gfx::resources::checkerboard;
use prism_sandbox::prelude::*;

const CUBE_POSITIONS: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

const LIGHT_POSITION: [f32; 3] = [0.0, 5.0, 0.0];

/// Corner order of the two triangles drawn for each face, as (u, v) in the unit square.
const FACE_UVS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shading {
    Phong,
    Gouraud,
}

struct Cubes {
    camera: CameraManager,
    cache: PrimitiveCache<RenderEngine>,

    phong: ShaderProgram,
    gouraud: ShaderProgram,
    light_source: ShaderProgram,
    pure_color: ShaderProgram,
    shading: Shading,

    wall: TextureId,
    flag: TextureId,

    cube_vertices: Vec<Vector3<f32>>,
    // texture coordinates then normal, per vertex
    cube_attributes: Vec<Vec<f32>>,
}

/// 36 unindexed vertices of a unit cube with per-face texture coordinates and normals.
fn textured_cube() -> (Vec<Vector3<f32>>, Vec<Vec<f32>>) {
    // each face: normal plus the in-plane axes that u and v run along
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut positions = Vec::with_capacity(36);
    let mut attributes = Vec::with_capacity(36);
    for (normal, u_axis, v_axis) in faces {
        let (n, u_axis, v_axis) = (
            Vector3::from(normal),
            Vector3::from(u_axis),
            Vector3::from(v_axis),
        );
        for [u, v] in FACE_UVS {
            positions.push(n * 0.5 + u_axis * (u - 0.5) + v_axis * (v - 0.5));
            attributes.push(vec![u, v, 0.0, n.x, n.y, n.z]);
        }
    }
    (positions, attributes)
}

fn load_or_generate(
    ctx: &mut SandboxContext,
    path: &str,
    flip: bool,
    fallback: impl FnOnce() -> image::RgbaImage,
) -> TextureId {
    match ctx.textures.load(&ctx.engine, path, flip) {
        Ok(id) => id,
        Err(err) => {
            log::warn!("Using a generated texture instead of {}: {}", path, err);
            ctx.textures.load_rgba(&ctx.engine, fallback(), path)
        }
    }
}

impl Sandbox for Cubes {
    fn init(ctx: &mut SandboxContext) -> anyhow::Result<Self> {
        let (width, height) = ctx.engine.get_surface_size();
        let camera = Camera::with_orientation(
            Vector3::new(0.0, 0.0, -3.0),
            600.0,
            width,
            height,
            Vector3::unit_y(),
            90.0,
            0.0,
        );

        let wall = load_or_generate(ctx, "assets/wall.jpg", false, || {
            checkerboard(256, 8, [181, 101, 29], [222, 184, 135])
        });
        let flag = load_or_generate(ctx, "assets/flag.png", true, || {
            checkerboard(256, 2, [222, 41, 16], [255, 222, 0])
        });
        ctx.textures.set_alpha(flag, 0.5, &ctx.engine);

        let (cube_vertices, cube_attributes) = textured_cube();

        Ok(Self {
            camera: CameraManager::new(camera, CameraController::new(ControllerConfig::default())),
            cache: PrimitiveCache::new(),
            phong: ShaderProgram::phong(&ctx.engine)?,
            gouraud: ShaderProgram::gouraud(&ctx.engine)?,
            light_source: ShaderProgram::light_source(&ctx.engine)?,
            pure_color: ShaderProgram::pure_color(&ctx.engine)?,
            shading: Shading::Phong,
            wall,
            flag,
            cube_vertices,
            cube_attributes,
        })
    }

    fn handle_event(&mut self, event: &AppEvent, _ctx: &mut SandboxContext) -> EventResponse {
        match event {
            AppEvent::KeyPress { key: KeyCode::Digit1, .. } => self.shading = Shading::Phong,
            AppEvent::KeyPress { key: KeyCode::Digit2, .. } => self.shading = Shading::Gouraud,
            _ => {
                self.camera.process_event(event);
            }
        }
        EventResponse::Continue
    }

    fn render(&mut self, ctx: &mut SandboxContext, frame: &FrameInfo) {
        let camera = &self.camera.camera;
        let light = Vector3::from(LIGHT_POSITION);
        let spin = frame.elapsed_millis() / 100.0;

        // the light itself
        let shader = &mut self.light_source;
        shader.activate();
        shader.set_camera(camera);
        shader.set_vec3("light_color", Vector3::new(1.0, 1.0, 1.0));
        let model = Matrix4::from_translation(light) * Matrix4::from_scale(0.2);
        let mut target = DrawTarget::new(&mut ctx.engine, shader);
        let _ = self.cache.build_triangles(
            &mut target,
            "light",
            &self.cube_vertices,
            &[],
            &self.cube_attributes,
            model,
        );

        // lit cubes
        ctx.textures.bind(self.wall, 0, &mut ctx.engine);
        let shader = match self.shading {
            Shading::Phong => &mut self.phong,
            Shading::Gouraud => &mut self.gouraud,
        };
        shader.activate();
        shader.set_camera(camera);
        shader.set_vec3("light_color", Vector3::new(1.0, 1.0, 1.0));
        shader.set_vec3("light_pos", light);
        shader.set_float("alpha", 1.0);
        let axis = Vector3::new(1.0, 0.3, 0.5).normalize();
        let mut target = DrawTarget::new(&mut ctx.engine, &mut *shader);
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let angle = Deg(20.0 * i as f32 + spin);
            let model = Matrix4::from_translation(Vector3::from(*position))
                * Matrix4::from_axis_angle(axis, angle);
            let _ = self.cache.build_triangles(
                &mut target,
                "cube_0",
                &self.cube_vertices,
                &[],
                &self.cube_attributes,
                model,
            );
        }

        // flag, seen from +Z
        ctx.textures.bind(self.flag, 0, &mut ctx.engine);
        let (flag_w, flag_h) = (20.0, 13.334);
        let offset = Vector3::new(-flag_w / 2.0, -flag_h / 2.0, 10.0);
        let corners = [
            Vector3::new(flag_w, 0.0, 10.0) + offset,
            Vector3::new(flag_w, flag_h, 10.0) + offset,
            Vector3::new(0.0, 0.0, 10.0) + offset,
        ];
        let flag_attributes = vec![
            vec![0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
            vec![0.0, 1.0, 0.0, 0.0, 0.0, -1.0],
            vec![1.0, 0.0, 0.0, 0.0, 0.0, -1.0],
            vec![1.0, 1.0, 0.0, 0.0, 0.0, -1.0],
        ];
        let mut target = DrawTarget::new(&mut ctx.engine, &mut *shader);
        let _ = build_rect(&mut self.cache, &mut target, "rect", corners, &flag_attributes);

        // tetrahedron
        let shader = &mut self.pure_color;
        shader.activate();
        shader.set_camera(camera);
        let colors = [
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ];
        let model = Matrix4::from_angle_y(Deg(spin));
        let mut target = DrawTarget::new(&mut ctx.engine, shader);
        let _ = build_tetrahedron_with_model(
            &mut self.cache,
            &mut target,
            "tetrahedron",
            Vector3::new(0.0, 0.0, 6.0),
            Vector3::new(1.0, 1.0, 1.0),
            &colors,
            model,
        );
    }
}

fn main() -> anyhow::Result<()> {
    let options = WindowOptions::default().with_title("cubes");
    SandboxApp::new(options).run::<Cubes>()
}
