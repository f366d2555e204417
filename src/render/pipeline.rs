use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlFramebuffer, WebGlProgram, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::shaders::*;
use super::webgl::WebGLContext;
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;

const BLOOM_THRESHOLD: f32 = 0.8;
const BLOOM_STRENGTH: f32 = 1.2;
const VIGNETTE_STRENGTH: f32 = 0.35;

const FRAME_IVORY: (f32, f32, f32) = (0.96, 0.94, 0.88);
const PHOTO_SEPIA: (f32, f32, f32) = (0.16, 0.12, 0.10);

/// Cached uniform locations for the foliage point shader
struct FoliageUniforms {
    world: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the instanced ornament shader
struct DecorUniforms {
    world: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the polaroid card shader
struct CardUniforms {
    model: Option<WebGlUniformLocation>,
    world: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for post-processing
struct PostUniforms {
    texture: Option<WebGlUniformLocation>,
    threshold: Option<WebGlUniformLocation>,
    direction: Option<WebGlUniformLocation>,
    scene: Option<WebGlUniformLocation>,
    bloom: Option<WebGlUniformLocation>,
    bloom_strength: Option<WebGlUniformLocation>,
    vignette_strength: Option<WebGlUniformLocation>,
}

/// One ornament family on the GPU: a shared mesh plus per-instance
/// color (static) and model matrix (rewritten every frame).
struct DecorBatch {
    vao: WebGlVertexArrayObject,
    instance_buffer: WebGlBuffer,
    index_count: i32,
    instance_count: i32,
    emissive: f32,
}

/// One static part of the polaroid card (frame or photo inset)
struct CardPart {
    vao: WebGlVertexArrayObject,
    index_count: i32,
    color: (f32, f32, f32),
}

/// Complete render pipeline: scene pass into an offscreen target, then
/// bloom extract, separable blur at half resolution, and composite.
pub struct RenderPipeline {
    ctx: WebGLContext,

    foliage_program: WebGlProgram,
    decor_program: WebGlProgram,
    card_program: WebGlProgram,
    bloom_extract_program: WebGlProgram,
    blur_program: WebGlProgram,
    composite_program: WebGlProgram,

    foliage_uniforms: FoliageUniforms,
    decor_uniforms: DecorUniforms,
    card_uniforms: CardUniforms,
    post_uniforms: PostUniforms,

    foliage_vao: Option<WebGlVertexArrayObject>,
    foliage_buffer: Option<WebGlBuffer>,
    foliage_count: i32,

    decor_batches: Vec<DecorBatch>,

    card_parts: Vec<CardPart>,
    card_transforms: Vec<Mat4>,

    scene_texture: Option<WebGlTexture>,
    scene_fbo: Option<WebGlFramebuffer>,
    bloom_textures: [Option<WebGlTexture>; 2],
    bloom_fbos: [Option<WebGlFramebuffer>; 2],

    width: i32,
    height: i32,

    /// Places the whole ensemble relative to the camera
    world: Mat4,

    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub fov: f32,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        let foliage_program = ctx.create_program(FOLIAGE_VERTEX_SHADER, FOLIAGE_FRAGMENT_SHADER)?;
        let decor_program = ctx.create_program(DECOR_VERTEX_SHADER, DECOR_FRAGMENT_SHADER)?;
        let card_program = ctx.create_program(CARD_VERTEX_SHADER, CARD_FRAGMENT_SHADER)?;
        let bloom_extract_program =
            ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLOOM_EXTRACT_SHADER)?;
        let blur_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, BLUR_SHADER)?;
        let composite_program = ctx.create_program(FULLSCREEN_VERTEX_SHADER, COMPOSITE_SHADER)?;

        let foliage_uniforms = FoliageUniforms {
            world: ctx.get_uniform_location(&foliage_program, "u_world"),
            view: ctx.get_uniform_location(&foliage_program, "u_view"),
            projection: ctx.get_uniform_location(&foliage_program, "u_projection"),
            time: ctx.get_uniform_location(&foliage_program, "u_time"),
        };

        let decor_uniforms = DecorUniforms {
            world: ctx.get_uniform_location(&decor_program, "u_world"),
            view: ctx.get_uniform_location(&decor_program, "u_view"),
            projection: ctx.get_uniform_location(&decor_program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&decor_program, "u_camera_pos"),
            emissive: ctx.get_uniform_location(&decor_program, "u_emissive"),
        };

        let card_uniforms = CardUniforms {
            model: ctx.get_uniform_location(&card_program, "u_model"),
            world: ctx.get_uniform_location(&card_program, "u_world"),
            view: ctx.get_uniform_location(&card_program, "u_view"),
            projection: ctx.get_uniform_location(&card_program, "u_projection"),
            color: ctx.get_uniform_location(&card_program, "u_color"),
        };

        let post_uniforms = PostUniforms {
            texture: ctx.get_uniform_location(&blur_program, "u_texture"),
            threshold: ctx.get_uniform_location(&bloom_extract_program, "u_threshold"),
            direction: ctx.get_uniform_location(&blur_program, "u_direction"),
            scene: ctx.get_uniform_location(&composite_program, "u_scene"),
            bloom: ctx.get_uniform_location(&composite_program, "u_bloom"),
            bloom_strength: ctx.get_uniform_location(&composite_program, "u_bloom_strength"),
            vignette_strength: ctx.get_uniform_location(&composite_program, "u_vignette_strength"),
        };

        let mut pipeline = Self {
            ctx,
            foliage_program,
            decor_program,
            card_program,
            bloom_extract_program,
            blur_program,
            composite_program,
            foliage_uniforms,
            decor_uniforms,
            card_uniforms,
            post_uniforms,
            foliage_vao: None,
            foliage_buffer: None,
            foliage_count: 0,
            decor_batches: Vec::new(),
            card_parts: Vec::new(),
            card_transforms: Vec::new(),
            scene_texture: None,
            scene_fbo: None,
            bloom_textures: [None, None],
            bloom_fbos: [None, None],
            width,
            height,
            world: Mat4::identity(),
            camera_position: Vec3::new(0.0, 4.0, 20.0),
            camera_target: Vec3::new(0.0, 4.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
        };

        pipeline.create_framebuffers()?;

        Ok(pipeline)
    }

    fn create_framebuffers(&mut self) -> Result<(), String> {
        let scene_tex = self.ctx.create_texture(self.width, self.height)?;
        let scene_fbo = self.ctx.create_framebuffer(&scene_tex)?;
        self.scene_texture = Some(scene_tex);
        self.scene_fbo = Some(scene_fbo);

        // Bloom runs at half resolution
        let bloom_width = (self.width / 2).max(1);
        let bloom_height = (self.height / 2).max(1);

        for i in 0..2 {
            let tex = self.ctx.create_texture(bloom_width, bloom_height)?;
            let fbo = self.ctx.create_framebuffer(&tex)?;
            self.bloom_textures[i] = Some(tex);
            self.bloom_fbos[i] = Some(fbo);
        }

        Ok(())
    }

    pub fn set_world_offset(&mut self, offset: Vec3) {
        self.world = Mat4::translation(offset.x, offset.y, offset.z);
    }

    /// Drop all uploaded scene objects ahead of a scene reload.
    pub fn clear_layers(&mut self) {
        self.foliage_vao = None;
        self.foliage_buffer = None;
        self.foliage_count = 0;
        self.decor_batches.clear();
        self.card_parts.clear();
        self.card_transforms.clear();
    }

    /// Upload the foliage point buffer.
    /// Format: position(3) + size(1) + alpha(1) + color(3) = 8 floats per point
    pub fn upload_foliage(&mut self, data: &[f32]) -> Result<(), String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self
            .ctx
            .create_buffer_f32(data, WebGl2RenderingContext::DYNAMIC_DRAW)?;

        let stride = 8 * 4;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, WebGl2RenderingContext::FLOAT, false, stride, 0);

        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 1, WebGl2RenderingContext::FLOAT, false, stride, 12);

        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_with_i32(2, 1, WebGl2RenderingContext::FLOAT, false, stride, 16);

        gl.enable_vertex_attrib_array(3);
        gl.vertex_attrib_pointer_with_i32(3, 3, WebGl2RenderingContext::FLOAT, false, stride, 20);

        gl.bind_vertex_array(None);

        self.foliage_vao = Some(vao);
        self.foliage_buffer = Some(buffer);
        self.foliage_count = (data.len() / 8) as i32;

        Ok(())
    }

    /// Rewrite the foliage buffer with this frame's positions.
    pub fn update_foliage(&mut self, data: &[f32]) {
        if let Some(ref buffer) = self.foliage_buffer {
            self.ctx.update_buffer_f32(buffer, data);
            self.foliage_count = (data.len() / 8) as i32;
        }
    }

    /// Upload one ornament family: shared mesh, static per-instance
    /// colors, and an initial set of per-instance model matrices.
    /// Returns the batch index for later updates.
    pub fn upload_decor_layer(
        &mut self,
        mesh: &Mesh,
        colors: &[f32],
        matrices: &[f32],
        emissive: f32,
    ) -> Result<usize, String> {
        let vao = self.ctx.create_vao()?;
        let gl = &self.ctx.gl;
        gl.bind_vertex_array(Some(&vao));

        // Shared geometry: position(3) + normal(3) + uv(2)
        let vertex_data = mesh.vertex_data();
        let vertex_buffer = self
            .ctx
            .create_buffer_f32(&vertex_data, WebGl2RenderingContext::STATIC_DRAW)?;
        let index_buffer = self
            .ctx
            .create_index_buffer(mesh.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;

        let stride = 8 * 4;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));

        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, WebGl2RenderingContext::FLOAT, false, stride, 0);

        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 3, WebGl2RenderingContext::FLOAT, false, stride, 12);

        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_with_i32(2, 2, WebGl2RenderingContext::FLOAT, false, stride, 24);

        // Per-instance color, uploaded once
        let color_buffer = self
            .ctx
            .create_buffer_f32(colors, WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&color_buffer));
        gl.enable_vertex_attrib_array(3);
        gl.vertex_attrib_pointer_with_i32(3, 3, WebGl2RenderingContext::FLOAT, false, 12, 0);
        gl.vertex_attrib_divisor(3, 1);

        // Per-instance model matrix, four vec4 columns
        let instance_buffer = self
            .ctx
            .create_buffer_f32(matrices, WebGl2RenderingContext::DYNAMIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&instance_buffer));
        for column in 0..4u32 {
            let location = 4 + column;
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(
                location,
                4,
                WebGl2RenderingContext::FLOAT,
                false,
                16 * 4,
                (column * 16) as i32,
            );
            gl.vertex_attrib_divisor(location, 1);
        }

        gl.bind_vertex_array(None);

        self.decor_batches.push(DecorBatch {
            vao,
            instance_buffer,
            index_count: mesh.index_data().len() as i32,
            instance_count: (matrices.len() / 16) as i32,
            emissive,
        });

        Ok(self.decor_batches.len() - 1)
    }

    /// Rewrite one batch's instance matrices with this frame's poses.
    pub fn update_decor_instances(&mut self, index: usize, matrices: &[f32]) {
        if let Some(batch) = self.decor_batches.get(index) {
            self.ctx.update_buffer_f32(&batch.instance_buffer, matrices);
        }
    }

    /// Upload the two static card meshes (ivory frame, photo inset).
    pub fn upload_card_meshes(&mut self, frame: &Mesh, photo: &Mesh) -> Result<(), String> {
        self.card_parts.clear();
        for (mesh, color) in [(frame, FRAME_IVORY), (photo, PHOTO_SEPIA)] {
            let vao = self.ctx.create_vao()?;
            let gl = &self.ctx.gl;
            gl.bind_vertex_array(Some(&vao));

            let vertex_data = mesh.vertex_data();
            let vertex_buffer = self
                .ctx
                .create_buffer_f32(&vertex_data, WebGl2RenderingContext::STATIC_DRAW)?;
            let index_buffer = self
                .ctx
                .create_index_buffer(mesh.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;

            let stride = 8 * 4;
            gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
            gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_with_i32(0, 3, WebGl2RenderingContext::FLOAT, false, stride, 0);

            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_with_i32(1, 3, WebGl2RenderingContext::FLOAT, false, stride, 12);

            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_with_i32(2, 2, WebGl2RenderingContext::FLOAT, false, stride, 24);

            gl.bind_vertex_array(None);

            self.card_parts.push(CardPart {
                vao,
                index_count: mesh.index_data().len() as i32,
                color,
            });
        }
        Ok(())
    }

    /// This frame's card poses, one matrix per polaroid.
    pub fn set_card_transforms(&mut self, transforms: Vec<Mat4>) {
        self.card_transforms = transforms;
    }

    /// Render a frame
    pub fn render(&self, time: f32) {
        let gl = &self.ctx.gl;

        let aspect = self.width as f32 / self.height as f32;
        let projection = Mat4::perspective(self.fov, aspect, 0.1, 200.0);
        let view = Mat4::look_at(self.camera_position, self.camera_target, Vec3::UP);

        // === Pass 1: scene into the offscreen target ===
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, self.scene_fbo.as_ref());
        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(0.01, 0.01, 0.02, 1.0);
        self.ctx.enable_depth_test();
        gl.disable(WebGl2RenderingContext::BLEND);

        // Instanced ornaments
        if !self.decor_batches.is_empty() {
            gl.use_program(Some(&self.decor_program));
            self.ctx
                .uniform_matrix4fv(self.decor_uniforms.world.as_ref(), self.world.as_slice());
            self.ctx
                .uniform_matrix4fv(self.decor_uniforms.view.as_ref(), view.as_slice());
            self.ctx
                .uniform_matrix4fv(self.decor_uniforms.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_3f(
                self.decor_uniforms.camera_pos.as_ref(),
                self.camera_position.x,
                self.camera_position.y,
                self.camera_position.z,
            );

            for batch in &self.decor_batches {
                self.ctx
                    .uniform_1f(self.decor_uniforms.emissive.as_ref(), batch.emissive);
                gl.bind_vertex_array(Some(&batch.vao));
                gl.draw_elements_instanced_with_i32(
                    WebGl2RenderingContext::TRIANGLES,
                    batch.index_count,
                    WebGl2RenderingContext::UNSIGNED_INT,
                    0,
                    batch.instance_count,
                );
            }
        }

        // Polaroid cards, one draw per part per card
        if !self.card_parts.is_empty() && !self.card_transforms.is_empty() {
            gl.use_program(Some(&self.card_program));
            self.ctx
                .uniform_matrix4fv(self.card_uniforms.world.as_ref(), self.world.as_slice());
            self.ctx
                .uniform_matrix4fv(self.card_uniforms.view.as_ref(), view.as_slice());
            self.ctx
                .uniform_matrix4fv(self.card_uniforms.projection.as_ref(), projection.as_slice());

            for transform in &self.card_transforms {
                self.ctx
                    .uniform_matrix4fv(self.card_uniforms.model.as_ref(), transform.as_slice());
                for part in &self.card_parts {
                    self.ctx.uniform_3f(
                        self.card_uniforms.color.as_ref(),
                        part.color.0,
                        part.color.1,
                        part.color.2,
                    );
                    gl.bind_vertex_array(Some(&part.vao));
                    gl.draw_elements_with_i32(
                        WebGl2RenderingContext::TRIANGLES,
                        part.index_count,
                        WebGl2RenderingContext::UNSIGNED_INT,
                        0,
                    );
                }
            }
        }

        // Foliage points, additive over everything
        if self.foliage_vao.is_some() && self.foliage_count > 0 {
            gl.use_program(Some(&self.foliage_program));
            gl.disable(WebGl2RenderingContext::DEPTH_TEST);
            self.ctx.enable_additive_blending();

            self.ctx
                .uniform_matrix4fv(self.foliage_uniforms.world.as_ref(), self.world.as_slice());
            self.ctx
                .uniform_matrix4fv(self.foliage_uniforms.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(
                self.foliage_uniforms.projection.as_ref(),
                projection.as_slice(),
            );
            self.ctx.uniform_1f(self.foliage_uniforms.time.as_ref(), time);

            gl.bind_vertex_array(self.foliage_vao.as_ref());
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, self.foliage_count);
        }

        // === Pass 2: extract bloom ===
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, self.bloom_fbos[0].as_ref());
        self.ctx
            .viewport(0, 0, (self.width / 2).max(1), (self.height / 2).max(1));
        gl.disable(WebGl2RenderingContext::DEPTH_TEST);
        gl.disable(WebGl2RenderingContext::BLEND);

        gl.use_program(Some(&self.bloom_extract_program));
        gl.active_texture(WebGl2RenderingContext::TEXTURE0);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, self.scene_texture.as_ref());
        self.ctx.uniform_1i(self.post_uniforms.texture.as_ref(), 0);
        self.ctx
            .uniform_1f(self.post_uniforms.threshold.as_ref(), BLOOM_THRESHOLD);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);

        // === Pass 3: blur horizontally ===
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, self.bloom_fbos[1].as_ref());
        gl.use_program(Some(&self.blur_program));
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, self.bloom_textures[0].as_ref());
        self.ctx.uniform_2f(self.post_uniforms.direction.as_ref(), 1.0, 0.0);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);

        // === Pass 4: blur vertically ===
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, self.bloom_fbos[0].as_ref());
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, self.bloom_textures[1].as_ref());
        self.ctx.uniform_2f(self.post_uniforms.direction.as_ref(), 0.0, 1.0);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);

        // === Pass 5: composite to screen ===
        gl.bind_framebuffer(WebGl2RenderingContext::FRAMEBUFFER, None);
        self.ctx.viewport(0, 0, self.width, self.height);

        gl.use_program(Some(&self.composite_program));

        gl.active_texture(WebGl2RenderingContext::TEXTURE0);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, self.scene_texture.as_ref());
        self.ctx.uniform_1i(self.post_uniforms.scene.as_ref(), 0);

        gl.active_texture(WebGl2RenderingContext::TEXTURE1);
        gl.bind_texture(WebGl2RenderingContext::TEXTURE_2D, self.bloom_textures[0].as_ref());
        self.ctx.uniform_1i(self.post_uniforms.bloom.as_ref(), 1);

        self.ctx
            .uniform_1f(self.post_uniforms.bloom_strength.as_ref(), BLOOM_STRENGTH);
        self.ctx
            .uniform_1f(self.post_uniforms.vignette_strength.as_ref(), VIGNETTE_STRENGTH);

        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 3);
    }

    /// Resize the render targets
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        self.create_framebuffers()
    }
}
