//! Owns the GPU passes and draws one frame: the lit scene, then the overlay.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};
use winit::window::Window;

use crate::chrome::{Chrome, OverlayItem, TextStyle};
use crate::color::Color;
use crate::draw2d::Draw2d;
use crate::error::GpuError;
use crate::font::{self, FontAtlas, FontId, FontLibrary};
use crate::gpu::GpuContext;
use crate::mesh::Mesh;
use crate::mesh_pass::MeshPass;
use crate::scene::{Scene, Viewport};

struct TextFonts {
    nav: FontId,
    title: FontId,
}

impl TextFonts {
    fn get(&self, style: TextStyle) -> FontId {
        match style {
            TextStyle::Nav => self.nav,
            TextStyle::Title => self.title,
        }
    }
}

pub struct Renderer {
    gpu: GpuContext,
    mesh_pass: MeshPass,
    draw2d: Draw2d,
    sphere: Mesh,
    fonts: FontLibrary,
    text: Option<TextFonts>,
}

impl Renderer {
    /// Set up the GPU for `window` and upload the scene's geometry.
    ///
    /// A missing or unreadable font is not fatal: the overlay draws without
    /// text and a warning is logged.
    pub fn new(
        window: Arc<Window>,
        scene: &Scene,
        chrome: &Chrome,
        font_path: Option<&Path>,
    ) -> Result<Self, GpuError> {
        let gpu = GpuContext::new(window)?;
        let mesh_pass = MeshPass::new(&gpu);
        let mut draw2d = Draw2d::new(&gpu);
        let sphere = Mesh::from_geometry(&gpu, &scene.mesh.geometry);
        debug!(
            vertices = scene.mesh.geometry.vertices.len(),
            triangles = scene.mesh.geometry.triangle_count(),
            "uploaded sphere"
        );

        let mut fonts = FontLibrary::new();
        let text = match font::load_font(font_path) {
            Ok(font) => {
                let nav = fonts.add(FontAtlas::new(&gpu, &font, chrome.nav_font_size));
                let title = fonts.add(FontAtlas::new(&gpu, &font, chrome.title_font_size));
                draw2d.update_font_bind_groups(&gpu, &fonts);
                Some(TextFonts { nav, title })
            }
            Err(err) => {
                warn!("overlay text disabled: {err}");
                None
            }
        };

        Ok(Self {
            gpu,
            mesh_pass,
            draw2d,
            sphere,
            fonts,
            text,
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.gpu.width(), self.gpu.height())
    }

    /// Resize the surface and depth buffer. Returns whether anything changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let changed = self.gpu.resize(width, height);
        if changed {
            self.mesh_pass.ensure_depth_size(&self.gpu);
        }
        changed
    }

    /// Reconfigure a lost or outdated surface at the current size.
    pub fn reconfigure(&self) {
        self.gpu.reconfigure();
    }

    pub fn render(&mut self, scene: &Scene, chrome: &Chrome) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue_overlay(chrome);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(scene.background)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.mesh_pass.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.mesh_pass
                .render(&self.gpu, &mut render_pass, scene, &self.sphere);
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.draw2d.render(&self.gpu, &mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn queue_overlay(&mut self, chrome: &Chrome) {
        let viewport = self.viewport();
        let fonts = &self.fonts;
        let text = self.text.as_ref();

        let items = chrome.layout(viewport, |style, s| {
            match text.and_then(|t| fonts.get(t.get(style))) {
                Some(atlas) => atlas.measure(s),
                None => s.chars().count() as f32 * chrome.font_size(style) * 0.5,
            }
        });

        self.draw2d.clear();
        for item in items {
            match item {
                OverlayItem::Quad { rect, color } => {
                    self.draw2d
                        .rect(rect.x, rect.y, rect.width, rect.height, color);
                }
                OverlayItem::Label {
                    x,
                    y,
                    style,
                    text: label,
                    color,
                } => {
                    if let Some(fonts_for_text) = text {
                        self.draw2d
                            .text(fonts, fonts_for_text.get(style), x, y, &label, color);
                    }
                }
            }
        }
    }
}

fn clear_color(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}
