//! Font loading and glyph atlases.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use tracing::{debug, info};

use crate::error::FontError;
use crate::gpu::GpuContext;

/// Locations tried, in order, when no font path is configured.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Read a font file: the configured path if given, else the first system
/// candidate that exists.
pub fn load_font(configured: Option<&Path>) -> Result<Font, FontError> {
    let path = match configured {
        Some(path) => path.to_path_buf(),
        None => find_system_font(SYSTEM_FONT_CANDIDATES).ok_or(FontError::NotFound)?,
    };

    let data = std::fs::read(&path).map_err(|source| FontError::Read {
        path: path.clone(),
        source,
    })?;
    let font = parse_font(&data)?;
    info!("loaded font {}", path.display());
    Ok(font)
}

pub fn parse_font(data: &[u8]) -> Result<Font, FontError> {
    Font::from_bytes(data, FontSettings::default()).map_err(FontError::Parse)
}

fn find_system_font(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(PathBuf::from)
        .inspect(|p| debug!("probing font {}", p.display()))
        .find(|p| p.is_file())
}

/// Opaque identifier for a font atlas in a [`FontLibrary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontId(pub(crate) usize);

/// Information about a single glyph in the font atlas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphInfo {
    /// UV coordinates in the atlas (x, y, width, height) normalized to [0, 1].
    pub uv: [f32; 4],
    /// Size of the glyph in pixels.
    pub width: u32,
    pub height: u32,
    /// Offset from the cursor position to where the glyph should be drawn.
    pub offset_x: f32,
    pub offset_y: f32,
    /// How far to advance the cursor after this glyph.
    pub advance: f32,
}

/// CPU side of an atlas: the packed R8 bitmap and glyph table.
#[derive(Debug)]
pub struct AtlasBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub glyphs: HashMap<char, GlyphInfo>,
    pub line_height: f32,
}

impl AtlasBitmap {
    /// Rasterize printable ASCII at `size` pixels and pack it into rows.
    pub fn rasterize(font: &Font, size: f32) -> Self {
        let rasterized: Vec<(char, fontdue::Metrics, Vec<u8>)> = (32u8..=126u8)
            .map(char::from)
            .map(|c| {
                let (metrics, bitmap) = font.rasterize(c, size);
                (c, metrics, bitmap)
            })
            .collect();

        let padding = 1u32;
        let (width, height) = atlas_size(
            rasterized
                .iter()
                .map(|(_, m, _)| (m.width as u32, m.height as u32)),
            padding,
        );

        let mut pixels = vec![0u8; (width * height) as usize];
        let mut glyphs = HashMap::new();

        let mut x = padding;
        let mut y = padding;
        let mut row_height = 0u32;

        for (c, metrics, bitmap) in &rasterized {
            let glyph_w = metrics.width as u32;
            let glyph_h = metrics.height as u32;

            if x + glyph_w + padding > width {
                x = padding;
                y += row_height + padding;
                row_height = 0;
            }

            for gy in 0..glyph_h {
                let src = (gy * glyph_w) as usize;
                let dst = ((y + gy) * width + x) as usize;
                pixels[dst..dst + glyph_w as usize]
                    .copy_from_slice(&bitmap[src..src + glyph_w as usize]);
            }

            glyphs.insert(
                *c,
                GlyphInfo {
                    uv: [
                        x as f32 / width as f32,
                        y as f32 / height as f32,
                        glyph_w as f32 / width as f32,
                        glyph_h as f32 / height as f32,
                    ],
                    width: glyph_w,
                    height: glyph_h,
                    offset_x: metrics.xmin as f32,
                    offset_y: metrics.ymin as f32,
                    advance: metrics.advance_width,
                },
            );

            x += glyph_w + padding;
            row_height = row_height.max(glyph_h);
        }

        let line_height = font
            .horizontal_line_metrics(size)
            .map_or(size * 1.2, |m| m.new_line_size);

        Self {
            width,
            height,
            pixels,
            glyphs,
            line_height,
        }
    }
}

/// Smallest power-of-two atlas (starting at 512x512) that fits every glyph
/// with simple row packing.
fn atlas_size(glyphs: impl Iterator<Item = (u32, u32)> + Clone, padding: u32) -> (u32, u32) {
    let mut width = 512u32;
    let mut height = 512u32;

    loop {
        let mut x = padding;
        let mut y = padding;
        let mut row_height = 0u32;
        let mut fits = true;

        for (glyph_w, glyph_h) in glyphs.clone() {
            if x + glyph_w + padding > width {
                x = padding;
                y += row_height + padding;
                row_height = 0;
            }
            if y + glyph_h + padding > height {
                fits = false;
                break;
            }
            x += glyph_w + padding;
            row_height = row_height.max(glyph_h);
        }

        if fits {
            return (width, height);
        }

        if width <= height {
            width *= 2;
        } else {
            height *= 2;
        }
    }
}

/// A font atlas containing pre-rasterized glyphs, uploaded to the GPU.
pub struct FontAtlas {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    glyphs: HashMap<char, GlyphInfo>,
    size: f32,
    line_height: f32,
}

impl FontAtlas {
    pub fn new(gpu: &GpuContext, font: &Font, size: f32) -> Self {
        let bitmap = AtlasBitmap::rasterize(font, size);
        let extent = wgpu::Extent3d {
            width: bitmap.width,
            height: bitmap.height,
            depth_or_array_layers: 1,
        };

        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Font Atlas"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bitmap.width),
                rows_per_image: Some(bitmap.height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Font Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            glyphs: bitmap.glyphs,
            size,
            line_height: bitmap.line_height,
        }
    }

    pub fn glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c)
    }

    /// Pixel size this atlas was rasterized at.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Width of a string in pixels; missing glyphs advance half the size.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|c| self.glyphs.get(&c).map_or(self.size * 0.5, |g| g.advance))
            .sum()
    }
}

/// Loaded atlases, addressed by [`FontId`].
#[derive(Default)]
pub struct FontLibrary {
    atlases: Vec<FontAtlas>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, atlas: FontAtlas) -> FontId {
        let id = FontId(self.atlases.len());
        self.atlases.push(atlas);
        id
    }

    pub fn get(&self, id: FontId) -> Option<&FontAtlas> {
        self.atlases.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FontId, &FontAtlas)> {
        self.atlases.iter().enumerate().map(|(i, a)| (FontId(i), a))
    }

    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }
}
