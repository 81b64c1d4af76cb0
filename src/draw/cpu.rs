use vello_cpu::kurbo::Shape as _;

use crate::{
    draw::{frame::FrameRGBA, surface::Surface},
    foundation::{
        core::{Point, Rgba8, SurfaceSize},
        error::{FxError, FxResult},
    },
};

const CIRCLE_TOLERANCE: f64 = 0.05;

/// Software rasteriser backed by `vello_cpu`.
///
/// Draw calls are recorded into a render context and resolved into the pixmap
/// by [`CpuSurface::readback`].
pub struct CpuSurface {
    size: SurfaceSize,
    width: u16,
    height: u16,
    clear_rgba: Option<Rgba8>,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    pub fn new(size: SurfaceSize, clear_rgba: Option<Rgba8>) -> FxResult<Self> {
        let (width, height) = raster_dims(size)?;
        Ok(Self {
            size,
            width,
            height,
            clear_rgba,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn pixel_width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn pixel_height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterises everything drawn since the last clear and returns the pixels.
    pub fn readback(&mut self) -> FxResult<FrameRGBA> {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let data = self.pixmap.data_as_u8_slice().to_vec();
        let expected = usize::from(self.width) * usize::from(self.height) * 4;
        if data.len() != expected {
            return Err(FxError::render(format!(
                "pixmap readback size mismatch: got {} bytes, expected {expected}",
                data.len()
            )));
        }

        Ok(FrameRGBA {
            width: self.pixel_width(),
            height: self.pixel_height(),
            data,
            premultiplied: true,
        })
    }

    fn fill_background(&mut self) {
        if let Some(bg) = self.clear_rgba {
            self.ctx.set_paint(to_cpu_color(bg));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> FxResult<()> {
        let (width, height) = raster_dims(size)?;
        self.size = size;
        if width != self.width || height != self.height {
            tracing::debug!(width, height, "cpu surface reallocated");
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.fill_background();
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&path);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if color.a == 0 || radius <= 0.0 {
            return;
        }
        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    }
}

fn raster_dims(size: SurfaceSize) -> FxResult<(u16, u16)> {
    let (w, h) = size.pixel_dims();
    let width: u16 = w
        .try_into()
        .map_err(|_| FxError::render("surface width exceeds u16"))?;
    let height: u16 = h
        .try_into()
        .map_err(|_| FxError::render("surface height exceeds u16"))?;
    Ok((width, height))
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}
