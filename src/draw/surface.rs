use crate::foundation::{
    core::{Point, Rgba8, SurfaceSize},
    error::FxResult,
};

/// The 2D drawing target a field renders into.
///
/// Draw calls are infallible; a backend that batches work reports failures when
/// the frame is read back.
pub trait Surface {
    fn size(&self) -> SurfaceSize;

    fn resize(&mut self, size: SurfaceSize) -> FxResult<()>;

    fn clear(&mut self);

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear,
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba8,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
}

/// Keeps the draw calls of the most recent frame.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: SurfaceSize,
    cmds: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            cmds: Vec::new(),
        }
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> FxResult<()> {
        self.size = size;
        Ok(())
    }

    fn clear(&mut self) {
        self.cmds.clear();
        self.cmds.push(DrawCmd::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgba8) {
        self.cmds.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.cmds.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }
}
