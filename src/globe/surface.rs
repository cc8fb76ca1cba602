//! Drawing surface seam
//!
//! `DrawSurface` is the subset of an immediate-mode 2D context the globe
//! needs. The web host implements it over `CanvasRenderingContext2d`;
//! `RecordingSurface` captures commands for tests and the headless CLI.

use crate::theme::Rgba;

pub trait DrawSurface {
    /// Drawable size in surface units
    fn size(&self) -> (f64, f64);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);

    fn fill(&mut self, color: Rgba);
    fn stroke(&mut self, color: Rgba, width: f64);

    /// Blur glow applied to subsequent fills; `None` disables it
    fn set_shadow(&mut self, blur: f64, color: Option<Rgba>);

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, std::f64::consts::TAU);
        self.fill(color);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    QuadraticCurveTo { cx: f64, cy: f64, x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64 },
    Fill(Rgba),
    Stroke { color: Rgba, width: f64 },
    Shadow { blur: f64, color: Option<Rgba> },
}

/// In-memory surface that records every call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::Translate { x, y });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.push(DrawCommand::QuadraticCurveTo { cx, cy, x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
        self.push(DrawCommand::Arc { x, y, radius });
    }

    fn fill(&mut self, color: Rgba) {
        self.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, color: Rgba, width: f64) {
        self.push(DrawCommand::Stroke { color, width });
    }

    fn set_shadow(&mut self, blur: f64, color: Option<Rgba>) {
        self.push(DrawCommand::Shadow { blur, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::colors;

    #[test]
    fn default_methods_record_primitives() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.clear();
        surface.fill_circle(1.0, 2.0, 3.0, colors::NEUTRAL);

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::ClearRect { x: 0.0, y: 0.0, width: 100.0, height: 50.0 },
                DrawCommand::BeginPath,
                DrawCommand::Arc { x: 1.0, y: 2.0, radius: 3.0 },
                DrawCommand::Fill(colors::NEUTRAL),
            ]
        );

        assert_eq!(surface.take_commands().len(), 4);
        assert!(surface.commands().is_empty());
    }
}
