use egui::{Color32, Pos2, Rect};

/// A freehand line. Color and thickness are fixed when the stroke is created;
/// points are only appended while the stroke is the history's open command.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    /// Create a stroke starting at a single point
    pub fn new(start: Pos2, thickness: f32, color: Color32) -> Self {
        Self {
            points: vec![start],
            color,
            thickness,
        }
    }

    /// Create a stroke from already recorded points
    pub fn from_points(points: Vec<Pos2>, thickness: f32, color: Color32) -> Self {
        Self {
            points,
            color,
            thickness,
        }
    }

    // Only the command history may grow a stroke, and only while it is open.
    pub(crate) fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// True when the stroke traces at least one visible segment
    pub fn has_segments(&self) -> bool {
        self.points.len() > 1
    }

    /// Bounding box of the points, grown by half the line width
    pub fn bounds(&self) -> Rect {
        let rect = Rect::from_points(&self.points);
        rect.expand(self.thickness / 2.0)
    }
}
