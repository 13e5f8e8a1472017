//! Static scene geometry: axes, arrowheads, ticks and labels.
//!
//! The axes and their cone arrowheads are built as soon as a [`Scene`] is
//! created. Ticks and text labels need a [`Font`], which arrives later, so
//! they are attached separately and the scene reports where it stands through
//! [`LabelState`].
//!
//! All geometry is plain colored vertices in world space: line segments as
//! consecutive vertex pairs, cones as triangle lists.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use crate::error::FontError;
use crate::font::Font;

/// Half the length of each axis.
pub const AXIS_EXTENT: f32 = 10.0;
/// Half the length of a tick mark.
pub const TICK_HALF_LENGTH: f32 = 0.2;
/// Height of tick number labels.
pub const TICK_LABEL_SIZE: f32 = 0.3;
/// Height of the `x`/`y`/`z` labels.
pub const AXIS_LABEL_SIZE: f32 = 0.4;
/// Distance of axis-name labels from the origin.
pub const AXIS_LABEL_OFFSET: f32 = 10.5;

const CONE_RADIUS: f32 = 0.2;
const CONE_HEIGHT: f32 = 0.5;
const CONE_SEGMENTS: usize = 32;

/// Convert a `0xRRGGBB` color to RGB in `[0, 1]`.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Vertex layout shared by every pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }
}

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            Axis::X => rgb(0xff0000),
            Axis::Y => rgb(0x00ff00),
            Axis::Z => rgb(0x0000ff),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Direction the tick marks on this axis extend along.
    fn tick_direction(self) -> Vec3 {
        match self {
            Axis::X | Axis::Z => Vec3::Y,
            Axis::Y => Vec3::X,
        }
    }

    /// Where the number label for tick `i` sits.
    fn tick_label_position(self, i: i32) -> Vec3 {
        let at = i as f32 - 0.1;
        match self {
            Axis::X => Vec3::new(at, -0.5, 0.0),
            Axis::Y => Vec3::new(-0.5, at, 0.0),
            Axis::Z => Vec3::new(0.0, -0.5, at),
        }
    }
}

/// Whether the tick marks and text labels are in the scene yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelState {
    /// Waiting on the font.
    Pending,
    /// Ticks and labels are attached.
    Ready,
    /// The font failed to load; the scene stays without labels.
    Unavailable,
}

/// A text label that has been placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vec3,
    pub size: f32,
    pub axis: Axis,
}

/// Everything drawn besides the attractor curve.
#[derive(Debug, Clone)]
pub struct Scene {
    lines: Vec<Vertex>,
    triangles: Vec<Vertex>,
    labels: Vec<Label>,
    tick_count: usize,
    label_state: LabelState,
    /// Bumped whenever the geometry changes so renderers know to re-upload.
    generation: u64,
}

impl Scene {
    /// Build the axes and arrowheads. Labels start out pending.
    pub fn new() -> Self {
        let mut scene = Self {
            lines: Vec::new(),
            triangles: Vec::new(),
            labels: Vec::new(),
            tick_count: 0,
            label_state: LabelState::Pending,
            generation: 0,
        };

        for axis in Axis::ALL {
            let color = axis.color();
            let end = axis.unit() * AXIS_EXTENT;
            scene.push_line(-end, end, color);

            // arrowheads at both ends, apex pointing away from the origin
            for sign in [1.0, -1.0] {
                let outward = axis.unit() * sign;
                let rotation = Quat::from_rotation_arc(Vec3::Y, outward);
                for p in cone(CONE_RADIUS, CONE_HEIGHT, CONE_SEGMENTS) {
                    scene
                        .triangles
                        .push(Vertex::new(rotation * p + outward * AXIS_EXTENT, color));
                }
            }
        }

        scene
    }

    /// Add tick marks, tick numbers and axis names using `font`.
    ///
    /// Returns `true` if the labels were attached by this call. Only the first
    /// call on a pending scene does anything.
    pub fn attach_labels(&mut self, font: &Font) -> bool {
        if self.label_state != LabelState::Pending {
            return false;
        }

        for axis in Axis::ALL {
            let color = axis.color();
            let extent = AXIS_EXTENT as i32;

            for i in -extent..=extent {
                if i == 0 {
                    continue;
                }
                let center = axis.unit() * i as f32;
                let half = axis.tick_direction() * TICK_HALF_LENGTH;
                self.push_line(center - half, center + half, color);
                self.tick_count += 1;

                self.push_label(
                    font,
                    i.unsigned_abs().to_string(),
                    axis.tick_label_position(i),
                    TICK_LABEL_SIZE,
                    axis,
                );
            }

            self.push_label(
                font,
                axis.name().to_string(),
                axis.unit() * AXIS_LABEL_OFFSET,
                AXIS_LABEL_SIZE,
                axis,
            );
        }

        self.label_state = LabelState::Ready;
        self.generation += 1;
        true
    }

    /// Record that labels will never arrive.
    pub fn mark_labels_unavailable(&mut self) {
        if self.label_state == LabelState::Pending {
            self.label_state = LabelState::Unavailable;
        }
    }

    /// Apply the outcome of a font load.
    pub fn resolve_font(&mut self, result: Result<Font, FontError>) {
        match result {
            Ok(font) => {
                if self.attach_labels(&font) {
                    tracing::info!(
                        family = font.family(),
                        labels = self.labels.len(),
                        "axis labels attached"
                    );
                }
            }
            Err(e) => {
                tracing::warn!("font unavailable, axis labels skipped: {e}");
                self.mark_labels_unavailable();
            }
        }
    }

    pub fn label_state(&self) -> LabelState {
        self.label_state
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// Line segments as consecutive vertex pairs.
    pub fn line_vertices(&self) -> &[Vertex] {
        &self.lines
    }

    /// Cone triangles, three vertices each.
    pub fn triangle_vertices(&self) -> &[Vertex] {
        &self.triangles
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn push_line(&mut self, a: Vec3, b: Vec3, color: Vec3) {
        self.lines.push(Vertex::new(a, color));
        self.lines.push(Vertex::new(b, color));
    }

    fn push_label(&mut self, font: &Font, text: String, position: Vec3, size: f32, axis: Axis) {
        for (a, b) in font.text_segments(&text, size) {
            self.push_line(position + a, position + b, axis.color());
        }
        self.labels.push(Label {
            text,
            position,
            size,
            axis,
        });
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangle list for a cone standing on the XZ plane, centered on the origin,
/// apex at `+height / 2`.
fn cone(radius: f32, height: f32, segments: usize) -> Vec<Vec3> {
    let apex = Vec3::new(0.0, height * 0.5, 0.0);
    let base_center = Vec3::new(0.0, -height * 0.5, 0.0);
    let rim = |i: usize| {
        let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
        Vec3::new(radius * theta.sin(), -height * 0.5, radius * theta.cos())
    };

    let mut triangles = Vec::with_capacity(segments * 6);
    for i in 0..segments {
        let (a, b) = (rim(i), rim(i + 1));
        triangles.extend_from_slice(&[apex, a, b]);
        triangles.extend_from_slice(&[base_center, b, a]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> Font {
        Font::from_path(std::path::Path::new(crate::config::DEFAULT_FONT_PATH)).unwrap()
    }

    #[test]
    fn test_new_scene_has_axes_and_arrows_only() {
        let scene = Scene::new();

        assert_eq!(scene.label_state(), LabelState::Pending);
        assert_eq!(scene.line_vertices().len(), 3 * 2);
        assert_eq!(scene.triangle_vertices().len(), 6 * CONE_SEGMENTS * 6);
        assert!(scene.labels().is_empty());
        assert_eq!(scene.tick_count(), 0);
    }

    #[test]
    fn test_axis_colors() {
        assert_eq!(Axis::X.color(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(Axis::Y.color(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(Axis::Z.color(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(rgb(0xffffff), Vec3::ONE);
    }

    #[test]
    fn test_arrow_apexes_point_outward() {
        let scene = Scene::new();
        let apexes: Vec<Vec3> = scene
            .triangle_vertices()
            .chunks(3 * 2 * CONE_SEGMENTS)
            .map(|cone| Vec3::from_array(cone[0].position))
            .collect();

        let expected = [
            Vec3::X * 10.25,
            Vec3::NEG_X * 10.25,
            Vec3::Y * 10.25,
            Vec3::NEG_Y * 10.25,
            Vec3::Z * 10.25,
            Vec3::NEG_Z * 10.25,
        ];
        assert_eq!(apexes.len(), 6);
        for (got, want) in apexes.iter().zip(expected) {
            assert!((*got - want).length() < 1e-5, "{got} != {want}");
        }
    }

    #[test]
    fn test_attach_labels() {
        let mut scene = Scene::new();
        let before = scene.generation();

        assert!(scene.attach_labels(&font()));

        assert_eq!(scene.label_state(), LabelState::Ready);
        assert_eq!(scene.tick_count(), 60);
        assert_eq!(scene.labels().len(), 63);
        assert!(scene.generation() > before);

        let names: Vec<&str> = scene
            .labels()
            .iter()
            .filter(|l| l.size == AXIS_LABEL_SIZE)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_tick_labels_use_absolute_value() {
        let mut scene = Scene::new();
        scene.attach_labels(&font());

        let x_labels: Vec<&Label> = scene
            .labels()
            .iter()
            .filter(|l| l.axis == Axis::X && l.size == TICK_LABEL_SIZE)
            .collect();
        assert_eq!(x_labels.len(), 20);
        assert_eq!(x_labels[0].text, "10");
        assert!((x_labels[0].position - Vec3::new(-10.1, -0.5, 0.0)).length() < 1e-6);
        assert!(x_labels.iter().all(|l| l.text != "0"));

        let z_three = scene
            .labels()
            .iter()
            .find(|l| l.axis == Axis::Z && l.text == "3" && l.position.z > 0.0)
            .unwrap();
        assert!((z_three.position - Vec3::new(0.0, -0.5, 2.9)).length() < 1e-6);
    }

    #[test]
    fn test_attach_is_one_shot() {
        let mut scene = Scene::new();
        let font = font();
        scene.attach_labels(&font);
        let lines = scene.line_vertices().len();
        let generation = scene.generation();

        assert!(!scene.attach_labels(&font));
        assert_eq!(scene.line_vertices().len(), lines);
        assert_eq!(scene.generation(), generation);
    }

    #[test]
    fn test_font_failure_leaves_scene_unlabelled() {
        let mut scene = Scene::new();
        scene.resolve_font(Err(FontError::LoaderDisconnected));

        assert_eq!(scene.label_state(), LabelState::Unavailable);
        assert_eq!(scene.line_vertices().len(), 6);

        // a late font does not revive labels
        assert!(!scene.attach_labels(&font()));
        assert_eq!(scene.label_state(), LabelState::Unavailable);
    }
}
