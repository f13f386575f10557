//! CPU tessellation of path commands into a single colored triangle mesh.
//!
//! Outlines are tessellated in their local frame with lyon and the resulting
//! vertices are mapped through the command's transform. Stroke widths are
//! therefore in local units and scale with the transform.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, LineCap, LineJoin,
    StrokeOptions, StrokeTessellator, StrokeVertex, TessellationError, VertexBuffers,
};

use crate::coords::{Rect, Transform, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, FillCmd, StrokeCmd};

const MITER_LIMIT: f32 = 10.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct MeshVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Run of consecutive indices sharing one clip rect.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MeshBatch {
    pub indices: Range<u32>,
    pub clip: Option<Rect>,
}

/// Triangle list in logical pixels, in paint order.
pub(crate) struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub batches: Vec<MeshBatch>,

    fill: FillTessellator,
    stroke: StrokeTessellator,
    scratch: VertexBuffers<[f32; 2], u32>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    pub(crate) fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            batches: Vec::new(),
            fill: FillTessellator::new(),
            stroke: StrokeTessellator::new(),
            scratch: VertexBuffers::new(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Rebuilds the mesh from every fill and stroke in `list`. Text is ignored.
    ///
    /// Commands that fail to tessellate are logged and skipped.
    pub(crate) fn rebuild(&mut self, list: &DrawList) {
        self.clear();
        for item in list.items() {
            let start = self.indices.len() as u32;
            let result = match &item.cmd {
                DrawCmd::Fill(cmd) => self.push_fill(cmd),
                DrawCmd::Stroke(cmd) => self.push_stroke(cmd),
                DrawCmd::Text(_) => continue,
            };
            if let Err(e) = result {
                log::warn!("skipping draw command: tessellation failed: {e:?}");
                continue;
            }
            self.extend_batch(start..self.indices.len() as u32, item.clip_rect);
        }
    }

    fn push_fill(&mut self, cmd: &FillCmd) -> Result<(), TessellationError> {
        let Some(path) = build_path(&cmd.points, true) else { return Ok(()) };
        self.clear_scratch();
        let options = FillOptions::default().with_fill_rule(FillRule::EvenOdd);
        self.fill.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut self.scratch, |v: FillVertex| v.position().to_array()),
        )?;
        self.append_scratch(cmd.transform, cmd.color);
        Ok(())
    }

    fn push_stroke(&mut self, cmd: &StrokeCmd) -> Result<(), TessellationError> {
        if cmd.width.is_nan() || cmd.width <= 0.0 {
            return Ok(());
        }
        let Some(path) = build_path(&cmd.points, cmd.closed) else { return Ok(()) };
        self.clear_scratch();
        let options = StrokeOptions::default()
            .with_line_width(cmd.width)
            .with_line_join(LineJoin::Miter)
            .with_miter_limit(MITER_LIMIT)
            .with_line_cap(LineCap::Square);
        self.stroke.tessellate_path(
            &path,
            &options,
            &mut BuffersBuilder::new(&mut self.scratch, |v: StrokeVertex| v.position().to_array()),
        )?;
        self.append_scratch(cmd.transform, cmd.color);
        Ok(())
    }

    fn clear_scratch(&mut self) {
        self.scratch.vertices.clear();
        self.scratch.indices.clear();
    }

    fn append_scratch(&mut self, transform: Transform, color: Color) {
        let base = self.vertices.len() as u32;
        let color = color.to_array();
        self.vertices.extend(self.scratch.vertices.iter().map(|&[x, y]| {
            let p = transform.apply(Vec2::new(x, y));
            MeshVertex { pos: [p.x, p.y], color }
        }));
        self.indices.extend(self.scratch.indices.iter().map(|i| base + i));
    }

    fn extend_batch(&mut self, range: Range<u32>, clip: Option<Rect>) {
        if range.is_empty() {
            return;
        }
        match self.batches.last_mut() {
            Some(last) if last.clip == clip && last.indices.end == range.start => {
                last.indices.end = range.end;
            }
            _ => self.batches.push(MeshBatch { indices: range, clip }),
        }
    }
}

/// Polyline path through `points`. `None` if fewer than two finite points.
fn build_path(points: &[Vec2], closed: bool) -> Option<Path> {
    if points.len() < 2 || !points.iter().all(|p| p.is_finite()) {
        return None;
    }
    let mut builder = Path::builder();
    builder.begin(point(points[0].x, points[0].y));
    for p in &points[1..] {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(closed);
    Some(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn tri_area(mesh: &Mesh) -> f32 {
        mesh.indices
            .chunks_exact(3)
            .map(|t| {
                let [a, b, c] = [t[0], t[1], t[2]].map(|i| mesh.vertices[i as usize].pos);
                ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])).abs() * 0.5
            })
            .sum()
    }

    fn unit_square() -> Vec<Vec2> {
        Rect::new(-0.5, -0.5, 1.0, 1.0).corners().to_vec()
    }

    #[test]
    fn unit_square_fill_covers_transformed_area() {
        let mut t = Transform::identity();
        t.translate(100.0, 50.0);
        t.scale(20.0, 10.0);

        let mut list = DrawList::new();
        list.push_fill(unit_square(), t, Color::RED);

        let mut mesh = Mesh::new();
        mesh.rebuild(&list);

        assert!((tri_area(&mesh) - 200.0).abs() < 1e-2);
        assert!(mesh.vertices.iter().all(|v| v.color == Color::RED.to_array()));
        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.pos[0]).collect();
        assert!(xs.iter().all(|&x| (90.0 - 1e-3..=110.0 + 1e-3).contains(&x)));
    }

    #[test]
    fn even_odd_leaves_pentagram_core_unfilled() {
        use std::f32::consts::PI;

        // Star drawn as one self-intersecting outline; the inner pentagon has winding 2.
        let pts: Vec<Vec2> = (0..5)
            .map(|k| {
                let a = PI / 2.0 + k as f32 * 4.0 * PI / 5.0;
                Vec2::new(a.cos(), a.sin())
            })
            .collect();
        let mut list = DrawList::new();
        list.push_fill(pts, Transform::identity(), Color::BLACK);

        let mut mesh = Mesh::new();
        mesh.rebuild(&list);

        let (s36, s72) = ((PI / 5.0).sin(), (2.0 * PI / 5.0).sin());
        let inner = (2.0 * PI / 5.0).cos() / (PI / 5.0).cos();
        let star = 5.0 * inner * s36;
        let pentagon = 2.5 * inner * inner * s72;
        assert!((tri_area(&mesh) - (star - pentagon)).abs() < 1e-3);
    }

    #[test]
    fn stroke_width_scales_with_transform() {
        let mut t = Transform::identity();
        t.scale(10.0, 10.0);

        let mut list = DrawList::new();
        list.push_stroke(vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)], false, 0.5, t, Color::BLACK);

        let mut mesh = Mesh::new();
        mesh.rebuild(&list);

        // Square caps extend half the width past each end: (4 + 0.5) x 0.5, scaled by 100.
        assert!((tri_area(&mesh) - 225.0).abs() < 1e-1);
        let max_y = mesh.vertices.iter().map(|v| v.pos[1]).fold(f32::MIN, f32::max);
        assert!((max_y - 2.5).abs() < 1e-3);
    }

    #[test]
    fn consecutive_items_with_same_clip_share_a_batch() {
        let clip = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut list = DrawList::new();
        list.push_fill(unit_square(), Transform::identity(), Color::BLACK);
        list.push_clip(clip);
        list.push_fill(unit_square(), Transform::identity(), Color::BLACK);
        list.push_stroke(unit_square(), true, 0.1, Transform::identity(), Color::BLACK);
        list.pop_clip();

        let mut mesh = Mesh::new();
        mesh.rebuild(&list);

        assert_eq!(mesh.batches.len(), 2);
        assert_eq!(mesh.batches[0].clip, None);
        assert_eq!(mesh.batches[1].clip, Some(clip));
        assert_eq!(mesh.batches[1].indices.end as usize, mesh.indices.len());
    }

    #[test]
    fn non_finite_and_zero_width_commands_emit_nothing() {
        let mut list = DrawList::new();
        list.push_fill(vec![Vec2::new(f32::NAN, 0.0); 3], Transform::identity(), Color::BLACK);
        list.push_stroke(unit_square(), true, 0.0, Transform::identity(), Color::BLACK);

        let mut mesh = Mesh::new();
        mesh.rebuild(&list);
        assert!(mesh.is_empty());
        assert!(mesh.batches.is_empty());
    }
}
