// File: crates/multiline-core/src/scene.rs
// Summary: Retained drawing surface: groups of styled elements in paint order.
// Notes:
// - Backends (SVG writer, Skia rasterizer) only read a `Scene`; the renderer is
//   the single owner that mutates it.
// - Element ids are stable keys, so raising an element does not invalidate ids
//   held for its siblings.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, RectF};
use crate::theme::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Where the anchor point sits relative to the glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Hanging,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width, cap: LineCap::Butt, join: LineJoin::Miter }
    }

    pub fn rounded(color: Color, width: f32) -> Self {
        Self { color, width, cap: LineCap::Round, join: LineJoin::Round }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    pub weight: FontWeight,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            weight: FontWeight::Normal,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Line { from: Point, to: Point, stroke: Stroke },
    /// Unfilled polyline; each inner vector is one connected run.
    Path { subpaths: Vec<Vec<Point>>, stroke: Stroke, blend: BlendMode },
    Text { at: Point, text: String, style: TextStyle },
    Circle { center: Point, radius: f32, fill: Color },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId {
    group: GroupId,
    key: u32,
}

impl ElementId {
    pub fn group(&self) -> GroupId {
        self.group
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub name: &'static str,
    /// Translation applied to every element of the group.
    pub offset: Point,
    pub visible: bool,
    items: Vec<(u32, Element)>,
    next_key: u32,
}

impl Group {
    fn new(name: &'static str) -> Self {
        Self { name, offset: Point::default(), visible: true, items: Vec::new(), next_key: 0 }
    }

    /// Elements in paint order (first painted first).
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.items.iter().map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: u32) -> Option<usize> {
        self.items.iter().position(|(k, _)| *k == key)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    width: f32,
    height: f32,
    background: Color,
    groups: Vec<Group>,
    hit_region: Option<RectF>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, background: Color::TRANSPARENT, groups: Vec::new(), hit_region: None }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Drop all groups and the hit region. Ids handed out before are stale afterwards.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.hit_region = None;
    }

    pub fn add_group(&mut self, name: &'static str) -> GroupId {
        self.groups.push(Group::new(name));
        GroupId(self.groups.len() - 1)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(id.0)
    }

    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Groups in paint order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Append `element` on top of `group`.
    pub fn push(&mut self, group: GroupId, element: Element) -> Option<ElementId> {
        let g = self.groups.get_mut(group.0)?;
        let key = g.next_key;
        g.next_key += 1;
        g.items.push((key, element));
        Some(ElementId { group, key })
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        let g = self.groups.get(id.group.0)?;
        g.position(id.key).map(|i| &g.items[i].1)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let g = self.groups.get_mut(id.group.0)?;
        let i = g.position(id.key)?;
        Some(&mut g.items[i].1)
    }

    /// Move an element to the top of its group's paint order.
    pub fn raise(&mut self, id: ElementId) -> bool {
        let Some(g) = self.groups.get_mut(id.group.0) else { return false };
        let Some(i) = g.position(id.key) else { return false };
        let item = g.items.remove(i);
        g.items.push(item);
        true
    }

    /// Ids of a group's elements in paint order.
    pub fn paint_order(&self, group: GroupId) -> Vec<ElementId> {
        self.groups
            .get(group.0)
            .map(|g| g.items.iter().map(|(key, _)| ElementId { group, key: *key }).collect())
            .unwrap_or_default()
    }

    /// Transparent region that receives pointer events.
    pub fn set_hit_region(&mut self, rect: RectF) {
        self.hit_region = Some(rect);
    }

    pub fn hit_region(&self) -> Option<RectF> {
        self.hit_region
    }

    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.hit_region.is_some_and(|r| r.contains(x, y))
    }

    pub fn element_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }
}
