//! Named colors and the ordered registry that owns them.
//!
//! Names are not unique: the registry keeps duplicates, lookups by name
//! return the first match in insertion order, and iteration always follows
//! insertion order.

use slotmap::{new_key_type, SlotMap};
use tincture_core::Signal;
use tincture_core::logging::targets;

use crate::types::Rgba;

new_key_type! {
    /// Stable handle to a color inside a [`ColorRegistry`].
    pub struct ColorId;
}

/// Payload of [`Color::changed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorChange {
    pub previous: Option<Rgba>,
    pub current: Option<Rgba>,
}

/// A named color.
#[derive(Debug)]
pub struct Color {
    name: String,
    value: Option<Rgba>,
    changed: Signal<ColorChange>,
}

impl Color {
    /// Create a color with an optional value.
    pub fn new(name: impl Into<String>, value: Option<Rgba>) -> Self {
        Self {
            name: name.into(),
            value,
            changed: Signal::new(),
        }
    }

    /// Create a color with a concrete value.
    pub fn with_rgba(name: impl Into<String>, value: Rgba) -> Self {
        Self::new(name, Some(value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<Rgba> {
        self.value
    }

    /// The value, or transparent black when none is assigned.
    pub fn rgba(&self) -> Rgba {
        self.value.unwrap_or(Rgba::TRANSPARENT)
    }

    /// Emitted after the value changes, with the previous and new value.
    pub fn changed(&self) -> &Signal<ColorChange> {
        &self.changed
    }
}

/// Ordered collection of named colors.
#[derive(Debug, Default)]
pub struct ColorRegistry {
    colors: SlotMap<ColorId, Color>,
    order: Vec<ColorId>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a color at the end of the registry.
    pub fn append(&mut self, color: Color) -> ColorId {
        let id = self.colors.insert(color);
        self.order.push(id);
        id
    }

    /// Append several colors, preserving their order.
    pub fn extend(&mut self, colors: impl IntoIterator<Item = Color>) -> Vec<ColorId> {
        colors.into_iter().map(|color| self.append(color)).collect()
    }

    /// Remove a color, disconnecting every observer of its change signal.
    pub fn remove(&mut self, id: ColorId) -> Option<Color> {
        let color = self.colors.remove(id)?;
        self.order.retain(|other| *other != id);
        color.changed.disconnect_all();
        Some(color)
    }

    pub fn get(&self, id: ColorId) -> Option<&Color> {
        self.colors.get(id)
    }

    pub fn contains(&self, id: ColorId) -> bool {
        self.colors.contains_key(id)
    }

    /// The first color with the given name, in insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<&Color> {
        self.find_id(name).and_then(|id| self.colors.get(id))
    }

    /// The id of the first color with the given name, in insertion order.
    pub fn find_id(&self, name: &str) -> Option<ColorId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.colors[*id].name == name)
    }

    /// Iterate colors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorId, &Color)> + '_ {
        self.order.iter().map(move |id| (*id, &self.colors[*id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rename a color. Returns `false` if the id is unknown.
    pub fn rename(&mut self, id: ColorId, name: impl Into<String>) -> bool {
        match self.colors.get_mut(id) {
            Some(color) => {
                color.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Replace a color's value.
    ///
    /// Returns `None` when the id is unknown or the value is unchanged.
    /// Otherwise the color's [`changed`](Color::changed) signal is emitted
    /// before returning the change.
    pub fn set_rgba(&mut self, id: ColorId, value: Option<Rgba>) -> Option<ColorChange> {
        let color = self.colors.get_mut(id)?;
        if color.value == value {
            return None;
        }

        let change = ColorChange {
            previous: std::mem::replace(&mut color.value, value),
            current: value,
        };
        tracing::debug!(
            target: targets::DOCUMENT,
            color = %color.name,
            previous = ?change.previous,
            current = ?change.current,
            "color value changed"
        );
        color.changed.emit(change);
        Some(change)
    }
}
