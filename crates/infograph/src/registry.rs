//! The variant registry.
//!
//! Structures and items are looked up by string key. Each entry pairs a
//! plain render function with the set of [`Slot`]s it declares; the
//! composition layer only wires a title or item renderer into a structure
//! that declares the matching slot.
//!
//! The built-in registry is assembled once behind a [`OnceLock`] and is
//! read-only afterwards. Custom registries are built with
//! [`RegistryBuilder`].

use std::{fmt, sync::OnceLock};

use indexmap::IndexMap;
use log::debug;

use infograph_core::scene::SceneNode;

use crate::{
    error::InfographicError,
    items::{self, ItemProps},
    structures::{self, StructureProps},
};

/// Renders one item at the position carried by its props.
pub type ItemFn = fn(&ItemProps<'_>) -> SceneNode;

/// Lays out a whole infographic.
pub type StructureFn = fn(&StructureProps<'_>) -> Result<SceneNode, InfographicError>;

/// A named input a variant consumes from the composition layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Title,
    Item,
    Label,
    Desc,
    Value,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Item => "item",
            Self::Label => "label",
            Self::Desc => "desc",
            Self::Value => "value",
        };
        f.write_str(name)
    }
}

/// The two registry tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Structure,
    Item,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => f.write_str("structure"),
            Self::Item => f.write_str("item"),
        }
    }
}

/// A registered structure.
#[derive(Debug, Clone, Copy)]
pub struct StructureEntry {
    render: StructureFn,
    slots: &'static [Slot],
}

impl StructureEntry {
    pub fn new(render: StructureFn, slots: &'static [Slot]) -> Self {
        Self { render, slots }
    }

    pub fn render(&self) -> StructureFn {
        self.render
    }

    pub fn slots(&self) -> &'static [Slot] {
        self.slots
    }

    pub fn declares(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }
}

/// A registered item.
#[derive(Debug, Clone, Copy)]
pub struct ItemEntry {
    render: ItemFn,
    slots: &'static [Slot],
}

impl ItemEntry {
    pub fn new(render: ItemFn, slots: &'static [Slot]) -> Self {
        Self { render, slots }
    }

    pub fn render(&self) -> ItemFn {
        self.render
    }

    pub fn slots(&self) -> &'static [Slot] {
        self.slots
    }

    pub fn declares(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }
}

/// Collects entries before freezing them into a [`Registry`].
///
/// # Examples
///
/// ```
/// use infograph::items::{self, ItemProps};
/// use infograph::registry::{ItemEntry, RegistryBuilder, Slot};
///
/// let registry = RegistryBuilder::with_builtins()
///     .register_item("my-text", ItemEntry::new(items::plain_text, &[Slot::Label]))
///     .build();
/// assert!(registry.resolve_item("my-text").is_ok());
/// assert!(registry.resolve_item("missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    structures: IndexMap<String, StructureEntry>,
    items: IndexMap<String, ItemEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from every built-in structure and item.
    pub fn with_builtins() -> Self {
        Self::new()
            .register_structure(
                "hierarchy-tree",
                StructureEntry::new(structures::hierarchy_tree, &[Slot::Title, Slot::Item]),
            )
            .register_structure(
                "list-row",
                StructureEntry::new(structures::list_row, &[Slot::Title, Slot::Item]),
            )
            .register_structure(
                "sequence-zigzag",
                StructureEntry::new(structures::sequence_zigzag, &[Slot::Title, Slot::Item]),
            )
            .register_structure(
                "chart-combo",
                StructureEntry::new(structures::chart_combo, &[Slot::Title]),
            )
            .register_item("plain-text", ItemEntry::new(items::plain_text, &[Slot::Label]))
            .register_item(
                "rounded-rect-node",
                ItemEntry::new(items::rounded_rect_node, &[Slot::Label]),
            )
            .register_item(
                "label-desc",
                ItemEntry::new(items::label_desc, &[Slot::Label, Slot::Desc, Slot::Value]),
            )
    }

    /// Registers a structure.
    ///
    /// # Panics
    ///
    /// Panics when `key` is already registered.
    pub fn register_structure(mut self, key: impl Into<String>, entry: StructureEntry) -> Self {
        let key = key.into();
        assert!(
            !self.structures.contains_key(&key),
            "structure `{key}` is already registered"
        );
        self.structures.insert(key, entry);
        self
    }

    /// Registers an item.
    ///
    /// # Panics
    ///
    /// Panics when `key` is already registered.
    pub fn register_item(mut self, key: impl Into<String>, entry: ItemEntry) -> Self {
        let key = key.into();
        assert!(
            !self.items.contains_key(&key),
            "item `{key}` is already registered"
        );
        self.items.insert(key, entry);
        self
    }

    pub fn build(self) -> Registry {
        debug!(
            structures = self.structures.len(),
            items = self.items.len();
            "Registry built"
        );
        Registry {
            structures: self.structures,
            items: self.items,
        }
    }
}

/// An immutable table of structures and items.
#[derive(Debug)]
pub struct Registry {
    structures: IndexMap<String, StructureEntry>,
    items: IndexMap<String, ItemEntry>,
}

impl Registry {
    /// Returns the process-wide registry of built-in variants.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| RegistryBuilder::with_builtins().build())
    }

    /// Looks up a structure by key.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::NotFound`] for an unknown key.
    pub fn resolve_structure(&self, key: &str) -> Result<&StructureEntry, InfographicError> {
        self.structures
            .get(key)
            .ok_or_else(|| InfographicError::NotFound {
                kind: VariantKind::Structure,
                key: key.to_string(),
            })
    }

    /// Looks up an item by key.
    ///
    /// # Errors
    ///
    /// Returns [`InfographicError::NotFound`] for an unknown key.
    pub fn resolve_item(&self, key: &str) -> Result<&ItemEntry, InfographicError> {
        self.items.get(key).ok_or_else(|| InfographicError::NotFound {
            kind: VariantKind::Item,
            key: key.to_string(),
        })
    }

    /// Iterates structure keys in registration order.
    pub fn structure_keys(&self) -> impl Iterator<Item = &str> {
        self.structures.keys().map(String::as_str)
    }

    /// Iterates item keys in registration order.
    pub fn item_keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables() {
        let registry = Registry::builtin();
        assert_eq!(
            registry.structure_keys().collect::<Vec<_>>(),
            vec!["hierarchy-tree", "list-row", "sequence-zigzag", "chart-combo"]
        );
        assert_eq!(
            registry.item_keys().collect::<Vec<_>>(),
            vec!["plain-text", "rounded-rect-node", "label-desc"]
        );
    }

    #[test]
    fn test_declared_slots() {
        let registry = Registry::builtin();
        let chart = registry.resolve_structure("chart-combo").unwrap();
        assert!(chart.declares(Slot::Title));
        assert!(!chart.declares(Slot::Item));

        let label_desc = registry.resolve_item("label-desc").unwrap();
        assert_eq!(label_desc.slots(), &[Slot::Label, Slot::Desc, Slot::Value]);
    }

    #[test]
    fn test_not_found() {
        let err = Registry::builtin().resolve_structure("pie").unwrap_err();
        assert!(matches!(
            err,
            InfographicError::NotFound {
                kind: VariantKind::Structure,
                ref key,
            } if key == "pie"
        ));
        assert_eq!(err.to_string(), "unknown structure `pie`");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let _ = RegistryBuilder::with_builtins()
            .register_item("plain-text", ItemEntry::new(items::plain_text, &[Slot::Label]));
    }
}
