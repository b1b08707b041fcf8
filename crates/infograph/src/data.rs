//! Input data model.
//!
//! An infographic is driven by a [`Data`] value: an optional title and
//! description, a list of [`Datum`] items (which may nest through
//! `children`), and structure-specific extra fields kept as raw JSON.
//! Items are addressed by [`IndexPath`].

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// The top-level input of a render call.
///
/// # Examples
///
/// ```
/// use infograph::data::{Data, Datum};
///
/// let data: Data = serde_json::from_str(
///     r#"{ "title": "Team", "items": [{ "label": "Lead" }], "xTitle": "Month" }"#,
/// )
/// .unwrap();
/// assert_eq!(data.title(), Some("Team"));
/// assert_eq!(data.items()[0].label(), Some("Lead"));
/// assert_eq!(data.extra("xTitle").and_then(|v| v.as_str()), Some("Month"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    desc: Option<String>,
    #[serde(default)]
    items: Vec<Datum>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Data {
    pub fn new(items: Vec<Datum>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Attaches a structure-specific top-level field.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn items(&self) -> &[Datum] {
        &self.items
    }

    /// Returns a raw extra field.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Decodes an extra field into `T`; absent and `null` fields are `None`.
    pub fn extra_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        match self.extra.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some),
        }
    }

    /// Finds the datum addressed by `path`.
    pub fn datum(&self, path: &IndexPath) -> Option<&Datum> {
        let (first, rest) = path.as_slice().split_first()?;
        let mut datum = self.items.get(*first)?;
        for index in rest {
            datum = datum.children.as_ref()?.get(*index)?;
        }
        Some(datum)
    }
}

/// A single data item.
///
/// `children` distinguishes "no field" (`None`) from an explicitly empty
/// list; the hierarchy normalization depends on that difference.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Datum>>,
}

impl Datum {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Datum>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the children list, or `None` when the field is absent.
    pub fn children(&self) -> Option<&[Datum]> {
        self.children.as_deref()
    }

    /// Returns `true` when the item has at least one child.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|children| !children.is_empty())
    }

    pub(crate) fn set_children(&mut self, children: Vec<Datum>) {
        self.children = Some(children);
    }
}

/// The position of an item in the (possibly nested) item list.
///
/// # Examples
///
/// ```
/// use infograph::data::IndexPath;
///
/// let path = IndexPath::from(vec![0, 1]);
/// assert_eq!(path.key(), "0-1");
/// assert_eq!(path.child(2).key(), "0-1-2");
/// assert_eq!(path.parent().unwrap().key(), "0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath(Vec<usize>);

impl IndexPath {
    pub fn new(indexes: Vec<usize>) -> Self {
        Self(indexes)
    }

    /// The path of a top-level item.
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Returns the indexes joined by `-`.
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Returns this path extended by `index`.
    pub fn child(&self, index: usize) -> Self {
        let mut indexes = self.0.clone();
        indexes.push(index);
        Self(indexes)
    }

    /// Returns this path without its last index, or `None` for an empty path.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// Returns the path of the following sibling.
    pub fn next_sibling(&self) -> Self {
        match self.0.split_last() {
            Some((last, parent)) => {
                let mut indexes = parent.to_vec();
                indexes.push(last + 1);
                Self(indexes)
            }
            None => Self::top(0),
        }
    }
}

impl From<Vec<usize>> for IndexPath {
    fn from(indexes: Vec<usize>) -> Self {
        Self(indexes)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
