//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

use crate::geometry::Region;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM element.
///
/// Every presentation mutation goes through a method that reports whether
/// anything actually changed; real changes bump `revision`, so callers can
/// observe that re-applying an effect is a no-op.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    /// Lowercase tag name (`a`, `section`, `input`...).
    pub tag: String,
    /// Optional unique id (`#id` selector).
    pub id: Option<String>,
    /// Class list, in insertion order.
    pub classes: Vec<String>,
    /// Content attributes (`href`, `data-percent`...).
    pub attributes: BTreeMap<String, String>,
    /// Inline style declarations.
    pub styles: BTreeMap<String, String>,
    /// Text content.
    pub text: String,
    /// Current value of a form control.
    pub value: String,
    /// Border box in document coordinates.
    pub layout: Region,
    revision: u64,
}

impl NodeData {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add several classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self = self.with_class(class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set an inline style (builder).
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the form value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the document-space layout box (builder).
    pub fn with_layout(mut self, layout: Region) -> Self {
        self.layout = layout;
        self
    }

    /// Number of effective presentation mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self, changed: bool) -> bool {
        if changed {
            self.revision += 1;
        }
        changed
    }

    // ── Classes ──────────────────────────────────────────────────────

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        let changed = !self.has_class(class);
        if changed {
            self.classes.push(class.to_owned());
        }
        self.bump(changed)
    }

    /// Remove a class. Returns `false` if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        let changed = self.classes.len() != before;
        self.bump(changed)
    }

    /// Toggle a class. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    // ── Attributes ───────────────────────────────────────────────────

    /// Read an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Write an attribute. Attributes are not presentation and don't bump
    /// the revision.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_owned(), value.into());
    }

    // ── Inline styles ────────────────────────────────────────────────

    /// Read an inline style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Write an inline style property. Returns `false` if the value was
    /// already set to `value`.
    pub fn set_style(&mut self, property: &str, value: &str) -> bool {
        let changed = self.style(property) != Some(value);
        if changed {
            self.styles.insert(property.to_owned(), value.to_owned());
        }
        self.bump(changed)
    }

    /// Whether `display` is set to anything other than `none`.
    ///
    /// An element with no inline `display` counts as hidden: the page's
    /// stylesheet hides errors, the banner and the scroll control until a
    /// script shows them.
    pub fn is_displayed(&self) -> bool {
        matches!(self.style("display"), Some(v) if v != "none")
    }

    // ── Text & form values ───────────────────────────────────────────

    /// Replace the text content. Returns `false` if unchanged.
    pub fn set_text(&mut self, text: &str) -> bool {
        let changed = self.text != text;
        if changed {
            self.text = text.to_owned();
        }
        self.bump(changed)
    }

    /// Whether this element holds a user-editable value.
    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}
