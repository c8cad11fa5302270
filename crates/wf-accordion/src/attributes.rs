//! Attribute transfer between elements.

use wf_accordion_dom::{Attributes, Document, NodeId};

use crate::error::Result;

/// Snapshot of an element's attributes in declaration order.
///
/// Non-element nodes have no attributes and yield an empty list.
pub fn read_attributes(doc: &Document, element: NodeId) -> Attributes {
    doc.attributes(element).cloned().unwrap_or_default()
}

/// Remove every attribute from an element. Idempotent.
pub fn clear_attributes(doc: &mut Document, element: NodeId) -> Result<()> {
    doc.attributes_mut(element)?.clear();
    Ok(())
}

/// Set every attribute of `attributes` on `element`, in order.
pub fn apply_attributes(doc: &mut Document, element: NodeId, attributes: &Attributes) -> Result<()> {
    let target = doc.attributes_mut(element)?;
    for attr in attributes {
        target.set(attr.name.clone(), attr.value.clone());
    }
    Ok(())
}
