//! JSON manifest host for photoslot.
//!
//! Stands in for the image-editing application: the template is a
//! [`TemplateDocument`] read from JSON, and "placing" a photo records the
//! resulting layer (name, geometry, source file, clipping) in the document's
//! layer tree. No pixels are read or written.
//!
//! A paste lands centred on the canvas at the photo's pixel size, the same
//! way an editor pastes into a document without a selection. The pasted layer
//! is then cover-fitted onto its slot, moved directly above it and clipped.

mod document;

pub use document::TemplateDocument;

use photoslot_core::bounds::Bounds;
use photoslot_core::error::{PhotoslotError, Result};
use photoslot_core::naming::NameEntry;
use photoslot_core::placement::{pasted_layer_name, plan_placement, PlacementHost};
use photoslot_core::probe::{display_name, ImageInfo};
use photoslot_core::tree::{Leaf, LayerTree, Node, NodePath};

/// [`PlacementHost`] over an in-memory [`TemplateDocument`].
pub struct ManifestHost {
    document: TemplateDocument,
}

impl ManifestHost {
    pub fn new(document: TemplateDocument) -> Self {
        Self { document }
    }

    pub fn into_document(self) -> TemplateDocument {
        self.document
    }
}

impl PlacementHost for ManifestHost {
    type Image = ImageInfo;

    fn placeholder_tree(&self) -> Option<LayerTree> {
        if self.document.layers.is_empty() {
            None
        } else {
            Some(self.document.layers.clone())
        }
    }

    fn rename_placeholder(&mut self, path: &NodePath, label: &str) -> Result<()> {
        if self.document.layers.rename_leaf(path, label) {
            Ok(())
        } else {
            Err(PhotoslotError::LayerNotFound(path.to_string()))
        }
    }

    fn place(&mut self, image: &ImageInfo, entry: &NameEntry) -> Result<()> {
        let failure = |reason: String| PhotoslotError::PlacementFailure {
            label: entry.label.clone(),
            reason,
        };

        let (slot_path, slot) = self
            .document
            .layers
            .placeholders()
            .find(|(_, leaf)| leaf.name == entry.label)
            .ok_or_else(|| failure("slot layer not found".into()))?;
        let target = slot.bounds;

        let (cx, cy) = self.document.canvas().center();
        let pasted = Bounds::centered(cx, cy, image.width as f64, image.height as f64);
        let plan = plan_placement(&target, &pasted).map_err(|e| match e {
            PhotoslotError::PlacementFailure { reason, .. } => failure(reason),
            other => other,
        })?;

        let layer = Leaf {
            name: pasted_layer_name(&entry.label),
            bounds: plan.bounds,
            placeholder: false,
            source: Some(image.path.clone()),
            clipped: true,
        };
        if !self.document.layers.insert_before(&slot_path, Node::Leaf(layer)) {
            return Err(failure(format!("cannot insert layer at {slot_path}")));
        }

        tracing::debug!(
            "{} scaled {:.1}% and moved ({:.1}, {:.1})",
            pasted_layer_name(&entry.label),
            plan.scale_percent,
            plan.dx,
            plan.dy
        );
        Ok(())
    }

    fn describe(&self, image: &ImageInfo) -> String {
        display_name(&image.path)
    }
}
