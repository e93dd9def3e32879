use crate::{EngineError, Layer, MapDocument, Result};

impl MapDocument {
    /// Appends an empty layer and returns its index
    pub fn add_layer(&mut self) -> usize {
        self.layers.push(Layer::new(self.canvas));
        self.layers.len() - 1
    }

    /// Removes a layer. The last remaining layer cannot be removed.
    pub fn remove_layer(&mut self, layer: usize) -> Result<()> {
        self.check_layer(layer)?;
        if self.layers.len() == 1 {
            return Err(EngineError::validation("cannot remove the only layer"));
        }
        self.layers.remove(layer);
        self.prop_layer = match self.prop_layer {
            Some(prop) if prop == layer => None,
            Some(prop) if prop > layer => Some(prop - 1),
            other => other,
        };
        Ok(())
    }

    /// Swaps a layer with the one `delta` positions away. Returns its new index.
    pub fn move_layer(&mut self, layer: usize, delta: i32) -> Result<usize> {
        self.check_layer(layer)?;
        let target = layer as i64 + i64::from(delta);
        if target < 0 || target >= self.layers.len() as i64 {
            return Err(EngineError::validation(format!("cannot move layer {layer} by {delta}")));
        }
        let target = target as usize;
        self.layers.swap(layer, target);
        self.prop_layer = match self.prop_layer {
            Some(prop) if prop == layer => Some(target),
            Some(prop) if prop == target => Some(layer),
            other => other,
        };
        Ok(target)
    }

    pub fn set_prop_layer(&mut self, layer: Option<usize>) -> Result<()> {
        if let Some(layer) = layer {
            self.check_layer(layer)?;
        }
        self.prop_layer = layer;
        Ok(())
    }

    pub fn clear_prop_layer(&mut self) {
        self.prop_layer = None;
    }

    pub(crate) fn check_layer(&self, layer: usize) -> Result<()> {
        if layer < self.layers.len() {
            Ok(())
        } else {
            Err(EngineError::LayerOutOfRange {
                layer,
                max: self.layers.len(),
            })
        }
    }
}
