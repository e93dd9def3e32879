//! Canvas and drawable geometry transforms
//!
//! All operations validate first and only then touch the document, so a
//! failing call leaves it unchanged.

use crate::{document::check_size, EngineError, Layer, MapDocument, Position, Rectangle, Result, Size, EMPTY_TILE};

impl MapDocument {
    /// Clamps the drawable size to the canvas and centers it (floor division).
    pub fn recenter(&mut self) {
        let size = Size::new(
            self.drawable.size.width.clamp(1, self.canvas.width.max(1)),
            self.drawable.size.height.clamp(1, self.canvas.height.max(1)),
        );
        let start = Position::new((self.canvas.width - size.width) / 2, (self.canvas.height - size.height) / 2);
        self.drawable = Rectangle::new(start, size);
    }

    /// Sets every cell outside the drawable rectangle to empty, on every layer.
    pub fn clear_outside_drawable(&mut self) {
        let drawable = self.drawable;
        let width = self.canvas.width;
        for layer in &mut self.layers {
            for (i, cell) in layer.cells_mut().iter_mut().enumerate() {
                let pos = Position::new(i as i32 % width, i as i32 / width);
                if !drawable.is_inside(pos) {
                    *cell = EMPTY_TILE;
                }
            }
        }
    }

    /// Builds new layers of `target` size holding the current drawable content.
    ///
    /// The content lands centered (or at the origin when `center` is false).
    /// If the target is smaller than the drawable, whatever does not fit is dropped.
    /// The document itself is not modified.
    pub fn build_padded(&self, target: impl Into<Size>, center: bool) -> Result<Vec<Layer>> {
        let target = target.into();
        check_size("target size", target)?;

        let src = self.drawable;
        let dst_start = if center {
            Position::new(((target.width - src.size.width) / 2).max(0), ((target.height - src.size.height) / 2).max(0))
        } else {
            Position::default()
        };
        let copy = Size::new(
            src.size.width.min(target.width - dst_start.x),
            src.size.height.min(target.height - dst_start.y),
        );

        let src_width = self.canvas.width as usize;
        let dst_width = target.width as usize;
        let mut result = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let mut cells = vec![EMPTY_TILE; target.area()];
            for row in 0..copy.height {
                let src_offset = (src.top() + row) as usize * src_width + src.left() as usize;
                let dst_offset = (dst_start.y + row) as usize * dst_width + dst_start.x as usize;
                let len = copy.width as usize;
                let Some(src_row) = layer.cells().get(src_offset..src_offset + len) else {
                    return Err(EngineError::validation(format!("layer shorter than its {} canvas", self.canvas)));
                };
                cells[dst_offset..dst_offset + len].copy_from_slice(src_row);
            }
            result.push(Layer::from_cells(cells));
        }
        Ok(result)
    }

    /// Changes the canvas size, keeping the drawable content centered.
    ///
    /// The drawable shrinks with the canvas when needed; content that no longer
    /// fits is dropped.
    pub fn resize_canvas(&mut self, canvas: impl Into<Size>) -> Result<()> {
        let canvas = canvas.into();
        let layers = self.build_padded(canvas, true)?;
        log::info!("resizing canvas {} -> {canvas}", self.canvas);

        self.layers = layers;
        self.canvas = canvas;
        self.drawable.size = self.drawable.size.min(canvas);
        self.recenter();
        self.clear_outside_drawable();
        Ok(())
    }

    /// Changes the drawable size inside the unchanged canvas.
    ///
    /// Cells keep their canvas coordinates; whatever ends up outside the new
    /// drawable rectangle is cleared.
    pub fn set_drawable_size(&mut self, size: impl Into<Size>) -> Result<()> {
        let size = size.into();
        check_size("drawable size", size)?;
        if size.width > self.canvas.width || size.height > self.canvas.height {
            return Err(EngineError::validation(format!("drawable size {size} exceeds canvas {}", self.canvas)));
        }
        self.drawable.size = size;
        self.recenter();
        self.clear_outside_drawable();
        Ok(())
    }

    /// A copy of this document whose canvas is `target`, built from the
    /// drawable content. The whole new canvas is drawable.
    pub fn padded_copy(&self, target: impl Into<Size>, center: bool) -> Result<MapDocument> {
        let target = target.into();
        let layers = self.build_padded(target, center)?;
        Ok(MapDocument {
            tile_size: self.tile_size,
            canvas: target,
            drawable: Rectangle::from_min_size((0, 0), target),
            layers,
            prop_layer: self.prop_layer,
            tile_paths: self.tile_paths.clone(),
            attributes: self.attributes.clone(),
            animations: self.animations.clone(),
        })
    }

    /// Places freshly loaded content inside the configured maximum canvas.
    ///
    /// The loaded extent becomes the drawable rectangle, centered in a canvas of
    /// `max(configured, loaded)` per axis. Returns the resulting canvas size,
    /// which callers compare against `max_canvas` to detect growth.
    pub fn fit_into_canvas(&mut self, max_canvas: impl Into<Size>) -> Result<Size> {
        let configured = max_canvas.into();
        check_size("maximum canvas", configured)?;
        let loaded = self.drawable.size;
        let canvas = configured.max(loaded);
        if canvas != configured {
            log::info!("loaded map {loaded} exceeds maximum canvas {configured}, growing to {canvas}");
        }

        let layers = self.build_padded(canvas, true)?;
        self.layers = layers;
        self.canvas = canvas;
        self.drawable.size = loaded;
        self.recenter();
        Ok(canvas)
    }
}
