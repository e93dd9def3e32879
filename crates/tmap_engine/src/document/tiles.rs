use std::collections::BTreeMap;

use crate::{assets::normalize_tile_path, is_empty_tile, sanitize_attribute, EngineError, MapDocument, Result, TileAnimation, EMPTY_TILE, MAX_TILE_COUNT};

/// Old id to new id mapping produced by tile list edits.
///
/// Removed tiles map to [`EMPTY_TILE`]. Holders of cell values outside the
/// document (undo history, clipboards) apply the same mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRemap {
    old_to_new: Vec<u32>,
}

impl TileRemap {
    pub fn apply(&self, value: u32) -> u32 {
        if is_empty_tile(value) {
            return EMPTY_TILE;
        }
        self.old_to_new.get(value as usize).copied().unwrap_or(value)
    }

    fn removal(count: usize, removed: u32) -> Self {
        let old_to_new = (0..count as u32)
            .map(|old| match old.cmp(&removed) {
                std::cmp::Ordering::Less => old,
                std::cmp::Ordering::Equal => EMPTY_TILE,
                std::cmp::Ordering::Greater => old - 1,
            })
            .collect();
        Self { old_to_new }
    }

    fn reorder(new_order: &[u32]) -> Self {
        let mut old_to_new = vec![EMPTY_TILE; new_order.len()];
        for (new_id, old_id) in new_order.iter().enumerate() {
            old_to_new[*old_id as usize] = new_id as u32;
        }
        Self { old_to_new }
    }
}

impl MapDocument {
    // ═══════════════════════════════════════════════════════════════════════
    // Tile list
    // ═══════════════════════════════════════════════════════════════════════

    /// Appends a tile path and returns the new tile id
    pub fn add_tile(&mut self, path: &str) -> Result<u32> {
        if self.tile_paths.len() >= MAX_TILE_COUNT {
            return Err(EngineError::validation("tile list is full"));
        }
        let path = normalize_tile_path(path);
        if path.contains(['\n', '\r']) {
            return Err(EngineError::validation(format!("tile path {path:?} contains a line break")));
        }
        self.tile_paths.push(path);
        Ok((self.tile_paths.len() - 1) as u32)
    }

    /// Removes a tile. Cells showing it become empty, higher ids shift down by one.
    pub fn remove_tile(&mut self, tile: u32) -> Result<TileRemap> {
        self.check_tile(tile)?;
        let remap = TileRemap::removal(self.tile_paths.len(), tile);
        self.tile_paths.remove(tile as usize);
        self.apply_tile_remap(&remap);
        log::debug!("removed tile {tile}, {} tiles left", self.tile_paths.len());
        Ok(remap)
    }

    /// Reorders the tile list. `new_order[new_id]` names the old id placed there.
    pub fn reorder_tiles(&mut self, new_order: &[u32]) -> Result<TileRemap> {
        if new_order.len() != self.tile_paths.len() {
            return Err(EngineError::validation(format!(
                "tile order has {} entries, expected {}",
                new_order.len(),
                self.tile_paths.len()
            )));
        }
        let mut seen = vec![false; new_order.len()];
        for old in new_order {
            match seen.get_mut(*old as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(EngineError::validation(format!("tile order is not a permutation (id {old})"))),
            }
        }

        let remap = TileRemap::reorder(new_order);
        let old_paths = std::mem::take(&mut self.tile_paths);
        self.tile_paths = new_order.iter().map(|old| old_paths[*old as usize].clone()).collect();
        self.apply_tile_remap(&remap);
        Ok(remap)
    }

    /// Swaps a tile with the neighbour `delta` positions away. Returns the new id.
    pub fn move_tile(&mut self, tile: u32, delta: i32) -> Result<(u32, TileRemap)> {
        self.check_tile(tile)?;
        let target = i64::from(tile) + i64::from(delta);
        if target < 0 || target >= self.tile_paths.len() as i64 {
            return Err(EngineError::validation(format!("cannot move tile {tile} by {delta}")));
        }
        let mut order: Vec<u32> = (0..self.tile_paths.len() as u32).collect();
        order.swap(tile as usize, target as usize);
        let remap = self.reorder_tiles(&order)?;
        Ok((target as u32, remap))
    }

    /// Moves a tile to `target`, shifting the tiles in between
    pub fn move_tile_to(&mut self, tile: u32, target: u32) -> Result<TileRemap> {
        self.check_tile(tile)?;
        self.check_tile(target)?;
        let mut order: Vec<u32> = (0..self.tile_paths.len() as u32).collect();
        let moved = order.remove(tile as usize);
        order.insert(target as usize, moved);
        self.reorder_tiles(&order)
    }

    fn apply_tile_remap(&mut self, remap: &TileRemap) {
        for layer in &mut self.layers {
            layer.remap(|value| remap.apply(value));
        }
        self.attributes = remap_keys(std::mem::take(&mut self.attributes), remap);
        self.animations = remap_keys(std::mem::take(&mut self.animations), remap);
    }

    fn check_tile(&self, tile: u32) -> Result<()> {
        if (tile as usize) < self.tile_paths.len() {
            Ok(())
        } else {
            Err(EngineError::TileOutOfRange {
                tile,
                count: self.tile_paths.len(),
            })
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Attributes
    // ═══════════════════════════════════════════════════════════════════════

    /// Adds `attr` to every target tile that does not have it yet.
    /// Returns the number of tiles changed.
    pub fn add_attribute(&mut self, targets: &[u32], attr: &str) -> Result<usize> {
        let attr = sanitize_attribute(attr)?;
        for tile in targets {
            self.check_tile(*tile)?;
        }
        let mut changed = 0;
        for tile in targets {
            let list = self.attributes.entry(*tile).or_default();
            if !list.contains(&attr) {
                list.push(attr.clone());
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Removes `attr` from the target tiles. Returns the number of tiles changed.
    pub fn remove_attribute(&mut self, targets: &[u32], attr: &str) -> usize {
        let attr = attr.trim();
        let mut changed = 0;
        for tile in targets {
            let Some(list) = self.attributes.get_mut(tile) else {
                continue;
            };
            let before = list.len();
            list.retain(|a| a != attr);
            if list.len() != before {
                changed += 1;
            }
            if list.is_empty() {
                self.attributes.remove(tile);
            }
        }
        changed
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Animations
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_animation(&mut self, tile: u32, animation: TileAnimation) -> Result<()> {
        self.check_tile(tile)?;
        self.animations.insert(tile, animation);
        Ok(())
    }

    /// Returns true if the tile had an animation
    pub fn clear_animation(&mut self, tile: u32) -> bool {
        self.animations.remove(&tile).is_some()
    }
}

fn remap_keys<T>(map: BTreeMap<u32, T>, remap: &TileRemap) -> BTreeMap<u32, T> {
    map.into_iter()
        .filter_map(|(key, value)| {
            let key = remap.apply(key);
            (!is_empty_tile(key)).then_some((key, value))
        })
        .collect()
}
