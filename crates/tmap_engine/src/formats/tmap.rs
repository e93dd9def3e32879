//! `tmap3` map file format
//!
//! ```text
//! "tmap3\n"
//! 7 x u32 BE: tile_count, layer_count, tile_w, tile_h, map_w, map_h, prop_layer (0xFFFFFFFF = none)
//! "\n"
//! tile_count path lines
//! [ "markers\n"  then "<id>,<attr>,<attr>...\n" per tile ]
//! [ "animated\n" then "<id>,<folder>,<frame_ms>,<frame_count>\n" per tile ]
//! "tuvalutorture\n"
//! layer_count blocks of map_w * map_h u32 BE cells, each followed by "\n"
//! "end\n"
//! ```
//!
//! Both optional sections may be missing; when present they come in the order
//! above. Malformed attribute and animation lines are skipped on read.

use std::collections::BTreeMap;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};

use super::{LoadOptions, SaveOptions};
use crate::{
    is_empty_tile, limits, EngineError, Layer, MapDocument, Rectangle, Result, Size, TileAnimation, EMPTY_TILE, MAX_TILE_COUNT,
};

pub const TMAP_MAGIC: &[u8] = b"tmap3\n";
const LEGACY_MAGIC: &[u8] = b"tmap2\n";

const MARKER_ATTRIBUTES: &[u8] = b"markers";
const MARKER_ATTRIBUTES_LEGACY: &[u8] = b"marker";
const MARKER_ANIMATIONS: &[u8] = b"animated";
const MARKER_TERMINATOR: &[u8] = b"tuvalutorture";
const MARKER_END: &[u8] = b"end";

const HEADER_SIZE: usize = 7 * 4;
const NO_PROP_LAYER: u32 = 0xFFFF_FFFF;

// ═══════════════════════════════════════════════════════════════════════════
// Writing
// ═══════════════════════════════════════════════════════════════════════════

/// Serializes the whole canvas of `doc`.
pub fn to_bytes(doc: &MapDocument, options: &SaveOptions) -> Result<Vec<u8>> {
    doc.validate()?;
    if doc.tile_count() == 0 {
        // a zero tile count is rejected by the reader
        return Err(EngineError::validation("map has no tiles"));
    }
    let attribute_lines = attribute_lines(doc)?;
    let animation_lines = animation_lines(doc);

    let size = doc.canvas_size();
    let tile_size = doc.tile_size();
    let width = size.width as usize;
    let height = size.height as usize;

    let mut result = Vec::with_capacity(TMAP_MAGIC.len() + HEADER_SIZE + doc.layer_count() * (size.area() * 4 + 1) + 256);
    result.extend_from_slice(TMAP_MAGIC);
    let prop = doc.prop_layer().map_or(NO_PROP_LAYER, |layer| layer as u32);
    for value in [
        doc.tile_count() as u32,
        doc.layer_count() as u32,
        tile_size.width as u32,
        tile_size.height as u32,
        size.width as u32,
        size.height as u32,
        prop,
    ] {
        result.write_u32::<BigEndian>(value)?;
    }
    result.push(b'\n');

    for path in doc.tile_paths() {
        if path.contains(['\n', '\r']) {
            return Err(EngineError::validation(format!("tile path {path:?} contains a line break")));
        }
        result.extend_from_slice(path.replace('\\', "/").as_bytes());
        result.push(b'\n');
    }

    if !attribute_lines.is_empty() {
        push_line(&mut result, MARKER_ATTRIBUTES);
        for line in &attribute_lines {
            push_line(&mut result, line.as_bytes());
        }
    }
    if !animation_lines.is_empty() {
        push_line(&mut result, MARKER_ANIMATIONS);
        for line in &animation_lines {
            push_line(&mut result, line.as_bytes());
        }
    }
    push_line(&mut result, MARKER_TERMINATOR);

    for layer in doc.layers() {
        for y_out in 0..height {
            let y_src = if options.flip_y { height - 1 - y_out } else { y_out };
            for value in &layer.cells()[y_src * width..(y_src + 1) * width] {
                result.write_u32::<BigEndian>(*value)?;
            }
        }
        result.push(b'\n');
    }
    push_line(&mut result, MARKER_END);
    Ok(result)
}

fn push_line(result: &mut Vec<u8>, line: &[u8]) {
    result.extend_from_slice(line);
    result.push(b'\n');
}

fn attribute_lines(doc: &MapDocument) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for (tile, attrs) in doc.attributes() {
        if *tile as usize >= doc.tile_count() {
            log::warn!("not writing attributes of unknown tile {tile}");
            continue;
        }
        let mut clean = Vec::with_capacity(attrs.len());
        for attr in attrs {
            let attr = attr.trim();
            if attr.is_empty() {
                continue;
            }
            if attr.contains([',', '\n', '\r']) {
                return Err(EngineError::InvalidAttribute { value: attr.to_string() });
            }
            clean.push(attr);
        }
        if !clean.is_empty() {
            lines.push(format!("{tile},{}", clean.join(",")));
        }
    }
    Ok(lines)
}

fn animation_lines(doc: &MapDocument) -> Vec<String> {
    let mut lines = Vec::new();
    for (tile, anim) in doc.animations() {
        let folder = &anim.folder;
        if *tile as usize >= doc.tile_count() || anim.frame_ms == 0 || anim.frame_count == 0 || folder.is_empty() || folder.contains([',', '\n', '\r']) {
            log::warn!("not writing invalid animation of tile {tile}: {anim:?}");
            continue;
        }
        lines.push(format!("{tile},{folder},{},{}", anim.frame_ms, anim.frame_count));
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// Reading
// ═══════════════════════════════════════════════════════════════════════════

/// Parser position in the line oriented part of the file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseState {
    Paths,
    SectionDecision,
    Attributes,
    Animations,
    Layers,
    Done,
}

struct Header {
    tile_count: usize,
    layer_count: usize,
    tile_size: Size,
    map_size: Size,
    prop_layer: u32,
}

impl Header {
    fn read(reader: &mut LineReader<'_>) -> Result<Self> {
        let mut bytes = reader.take(HEADER_SIZE)?;
        let mut fields = [0u32; 7];
        for field in &mut fields {
            *field = bytes.read_u32::<BigEndian>()?;
        }
        reader.skip_newline();

        let [tile_count, layer_count, tile_w, tile_h, map_w, map_h, prop_layer] = fields;
        for (name, value) in [
            ("tile count", tile_count),
            ("layer count", layer_count),
            ("tile width", tile_w),
            ("tile height", tile_h),
            ("map width", map_w),
            ("map height", map_h),
        ] {
            if value == 0 {
                return Err(EngineError::invalid_header(format!("{name} is zero")));
            }
        }
        for (name, value) in [("tile width", tile_w), ("tile height", tile_h), ("map width", map_w), ("map height", map_h)] {
            if value > limits::MAX_DIMENSION as u32 {
                return Err(EngineError::invalid_header(format!("{name} {value} exceeds {}", limits::MAX_DIMENSION)));
            }
        }
        if tile_count as usize > MAX_TILE_COUNT {
            return Err(EngineError::invalid_header(format!("tile count {tile_count} exceeds {MAX_TILE_COUNT}")));
        }

        Ok(Self {
            tile_count: tile_count as usize,
            layer_count: layer_count as usize,
            tile_size: Size::from((tile_w, tile_h)),
            map_size: Size::from((map_w, map_h)),
            prop_layer,
        })
    }
}

struct LineReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LineReader<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(EngineError::TruncatedData {
                needed: len,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Next line without its terminator (and without a trailing `\r`)
    fn read_line(&mut self) -> Result<&'a [u8]> {
        let rest = &self.data[self.pos..];
        let Some(len) = rest.iter().position(|b| *b == b'\n') else {
            return Err(EngineError::TruncatedData {
                needed: rest.len() + 1,
                available: rest.len(),
            });
        };
        self.pos += len + 1;
        let line = &rest[..len];
        Ok(line.strip_suffix(b"\r").unwrap_or(line))
    }

    fn next_nonblank_line(&mut self) -> Result<&'a [u8]> {
        loop {
            let line = self.read_line()?;
            if !line.is_empty() {
                return Ok(line);
            }
        }
    }

    fn skip_newline(&mut self) {
        if self.data.get(self.pos) == Some(&b'\n') {
            self.pos += 1;
        }
    }
}

fn check_magic(data: &[u8]) -> Result<()> {
    if data.starts_with(TMAP_MAGIC) {
        return Ok(());
    }
    if data.starts_with(LEGACY_MAGIC) {
        return Err(EngineError::unsupported_format("legacy tmap2 map, re-save it as tmap3"));
    }
    Err(EngineError::unsupported_format("not a tmap3 map file"))
}

/// Parses a map file. Canvas and drawable both equal the stored map size.
pub fn from_bytes(data: &[u8], options: &LoadOptions) -> Result<MapDocument> {
    check_magic(data)?;
    let mut reader = LineReader::new(data, TMAP_MAGIC.len());
    let header = Header::read(&mut reader)?;

    let mut tile_paths = Vec::new();
    let mut attributes = BTreeMap::new();
    let mut animations = BTreeMap::new();
    let mut layers = Vec::new();

    let mut state = ParseState::Paths;
    while state != ParseState::Done {
        state = match state {
            ParseState::Paths => {
                for id in 0..header.tile_count {
                    let line = reader.read_line()?;
                    let path = String::from_utf8_lossy(line).into_owned();
                    if std::str::from_utf8(line).is_err() {
                        log::warn!("path of tile {id} is not valid UTF-8, reading it as {path:?}");
                    }
                    tile_paths.push(path);
                }
                ParseState::SectionDecision
            }
            ParseState::SectionDecision => match reader.next_nonblank_line()? {
                MARKER_ATTRIBUTES | MARKER_ATTRIBUTES_LEGACY => ParseState::Attributes,
                MARKER_ANIMATIONS => ParseState::Animations,
                MARKER_TERMINATOR => ParseState::Layers,
                other => {
                    return Err(EngineError::MissingMarker {
                        found: String::from_utf8_lossy(other).into_owned(),
                    })
                }
            },
            ParseState::Attributes => match reader.read_line()? {
                [] => ParseState::Attributes,
                MARKER_ANIMATIONS => ParseState::Animations,
                MARKER_TERMINATOR => ParseState::Layers,
                line => {
                    match parse_attribute_line(line) {
                        Some((tile, attrs)) => {
                            attributes.insert(tile, attrs);
                        }
                        None => log::warn!("skipping malformed attribute line {:?}", String::from_utf8_lossy(line)),
                    }
                    ParseState::Attributes
                }
            },
            ParseState::Animations => match reader.read_line()? {
                [] => ParseState::Animations,
                MARKER_TERMINATOR => ParseState::Layers,
                line => {
                    match parse_animation_line(line) {
                        Some((tile, animation)) => {
                            animations.insert(tile, animation);
                        }
                        None => log::warn!("skipping malformed animation line {:?}", String::from_utf8_lossy(line)),
                    }
                    ParseState::Animations
                }
            },
            ParseState::Layers => {
                for _ in 0..header.layer_count {
                    let block = reader.take(header.map_size.area() * 4)?;
                    reader.skip_newline();
                    layers.push(decode_layer(block, header.map_size, options.flip_y));
                }
                ParseState::Done
            }
            ParseState::Done => ParseState::Done,
        };
    }

    if reader.remaining() > 0 && reader.read_line().ok() != Some(MARKER_END) {
        log::debug!("map file has no end marker");
    }

    let mut doc = MapDocument {
        tile_size: header.tile_size,
        canvas: header.map_size,
        drawable: Rectangle::from_min_size((0, 0), header.map_size),
        layers,
        prop_layer: None,
        tile_paths,
        attributes,
        animations,
    };
    if header.prop_layer != NO_PROP_LAYER {
        if (header.prop_layer as usize) < header.layer_count {
            doc.prop_layer = Some(header.prop_layer as usize);
        } else {
            log::warn!("ignoring out of range prop layer {}", header.prop_layer);
        }
    }
    sanitize_references(&mut doc);
    Ok(doc)
}

/// Cells are stored in file row order; `flip_y` maps file row y to canvas row h-1-y.
fn decode_layer(block: &[u8], size: Size, flip_y: bool) -> Layer {
    let width = size.width as usize;
    let height = size.height as usize;
    let mut cells = vec![EMPTY_TILE; size.area()];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        let (y_file, x) = (i / width, i % width);
        let y = if flip_y { height - 1 - y_file } else { y_file };
        cells[y * width + x] = BigEndian::read_u32(chunk);
    }
    Layer::from_cells(cells)
}

/// Splits `<id>,<rest>...`; parts are trimmed and empty parts dropped.
fn split_id_line(line: &[u8]) -> Option<(u32, Vec<&str>)> {
    let text = std::str::from_utf8(line).ok()?;
    let mut parts = text.split(',');
    let head = parts.next()?.trim();
    if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let tile = head.parse().ok()?;
    let rest = parts.map(str::trim).filter(|p| !p.is_empty()).collect();
    Some((tile, rest))
}

fn parse_attribute_line(line: &[u8]) -> Option<(u32, Vec<String>)> {
    let (tile, parts) = split_id_line(line)?;
    if parts.is_empty() {
        return None;
    }
    Some((tile, parts.into_iter().map(str::to_string).collect()))
}

fn parse_animation_line(line: &[u8]) -> Option<(u32, TileAnimation)> {
    let (tile, parts) = split_id_line(line)?;
    let [folder, frame_ms, frame_count, ..] = parts.as_slice() else {
        return None;
    };
    let animation = TileAnimation::new(*folder, frame_ms.parse().ok()?, frame_count.parse().ok()?).ok()?;
    Some((tile, animation))
}

/// Drops cell values and metadata keys that point past the tile list.
fn sanitize_references(doc: &mut MapDocument) {
    let tile_count = doc.tile_paths.len();
    let mut dropped = 0;
    for layer in &mut doc.layers {
        for cell in layer.cells_mut() {
            if !is_empty_tile(*cell) && *cell as usize >= tile_count {
                *cell = EMPTY_TILE;
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        log::warn!("cleared {dropped} cells referencing missing tiles");
    }

    doc.attributes.retain(|tile, _| {
        let keep = (*tile as usize) < tile_count;
        if !keep {
            log::warn!("dropping attributes of missing tile {tile}");
        }
        keep
    });
    doc.animations.retain(|tile, _| {
        let keep = (*tile as usize) < tile_count;
        if !keep {
            log::warn!("dropping animation of missing tile {tile}");
        }
        keep
    });
}
