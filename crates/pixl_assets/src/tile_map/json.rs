//! Tiled JSON maps, with the same restrictions as the XML loader.

use anyhow::{bail, Context, Result};
use pixl_geometry::Size;
use serde::Deserialize;

use super::{atlas_index, TileMapDescription, DEFAULT_TILE_SIZE};

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
struct Map {
    width: u32,
    height: u32,
    #[serde(default = "default_tile_size")]
    tilewidth: u32,
    #[serde(default = "default_tile_size")]
    tileheight: u32,
    #[serde(default)]
    tilesets: Vec<Tileset>,
    #[serde(default)]
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
struct Tileset {
    firstgid: u32,
    source: Option<String>,
    image: Option<String>,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
struct Layer {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    encoding: Option<String>,
    #[serde(default)]
    data: Vec<u32>,
}

pub(super) fn parse(json: &str) -> Result<TileMapDescription> {
    let map: Map = serde_json::from_str(json)?;

    let tileset = map.tilesets.first().context("map has no tileset")?;
    if let Some(source) = &tileset.source {
        bail!("external tileset {source} is not supported");
    }
    let image = tileset.image.as_ref().context("tileset has no image")?;

    let layer = map
        .layers
        .iter()
        .find(|l| l.kind == "tilelayer")
        .context("map has no tile layer")?;

    if let Some(encoding) = layer.encoding.as_deref().filter(|e| *e != "csv") {
        bail!("unsupported layer encoding {encoding:?}");
    }

    let tiles = layer
        .data
        .iter()
        .map(|&gid| atlas_index(gid, tileset.firstgid))
        .collect::<Result<_>>()?;

    Ok(TileMapDescription {
        size: Size::new(layer.width, layer.height),
        tile_size: Size::new(map.tilewidth, map.tileheight),
        atlas_source: image.into(),
        atlas_size: Size::new(tileset.imagewidth, tileset.imageheight),
        tiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_tile_layer() {
        let json = r#"{
            "width": 2, "height": 1, "tilewidth": 8, "tileheight": 8,
            "tilesets": [{ "firstgid": 1, "image": "atlas.png", "imagewidth": 32, "imageheight": 16 }],
            "layers": [
                { "type": "objectgroup", "objects": [] },
                { "type": "tilelayer", "width": 2, "height": 1, "data": [3, 1073741825] }
            ]
        }"#;

        let map = parse(json).unwrap();

        assert_eq!(map.size, Size::new(2, 1));
        assert_eq!(map.tile_size, Size::new(8, 8));
        assert_eq!(map.atlas_source.to_str(), Some("atlas.png"));
        assert_eq!(map.atlas_size, Size::new(32, 16));
        assert_eq!(map.tiles, vec![3, 1]);
    }

    #[test]
    fn rejects_base64_layers() {
        let json = r#"{
            "width": 1, "height": 1,
            "tilesets": [{ "firstgid": 1, "image": "a.png", "imagewidth": 16, "imageheight": 16 }],
            "layers": [{ "type": "tilelayer", "width": 1, "height": 1, "encoding": "base64" }]
        }"#;

        assert!(parse(json).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse("{ \"width\": ").is_err());
    }
}
