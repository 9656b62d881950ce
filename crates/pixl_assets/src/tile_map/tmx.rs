//! Tiled XML maps. Only the first tileset and the first tile layer are used,
//! and the tileset must be embedded in the map with a single atlas image.

use anyhow::{bail, Context, Result};
use pixl_geometry::Size;
use serde::Deserialize;

use super::{atlas_index, TileMapDescription, DEFAULT_TILE_SIZE};

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

fn default_first_gid() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct Map {
    #[serde(rename = "@width")]
    width: u32,
    #[serde(rename = "@height")]
    height: u32,
    #[serde(rename = "@tilewidth", default = "default_tile_size")]
    tile_width: u32,
    #[serde(rename = "@tileheight", default = "default_tile_size")]
    tile_height: u32,
    #[serde(rename = "tileset", default)]
    tilesets: Vec<Tileset>,
    #[serde(rename = "layer", default)]
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
struct Tileset {
    #[serde(rename = "@firstgid", default = "default_first_gid")]
    first_gid: u32,
    #[serde(rename = "@source")]
    source: Option<String>,
    image: Option<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    #[serde(rename = "@source")]
    source: String,
    #[serde(rename = "@width")]
    width: u32,
    #[serde(rename = "@height")]
    height: u32,
}

#[derive(Debug, Deserialize)]
struct Layer {
    #[serde(rename = "@width")]
    width: u32,
    #[serde(rename = "@height")]
    height: u32,
    data: Data,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(rename = "@encoding")]
    encoding: Option<String>,
    #[serde(rename = "tile", default)]
    tiles: Vec<Tile>,
    #[serde(rename = "$text", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Tile {
    #[serde(rename = "@gid", default)]
    gid: u32,
}

impl Data {
    fn gids(&self) -> Result<Vec<u32>> {
        match self.encoding.as_deref() {
            None => Ok(self.tiles.iter().map(|t| t.gid).collect()),
            Some("csv") => self
                .text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<u32>()
                        .with_context(|| format!("invalid tile id {s:?}"))
                })
                .collect(),
            Some(encoding) => bail!("unsupported layer encoding {encoding:?}"),
        }
    }
}

pub(super) fn parse(xml: &str) -> Result<TileMapDescription> {
    let map: Map = quick_xml::de::from_str(xml)?;

    let tileset = map.tilesets.first().context("map has no tileset")?;
    if let Some(source) = &tileset.source {
        bail!("external tileset {source} is not supported");
    }
    let image = tileset.image.as_ref().context("tileset has no image")?;

    let layer = map.layers.first().context("map has no tile layer")?;
    if (layer.width, layer.height) != (map.width, map.height) {
        log::warn!(
            "layer size {}x{} differs from map size {}x{}",
            layer.width,
            layer.height,
            map.width,
            map.height
        );
    }

    let tiles = layer
        .data
        .gids()?
        .into_iter()
        .map(|gid| atlas_index(gid, tileset.first_gid))
        .collect::<Result<_>>()?;

    Ok(TileMapDescription {
        size: Size::new(layer.width, layer.height),
        tile_size: Size::new(map.tile_width, map.tile_height),
        atlas_source: image.source.clone().into(),
        atlas_size: Size::new(image.width, image.height),
        tiles,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.0" orientation="orthogonal" width="3" height="2" tilewidth="16" tileheight="16">
 <tileset firstgid="1" name="tiles" tilewidth="16" tileheight="16">
  <image source="tile.png" width="64" height="32"/>
 </tileset>
 <layer name="ground" width="3" height="2">
  <data>
   <tile gid="1"/>
   <tile gid="2"/>
   <tile gid="0"/>
   <tile gid="5"/>
   <tile/>
   <tile gid="2147483656"/>
  </data>
 </layer>
</map>
"#;

    #[test]
    fn parses_tile_elements() {
        let map = parse(MAP).unwrap();

        assert_eq!(map.size, Size::new(3, 2));
        assert_eq!(map.tile_size, Size::new(16, 16));
        assert_eq!(map.atlas_source.to_str(), Some("tile.png"));
        assert_eq!(map.atlas_size, Size::new(64, 32));
        assert_eq!(map.tiles, vec![1, 2, 0, 5, 0, 8]);
    }

    #[test]
    fn parses_csv_data() {
        let xml = r#"<map width="2" height="2">
 <tileset firstgid="11"><image source="atlas.png" width="32" height="32"/></tileset>
 <layer width="2" height="2">
  <data encoding="csv">
11,12,
0,14
</data>
 </layer>
</map>"#;

        let map = parse(xml).unwrap();

        assert_eq!(map.tile_size, Size::new(16, 16));
        assert_eq!(map.tiles, vec![1, 2, 0, 4]);
    }

    #[test]
    fn rejects_compressed_layers() {
        let xml = r#"<map width="1" height="1">
 <tileset firstgid="1"><image source="a.png" width="16" height="16"/></tileset>
 <layer width="1" height="1"><data encoding="base64">AQAAAA==</data></layer>
</map>"#;

        assert!(parse(xml).is_err());
    }

    #[test]
    fn rejects_external_tilesets() {
        let xml = r#"<map width="1" height="1">
 <tileset firstgid="1" source="tiles.tsx"/>
 <layer width="1" height="1"><data><tile gid="1"/></data></layer>
</map>"#;

        let error = parse(xml).unwrap_err();
        assert!(error.to_string().contains("tiles.tsx"));
    }

    #[test]
    fn requires_a_layer() {
        let xml = r#"<map width="1" height="1">
 <tileset firstgid="1"><image source="a.png" width="16" height="16"/></tileset>
</map>"#;

        assert!(parse(xml).is_err());
    }
}
