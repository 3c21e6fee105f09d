#![forbid(unsafe_code)]

//! macOS color list (`.clr`) serialization
//!
//! A `.clr` file is an `NSKeyedArchiver` archive stored as a binary property
//! list. The archive holds a single `NSColorList` whose `NSKeys` and
//! `NSColors` arrays list the names and colors in palette order. Colors are
//! stored in the calibrated RGB color space (`NSColorSpace = 1`), with the
//! components written as an ASCII, space separated, NUL terminated string.

use crate::output::atomic::write_atomically;
use crate::palette::PaletteError;
use crate::palette::builder::Palette;
use crate::palette::color::Color;
use plist::{Dictionary, Uid, Value};
use std::io::Cursor;
use std::path::Path;

const ARCHIVER: &str = "NSKeyedArchiver";
const ARCHIVER_VERSION: u64 = 100_000;
const NULL_OBJECT: &str = "$null";

/// `NSColorSpace` value for calibrated RGB
const CALIBRATED_RGB: u64 = 1;
/// `NSColorSpace` value for device RGB, accepted when reading
const DEVICE_RGB: u64 = 2;

/// Write `palette` to `path` as a `.clr` archive
///
/// # Errors
///
/// Returns [`PaletteError::WritePalette`] if the destination can't be
/// written.
pub fn write_palette(palette: &Palette, path: &Path) -> Result<(), PaletteError> {
    let bytes = encode_palette(palette)?;
    write_atomically(path, &bytes).map_err(|source| PaletteError::WritePalette {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode `palette` as binary property list bytes
pub fn encode_palette(palette: &Palette) -> Result<Vec<u8>, PaletteError> {
    let archive = KeyedArchive::from_palette(palette).into_value();
    let mut bytes = Vec::new();
    archive
        .to_writer_binary(&mut bytes)
        .map_err(PaletteError::Encode)?;
    Ok(bytes)
}

/// Read a `.clr` archive from `path`
pub fn read_palette(path: &Path) -> Result<Palette, PaletteError> {
    let bytes = std::fs::read(path).map_err(|source| PaletteError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    decode_palette(&bytes)
}

/// Decode a `.clr` archive from bytes
pub fn decode_palette(bytes: &[u8]) -> Result<Palette, PaletteError> {
    let value = Value::from_reader(Cursor::new(bytes)).map_err(PaletteError::Decode)?;
    ArchiveReader::new(&value)?.palette()
}

/// Builder for the `$objects` table of a keyed archive
struct KeyedArchive {
    objects: Vec<Value>,
    root: Uid,
}

impl KeyedArchive {
    fn from_palette(palette: &Palette) -> Self {
        let mut archive = KeyedArchive {
            objects: vec![Value::String(NULL_OBJECT.to_string())],
            root: Uid::new(0),
        };

        // Reserve the root slot so the color list is object 1, as AppKit does.
        let root = archive.push(Value::Boolean(false));
        archive.root = root;

        let name = archive.push(Value::String(palette.name().to_string()));

        let key_refs: Vec<Uid> = palette
            .keys()
            .map(|key| archive.push(Value::String(key.to_string())))
            .collect();
        let keys = archive.push_array(key_refs);

        let color_class = archive.push_class(&["NSColor", "NSObject"]);
        let color_refs: Vec<Uid> = palette
            .iter()
            .map(|(_, color)| archive.push_color(color, color_class))
            .collect();
        let colors = archive.push_array(color_refs);

        let list_class = archive.push_class(&["NSColorList", "NSObject"]);
        let mut list = Dictionary::new();
        list.insert("NSName".to_string(), Value::Uid(name));
        list.insert("NSKeys".to_string(), Value::Uid(keys));
        list.insert("NSColors".to_string(), Value::Uid(colors));
        list.insert("$class".to_string(), Value::Uid(list_class));
        archive.objects[root.get() as usize] = Value::Dictionary(list);

        archive
    }

    fn push(&mut self, object: Value) -> Uid {
        self.objects.push(object);
        Uid::new((self.objects.len() - 1) as u64)
    }

    fn push_class(&mut self, hierarchy: &[&str]) -> Uid {
        let mut class = Dictionary::new();
        class.insert(
            "$classname".to_string(),
            Value::String(hierarchy[0].to_string()),
        );
        class.insert(
            "$classes".to_string(),
            Value::Array(
                hierarchy
                    .iter()
                    .map(|name| Value::String(name.to_string()))
                    .collect(),
            ),
        );
        self.push(Value::Dictionary(class))
    }

    fn push_array(&mut self, members: Vec<Uid>) -> Uid {
        let class = self.push_class(&["NSArray", "NSObject"]);
        let mut array = Dictionary::new();
        array.insert(
            "NS.objects".to_string(),
            Value::Array(members.into_iter().map(Value::Uid).collect()),
        );
        array.insert("$class".to_string(), Value::Uid(class));
        self.push(Value::Dictionary(array))
    }

    fn push_color(&mut self, color: &Color, class: Uid) -> Uid {
        let mut components =
            format!("{} {} {}", color.red(), color.green(), color.blue()).into_bytes();
        components.push(0);

        let mut object = Dictionary::new();
        object.insert(
            "NSColorSpace".to_string(),
            Value::Integer(CALIBRATED_RGB.into()),
        );
        object.insert("NSRGB".to_string(), Value::Data(components));
        object.insert("$class".to_string(), Value::Uid(class));
        self.push(Value::Dictionary(object))
    }

    fn into_value(self) -> Value {
        let mut top = Dictionary::new();
        top.insert("root".to_string(), Value::Uid(self.root));

        let mut archive = Dictionary::new();
        archive.insert("$archiver".to_string(), Value::String(ARCHIVER.to_string()));
        archive.insert(
            "$version".to_string(),
            Value::Integer(ARCHIVER_VERSION.into()),
        );
        archive.insert("$top".to_string(), Value::Dictionary(top));
        archive.insert("$objects".to_string(), Value::Array(self.objects));
        Value::Dictionary(archive)
    }
}

/// Resolves object references inside a decoded keyed archive
struct ArchiveReader<'a> {
    objects: &'a [Value],
    root: &'a Dictionary,
}

impl<'a> ArchiveReader<'a> {
    fn new(value: &'a Value) -> Result<Self, PaletteError> {
        let archive = value
            .as_dictionary()
            .ok_or_else(|| malformed("archive is not a dictionary"))?;

        if archive.get("$archiver").and_then(Value::as_string) != Some(ARCHIVER) {
            return Err(malformed("not an NSKeyedArchiver archive"));
        }

        let objects = archive
            .get("$objects")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("missing $objects"))?;

        let root_ref = archive
            .get("$top")
            .and_then(Value::as_dictionary)
            .and_then(|top| top.get("root"))
            .ok_or_else(|| malformed("missing $top.root"))?;

        let mut reader = ArchiveReader {
            objects,
            root: archive,
        };
        reader.root = reader.dictionary(root_ref)?;
        Ok(reader)
    }

    fn palette(&self) -> Result<Palette, PaletteError> {
        let name = match self.root.get("NSName") {
            Some(reference) => self.string(reference)?.to_string(),
            None => String::new(),
        };

        let keys = self.array(self.field(self.root, "NSKeys")?)?;
        let colors = self.array(self.field(self.root, "NSColors")?)?;
        if keys.len() != colors.len() {
            return Err(malformed("NSKeys and NSColors differ in length"));
        }

        let mut palette = Palette::new(name);
        for (key, color) in keys.iter().zip(colors) {
            palette.insert(self.string(key)?, self.color(color)?);
        }
        Ok(palette)
    }

    fn field(&self, dict: &'a Dictionary, key: &str) -> Result<&'a Value, PaletteError> {
        dict.get(key)
            .ok_or_else(|| malformed(&format!("missing {}", key)))
    }

    fn resolve(&self, reference: &'a Value) -> Result<&'a Value, PaletteError> {
        match reference {
            Value::Uid(uid) => self
                .objects
                .get(uid.get() as usize)
                .ok_or_else(|| malformed(&format!("dangling reference {}", uid.get()))),
            other => Ok(other),
        }
    }

    fn dictionary(&self, reference: &'a Value) -> Result<&'a Dictionary, PaletteError> {
        self.resolve(reference)?
            .as_dictionary()
            .ok_or_else(|| malformed("expected an archived object"))
    }

    fn string(&self, reference: &'a Value) -> Result<&'a str, PaletteError> {
        let value = self.resolve(reference)?;
        if let Some(text) = value.as_string() {
            return Ok(text);
        }
        // NSMutableString and friends are archived as objects with NS.string
        value
            .as_dictionary()
            .and_then(|dict| dict.get("NS.string"))
            .and_then(Value::as_string)
            .ok_or_else(|| malformed("expected a string"))
    }

    fn array(&self, reference: &'a Value) -> Result<&'a [Value], PaletteError> {
        let value = self.resolve(reference)?;
        if let Some(items) = value.as_array() {
            return Ok(items);
        }
        self.dictionary(reference)?
            .get("NS.objects")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| malformed("expected an array"))
    }

    fn color(&self, reference: &'a Value) -> Result<Color, PaletteError> {
        let object = self.dictionary(reference)?;
        let space = object
            .get("NSColorSpace")
            .and_then(Value::as_unsigned_integer)
            .ok_or_else(|| malformed("color without NSColorSpace"))?;
        if space != CALIBRATED_RGB && space != DEVICE_RGB {
            return Err(malformed(&format!("unsupported color space {}", space)));
        }

        let data = object
            .get("NSRGB")
            .and_then(Value::as_data)
            .ok_or_else(|| malformed("color without NSRGB"))?;
        let text = std::str::from_utf8(data)
            .map_err(|_| malformed("NSRGB is not ASCII"))?
            .trim_end_matches('\0');

        let components = text
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed(&format!("invalid NSRGB components {:?}", text)))?;

        match components.as_slice() {
            [red, green, blue, ..] => Ok(Color::new(*red, *green, *blue)),
            _ => Err(malformed(&format!("too few NSRGB components {:?}", text))),
        }
    }
}

fn malformed(reason: &str) -> PaletteError {
    PaletteError::MalformedArchive(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_palette() -> Palette {
        let mut palette = Palette::new("Brand");
        palette.insert("Red", Color::from_rgb8(255, 0, 0));
        palette.insert("Dark Khaki", Color::from_rgb8(0xBB, 0x89, 0x54));
        palette.insert("Green", Color::from_rgb8(0, 255, 0));
        palette
    }

    #[test]
    fn test_archive_layout() {
        let bytes = encode_palette(&sample_palette()).unwrap();
        let value = Value::from_reader(Cursor::new(bytes)).unwrap();
        let archive = value.as_dictionary().unwrap();

        assert_eq!(
            archive.get("$archiver").and_then(Value::as_string),
            Some("NSKeyedArchiver")
        );
        let objects = archive.get("$objects").and_then(Value::as_array).unwrap();
        assert_eq!(objects[0].as_string(), Some("$null"));

        let root = objects[1].as_dictionary().unwrap();
        assert!(root.contains_key("NSKeys"));
        assert!(root.contains_key("NSColors"));
        assert!(root.contains_key("NSName"));
    }

    #[test]
    fn test_written_file_is_binary_plist() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Brand.clr");

        write_palette(&sample_palette(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"bplist00"));
    }

    #[test]
    fn test_read_back_preserves_order_and_colors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Brand.clr");
        let palette = sample_palette();

        write_palette(&palette, &path).unwrap();
        let decoded = read_palette(&path).unwrap();

        assert_eq!(decoded.name(), "Brand");
        assert_eq!(
            decoded.keys().collect::<Vec<_>>(),
            vec!["Red", "Dark Khaki", "Green"]
        );
        for (name, color) in palette.iter() {
            assert_eq!(decoded.get(name).unwrap().to_hex(), color.to_hex());
        }
    }

    #[test]
    fn test_empty_palette_round_trips() {
        let bytes = encode_palette(&Palette::new("Empty")).unwrap();
        let decoded = decode_palette(&bytes).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.name(), "Empty");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("Brand.clr");

        let result = write_palette(&sample_palette(), &path);
        assert!(matches!(result, Err(PaletteError::WritePalette { .. })));
    }

    #[test]
    fn test_decode_rejects_other_plists() {
        let mut dict = Dictionary::new();
        dict.insert("hello".to_string(), Value::String("world".to_string()));
        let mut bytes = Vec::new();
        Value::Dictionary(dict).to_writer_binary(&mut bytes).unwrap();

        let result = decode_palette(&bytes);
        assert!(matches!(result, Err(PaletteError::MalformedArchive(_))));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_palette(b"bplist00 truncated");
        assert!(matches!(result, Err(PaletteError::Decode(_))));
    }
}
