//! ZIP container abstraction for OOXML packages.
//!
//! [`PackageWriter`] assembles a package from named parts; [`OoxmlContainer`]
//! opens an existing package to read its parts back.

use crate::error::{Error, Result};
use crate::model::Metadata;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;

/// A relationship entry from a .rels file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or absolute)
    pub target: String,
    /// Whether the target is external
    pub external: bool,
}

impl Relationship {
    /// A relationship to another part inside the package.
    pub fn internal(id: &str, rel_type: &str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            external: false,
        }
    }
}

/// Collection of relationships, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Get relationships by type.
    pub fn get_by_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.entries
            .iter()
            .filter(|r| r.rel_type == rel_type)
            .collect()
    }

    /// Add a relationship, replacing any existing entry with the same ID.
    pub fn add(&mut self, rel: Relationship) {
        match self.entries.iter_mut().find(|r| r.id == rel.id) {
            Some(existing) => *existing = rel,
            None => self.entries.push(rel),
        }
    }

    /// Relationships in the order they were added.
    pub fn ordered(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Writes parts into a new OOXML package.
///
/// Every entry is deflated and stamped with the same fixed timestamp, so the
/// archive bytes depend only on the parts written and their order.
pub struct PackageWriter {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    parts: usize,
}

impl PackageWriter {
    /// Start an empty in-memory package.
    pub fn new() -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
            options,
            parts: 0,
        }
    }

    /// Add a part at `path` (no leading slash).
    pub fn add_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.zip.start_file(path, self.options)?;
        self.zip.write_all(data)?;
        self.parts += 1;
        tracing::trace!(part = path, bytes = data.len(), "wrote package part");
        Ok(())
    }

    /// Number of parts written so far.
    pub fn part_count(&self) -> usize {
        self.parts
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode XML part bytes, honouring a UTF-8 or UTF-16 byte order mark.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    let invalid = |e: String| Error::InvalidData(format!("undecodable XML part: {}", e));

    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec()).map_err(|e| invalid(e.to_string()));
    }

    let utf16 = match bytes {
        [0xFF, 0xFE, rest @ ..] => Some((rest, u16::from_le_bytes as fn([u8; 2]) -> u16)),
        [0xFE, 0xFF, rest @ ..] => Some((rest, u16::from_be_bytes as fn([u8; 2]) -> u16)),
        _ => None,
    };
    if let Some((rest, to_unit)) = utf16 {
        let units = rest.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
        let content = char::decode_utf16(units)
            .collect::<std::result::Result<String, _>>()
            .map_err(|e| invalid(e.to_string()))?;
        // The declaration still names UTF-16; the string is UTF-8 now.
        return Ok(content
            .replacen("encoding=\"UTF-16\"", "encoding=\"UTF-8\"", 1)
            .replacen("encoding=\"utf-16\"", "encoding=\"UTF-8\"", 1));
    }

    String::from_utf8(bytes.to_vec()).map_err(|e| invalid(e.to_string()))
}

/// OOXML container abstraction over a ZIP archive.
///
/// Provides methods to read XML parts, binary data, and relationships
/// from an Office Open XML package.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open an OOXML container from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rostermanual::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("USER_MANUAL.docx")?;
    /// assert!(container.exists("word/document.xml"));
    /// # Ok::<(), rostermanual::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create an OOXML container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part from the archive as a string.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read a binary part from the archive.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all parts in archive order.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        let mut names: Vec<(usize, String)> = Vec::with_capacity(archive.len());
        for name in archive.file_names() {
            let index = archive.index_for_name(name).unwrap_or(usize::MAX);
            names.push((index, name.to_string()));
        }
        names.sort();
        names.into_iter().map(|(_, name)| name).collect()
    }

    /// Read the relationships of a part (`dir/_rels/name.rels`).
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = if part_path.is_empty() || part_path == "/" {
            "_rels/.rels".to_string()
        } else {
            match part_path.rsplit_once('/') {
                Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
                None => format!("_rels/{}.rels", part_path),
            }
        };
        self.parse_relationships(&rels_path)
    }

    /// Read package-level relationships (_rels/.rels).
    pub fn read_package_relationships(&self) -> Result<Relationships> {
        self.parse_relationships("_rels/.rels")
    }

    /// Parse core metadata from docProps/core.xml.
    ///
    /// A package without core properties yields empty metadata.
    pub fn parse_core_metadata(&self) -> Result<Metadata> {
        use quick_xml::events::Event;

        let mut meta = Metadata::default();
        let xml = match self.read_xml("docProps/core.xml") {
            Ok(xml) => xml,
            Err(Error::MissingComponent(_)) => return Ok(meta),
            Err(e) => return Err(e),
        };

        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);
        let mut current_element: Option<String> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    current_element =
                        Some(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                }
                Event::Text(e) => {
                    let Some(ref elem) = current_element else {
                        continue;
                    };
                    let text = e.unescape()?.to_string();
                    match elem.as_str() {
                        "title" => meta.title = Some(text),
                        "creator" => meta.author = Some(text),
                        "subject" => meta.subject = Some(text),
                        "description" => meta.description = Some(text),
                        "lastModifiedBy" => meta.last_modified_by = Some(text),
                        "keywords" => {
                            meta.keywords = text
                                .split([',', ';'])
                                .map(|s| s.trim().to_string())
                                .filter(|s| !s.is_empty())
                                .collect();
                        }
                        "created" => meta.created = Some(text),
                        "modified" => meta.modified = Some(text),
                        _ => {}
                    }
                }
                Event::End(_) => current_element = None,
                Event::Eof => break,
                _ => {}
            }
        }

        if self.exists("docProps/app.xml") {
            let app = self.read_xml("docProps/app.xml")?;
            meta.application = element_text(&app, b"Application")?;
        }

        Ok(meta)
    }

    fn parse_relationships(&self, rels_path: &str) -> Result<Relationships> {
        use quick_xml::events::Event;

        let content = match self.read_xml(rels_path) {
            Ok(c) => c,
            Err(Error::MissingComponent(_)) => return Ok(Relationships::new()),
            Err(e) => return Err(e),
        };

        let mut rels = Relationships::new();
        let mut reader = quick_xml::Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                    let mut rel = Relationship::internal("", "", "");
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.as_ref() {
                            b"Id" => rel.id = value,
                            b"Type" => rel.rel_type = value,
                            b"Target" => rel.target = value,
                            b"TargetMode" => rel.external = value.eq_ignore_ascii_case("external"),
                            _ => {}
                        }
                    }
                    if !rel.id.is_empty() {
                        rels.add(rel);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(rels)
    }

    /// Resolve a relationship target relative to the part that owns it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut segments: Vec<&str> = base.split('/').collect();
        segments.pop();
        for segment in relative.split('/') {
            match segment {
                ".." => {
                    segments.pop();
                }
                "." | "" => {}
                other => segments.push(other),
            }
        }
        segments.join("/")
    }
}

/// Text of the first element with the given local name.
fn element_text(xml: &str, local_name: &[u8]) -> Result<Option<String>> {
    use quick_xml::events::Event;

    let mut reader = quick_xml::Reader::from_str(xml);
    let mut inside = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) => inside = e.local_name().as_ref() == local_name,
            Event::Text(e) if inside => return Ok(Some(e.unescape()?.to_string())),
            Event::End(_) => inside = false,
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://test/doc" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://test/link" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

    fn package(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = PackageWriter::new();
        for (path, data) in parts {
            writer.add_part(path, data.as_bytes()).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            OoxmlContainer::resolve_path("word/document.xml", "../docProps/core.xml"),
            "docProps/core.xml"
        );
        assert_eq!(
            OoxmlContainer::resolve_path("word/document.xml", "styles.xml"),
            "word/styles.xml"
        );
        assert_eq!(
            OoxmlContainer::resolve_path("word/document.xml", "/word/numbering.xml"),
            "word/numbering.xml"
        );
    }

    #[test]
    fn test_relationships_collection() {
        let mut rels = Relationships::new();
        rels.add(Relationship::internal("rId2", "http://test/type1", "b.xml"));
        rels.add(Relationship::internal("rId1", "http://test/type1", "a.xml"));
        rels.add(Relationship::internal("rId2", "http://test/type2", "c.xml"));

        assert_eq!(rels.len(), 2);
        assert_eq!(rels.get("rId2").unwrap().target, "c.xml");
        assert!(rels.get("rId3").is_none());
        assert_eq!(rels.get_by_type("http://test/type1").len(), 1);
        let ids: Vec<&str> = rels.ordered().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["rId2", "rId1"]);
    }

    #[test]
    fn test_writer_output_is_readable_and_stable() {
        let parts = [("_rels/.rels", RELS), ("word/document.xml", "<w:document/>")];
        let first = package(&parts);
        let second = package(&parts);
        assert_eq!(first, second);

        let container = OoxmlContainer::from_bytes(first).unwrap();
        assert_eq!(container.list_files(), ["_rels/.rels", "word/document.xml"]);
        assert_eq!(container.read_xml("word/document.xml").unwrap(), "<w:document/>");
        assert!(matches!(
            container.read_xml("word/styles.xml"),
            Err(Error::MissingComponent(_))
        ));

        let rels = container.read_package_relationships().unwrap();
        assert_eq!(rels.len(), 2);
        assert!(rels.get("rId2").unwrap().external);
        assert!(container.read_relationships("word/document.xml").unwrap().is_empty());
    }

    #[test]
    fn test_core_metadata() {
        let core = r#"<?xml version="1.0" encoding="UTF-8"?>
<cp:coreProperties xmlns:cp="cp" xmlns:dc="dc" xmlns:dcterms="dcterms">
<dc:title>Roster Manual</dc:title><dc:creator>Team</dc:creator>
<cp:keywords>roster, shifts; leave</cp:keywords>
<dcterms:created>2025-10-01T00:00:00Z</dcterms:created>
</cp:coreProperties>"#;
        let app = "<Properties><Application>rostermanual</Application></Properties>";
        let bytes = package(&[("docProps/core.xml", core), ("docProps/app.xml", app)]);
        let meta = OoxmlContainer::from_bytes(bytes)
            .unwrap()
            .parse_core_metadata()
            .unwrap();
        assert_eq!(meta.title.as_deref(), Some("Roster Manual"));
        assert_eq!(meta.author.as_deref(), Some("Team"));
        assert_eq!(meta.keywords, ["roster", "shifts", "leave"]);
        assert_eq!(meta.created.as_deref(), Some("2025-10-01T00:00:00Z"));
        assert_eq!(meta.application.as_deref(), Some("rostermanual"));
    }

    #[test]
    fn test_decode_xml_bytes() {
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        assert!(decode_xml_bytes(b"\xC3\x28").is_err());
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            OoxmlContainer::from_bytes(b"plain text".to_vec()),
            Err(Error::ZipArchive(_))
        ));
    }
}
