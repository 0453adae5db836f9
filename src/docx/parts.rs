//! Package-level parts: content types, relationships, document properties
//! and settings.

use crate::container::{Relationship, Relationships};
use crate::error::Result;
use crate::model::Metadata;

use super::xml::{self, NS_W};

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";
pub const SETTINGS_PART: &str = "word/settings.xml";
pub const CORE_PART: &str = "docProps/core.xml";
pub const APP_PART: &str = "docProps/app.xml";
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CORE: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
pub const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
pub const REL_SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";

const OVERRIDES: [(&str, &str); 6] = [
    (
        DOCUMENT_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    ),
    (
        STYLES_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
    ),
    (
        NUMBERING_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
    ),
    (
        SETTINGS_PART,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
    ),
    (
        CORE_PART,
        "application/vnd.openxmlformats-package.core-properties+xml",
    ),
    (
        APP_PART,
        "application/vnd.openxmlformats-officedocument.extended-properties+xml",
    ),
];

/// `[Content_Types].xml`
pub fn content_types() -> Result<Vec<u8>> {
    let mut w = xml::new_writer()?;
    xml::start(&mut w, "Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml::empty(
        &mut w,
        "Default",
        &[("Extension", "rels"), ("ContentType", CT_RELS)],
    )?;
    xml::empty(
        &mut w,
        "Default",
        &[("Extension", "xml"), ("ContentType", CT_XML)],
    )?;
    for (part, content_type) in OVERRIDES {
        let part_name = format!("/{}", part);
        xml::empty(
            &mut w,
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", content_type)],
        )?;
    }
    xml::end(&mut w, "Types")?;
    xml::finish(w)
}

/// Package relationships (`_rels/.rels`).
pub fn package_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(Relationship::internal("rId1", REL_OFFICE_DOCUMENT, DOCUMENT_PART));
    rels.add(Relationship::internal("rId2", REL_CORE_PROPERTIES, CORE_PART));
    rels.add(Relationship::internal("rId3", REL_EXTENDED_PROPERTIES, APP_PART));
    rels
}

/// Relationships of the main document part.
pub fn document_relationships() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(Relationship::internal("rId1", REL_STYLES, "styles.xml"));
    rels.add(Relationship::internal("rId2", REL_NUMBERING, "numbering.xml"));
    rels.add(Relationship::internal("rId3", REL_SETTINGS, "settings.xml"));
    rels
}

/// Serialise a relationships collection in ID order.
pub fn relationships_xml(rels: &Relationships) -> Result<Vec<u8>> {
    let mut w = xml::new_writer()?;
    xml::start(&mut w, "Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    for rel in rels.ordered() {
        let mut attrs = vec![
            ("Id", rel.id.as_str()),
            ("Type", rel.rel_type.as_str()),
            ("Target", rel.target.as_str()),
        ];
        if rel.external {
            attrs.push(("TargetMode", "External"));
        }
        xml::empty(&mut w, "Relationship", &attrs)?;
    }
    xml::end(&mut w, "Relationships")?;
    xml::finish(w)
}

/// `docProps/core.xml`
///
/// `created` is used for the modification time too when `metadata.modified`
/// is unset.
pub fn core_properties(metadata: &Metadata, created: &str) -> Result<Vec<u8>> {
    let mut w = xml::new_writer()?;
    xml::start(
        &mut w,
        "cp:coreProperties",
        &[
            ("xmlns:cp", NS_CORE),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;

    if let Some(ref title) = metadata.title {
        xml::text_element(&mut w, "dc:title", &[], title)?;
    }
    if let Some(ref subject) = metadata.subject {
        xml::text_element(&mut w, "dc:subject", &[], subject)?;
    }
    if let Some(ref author) = metadata.author {
        xml::text_element(&mut w, "dc:creator", &[], author)?;
    }
    if !metadata.keywords.is_empty() {
        xml::text_element(&mut w, "cp:keywords", &[], &metadata.keywords.join(", "))?;
    }
    if let Some(ref description) = metadata.description {
        xml::text_element(&mut w, "dc:description", &[], description)?;
    }
    let last_modified_by = metadata
        .last_modified_by
        .as_deref()
        .or(metadata.author.as_deref());
    if let Some(name) = last_modified_by {
        xml::text_element(&mut w, "cp:lastModifiedBy", &[], name)?;
    }
    xml::text_element(&mut w, "cp:revision", &[], "1")?;
    let created = metadata.created.as_deref().unwrap_or(created);
    let modified = metadata.modified.as_deref().unwrap_or(created);
    xml::text_element(
        &mut w,
        "dcterms:created",
        &[("xsi:type", "dcterms:W3CDTF")],
        created,
    )?;
    xml::text_element(
        &mut w,
        "dcterms:modified",
        &[("xsi:type", "dcterms:W3CDTF")],
        modified,
    )?;

    xml::end(&mut w, "cp:coreProperties")?;
    xml::finish(w)
}

/// `docProps/app.xml`
pub fn app_properties(metadata: &Metadata) -> Result<Vec<u8>> {
    let mut w = xml::new_writer()?;
    xml::start(
        &mut w,
        "Properties",
        &[
            ("xmlns", NS_EXTENDED),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    let application = metadata
        .application
        .clone()
        .unwrap_or_else(|| format!("rostermanual {}", env!("CARGO_PKG_VERSION")));
    xml::text_element(&mut w, "Application", &[], &application)?;
    xml::text_element(&mut w, "DocSecurity", &[], "0")?;
    xml::text_element(&mut w, "ScaleCrop", &[], "false")?;
    xml::text_element(&mut w, "LinksUpToDate", &[], "false")?;
    xml::text_element(&mut w, "SharedDoc", &[], "false")?;
    xml::text_element(&mut w, "HyperlinksChanged", &[], "false")?;
    xml::end(&mut w, "Properties")?;
    xml::finish(w)
}

/// `word/settings.xml`
pub fn settings() -> Result<Vec<u8>> {
    let mut w = xml::new_writer()?;
    xml::start(&mut w, "w:settings", &[("xmlns:w", NS_W)])?;
    xml::val(&mut w, "w:defaultTabStop", "720")?;
    xml::val(&mut w, "w:characterSpacingControl", "doNotCompress")?;
    xml::start(&mut w, "w:compat", &[])?;
    xml::empty(
        &mut w,
        "w:compatSetting",
        &[
            ("w:name", "compatibilityMode"),
            ("w:uri", "http://schemas.microsoft.com/office/word"),
            ("w:val", "15"),
        ],
    )?;
    xml::end(&mut w, "w:compat")?;
    xml::end(&mut w, "w:settings")?;
    xml::finish(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_content_types_lists_every_part() {
        let xml = as_string(content_types().unwrap());
        for (part, _) in OVERRIDES {
            assert!(xml.contains(&format!("PartName=\"/{}\"", part)), "{}", part);
        }
        assert!(xml.contains("Extension=\"rels\""));
    }

    #[test]
    fn test_relationships_are_written_in_id_order() {
        let xml = as_string(relationships_xml(&package_relationships()).unwrap());
        let first = xml.find("rId1").unwrap();
        let second = xml.find("rId2").unwrap();
        let third = xml.find("rId3").unwrap();
        assert!(first < second && second < third);
        assert!(xml.contains("Target=\"word/document.xml\""));
    }

    #[test]
    fn test_core_properties() {
        let metadata = Metadata {
            title: Some("Manual & Guide".to_string()),
            author: Some("Team".to_string()),
            ..Default::default()
        };
        let xml = as_string(core_properties(&metadata, "2025-10-01T00:00:00Z").unwrap());
        assert!(xml.contains("<dc:title>Manual &amp; Guide</dc:title>"));
        assert!(xml.contains("<dc:creator>Team</dc:creator>"));
        assert!(xml.contains("<cp:lastModifiedBy>Team</cp:lastModifiedBy>"));
        assert!(xml.contains(
            "<dcterms:modified xsi:type=\"dcterms:W3CDTF\">2025-10-01T00:00:00Z</dcterms:modified>"
        ));
    }
}
