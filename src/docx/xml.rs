//! Small helpers over `quick_xml::Writer` used by every part writer.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};

/// WordprocessingML main namespace.
pub const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace.
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) type XmlWriter = Writer<Vec<u8>>;

pub(crate) fn new_writer() -> Result<XmlWriter> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

pub(crate) fn start(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    w.write_event(Event::Start(elem))?;
    Ok(())
}

pub(crate) fn end(w: &mut XmlWriter, name: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub(crate) fn empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    w.write_event(Event::Empty(elem))?;
    Ok(())
}

/// `<name w:val="value"/>`, the most common WordprocessingML shape.
pub(crate) fn val(w: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    empty(w, name, &[("w:val", value)])
}

pub(crate) fn text(w: &mut XmlWriter, content: &str) -> Result<()> {
    w.write_event(Event::Text(BytesText::new(content)))?;
    Ok(())
}

/// `<name attrs>content</name>`
pub(crate) fn text_element(
    w: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
    content: &str,
) -> Result<()> {
    start(w, name, attrs)?;
    text(w, content)?;
    end(w, name)
}

pub(crate) fn finish(w: XmlWriter) -> Result<Vec<u8>> {
    Ok(w.into_inner())
}

pub(crate) fn finish_string(w: XmlWriter) -> Result<String> {
    String::from_utf8(w.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

/// Read an attribute value by its qualified name.
pub(crate) fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Read an OOXML on/off property; a bare element means "on".
pub(crate) fn toggle_value(e: &BytesStart) -> bool {
    match attr_value(e, b"w:val") {
        Some(v) => !matches!(v.as_str(), "0" | "false" | "off"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_escapes_text() {
        let mut w = new_writer().unwrap();
        start(&mut w, "w:t", &[("xml:space", "preserve")]).unwrap();
        text(&mut w, "a < b & \"c\"").unwrap();
        end(&mut w, "w:t").unwrap();
        let xml = finish_string(w).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("a &lt; b &amp;"));
        assert!(xml.contains("<w:t xml:space=\"preserve\">"));
    }

    #[test]
    fn test_toggle_value() {
        let on = BytesStart::new("w:b");
        assert!(toggle_value(&on));

        let mut off = BytesStart::new("w:b");
        off.push_attribute(("w:val", "0"));
        assert!(!toggle_value(&off));
        assert_eq!(attr_value(&off, b"w:val").as_deref(), Some("0"));
    }
}
