//! XML catalogs: `<translations><translation id="key">text</translation></translations>`.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::core::data::Catalog;

const ENTRY_ELEMENT: &[u8] = b"translation";
const ID_ATTRIBUTE: &[u8] = b"id";

pub fn parse_xml_file(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read XML file: {:?}", path))?;
    parse_xml_catalog(&content).with_context(|| format!("Failed to parse XML file: {:?}", path))
}

pub fn parse_xml_catalog(content: &str) -> Result<Catalog> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut catalog = Catalog::new();
    let mut buf = Vec::new();
    // Id and accumulated text of the entry being read.
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == ENTRY_ELEMENT => {
                current = Some((entry_id(&e)?, String::new()));
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == ENTRY_ELEMENT => {
                catalog.insert(entry_id(&e)?, String::new());
            }
            Ok(Event::Text(e)) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == ENTRY_ELEMENT => {
                if let Some((id, text)) = current.take() {
                    catalog.insert(id, text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!(
                "XML error at position {}: {}",
                reader.buffer_position(),
                e
            ),
            _ => {}
        }
        buf.clear();
    }

    Ok(catalog)
}

fn entry_id(element: &BytesStart) -> Result<String> {
    match element.try_get_attribute(ID_ATTRIBUTE)? {
        Some(attr) => Ok(attr.unescape_value()?.into_owned()),
        None => bail!("<translation> element without an 'id' attribute"),
    }
}
