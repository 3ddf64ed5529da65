//! EPUB text extraction

use super::SampleBuffer;
use crate::error::{LevelError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const CONTAINER_PATH: &str = "META-INF/container.xml";
const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// Body text of the XHTML documents of an EPUB, in manifest order.
///
/// Navigation documents, `<head>` content and script/style elements are
/// skipped. A chapter that cannot be read or parsed contributes nothing.
pub fn extract_epub_text(bytes: &[u8], max_chars: usize) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let package_path = package_path(&read_entry(&mut archive, CONTAINER_PATH)?)?;
    let package = read_entry(&mut archive, &package_path)?;
    let base = package_path.rsplit_once('/').map_or("", |(dir, _)| dir);

    let mut sample = SampleBuffer::new(max_chars);
    for href in content_documents(&package)? {
        let href = href.trim_start_matches("./");
        let path = if base.is_empty() {
            href.to_string()
        } else {
            format!("{base}/{href}")
        };
        let text = match read_entry(&mut archive, &path).and_then(|markup| body_text(&markup)) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("skipping EPUB item {path}: {e}");
                String::new()
            }
        };
        if sample.push(text) {
            break;
        }
    }
    Ok(sample.finish())
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Path of the package document named by `META-INF/container.xml`
fn package_path(container: &str) -> Result<String> {
    let mut reader = Reader::from_str(container);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"rootfile" => {
                if let Some(path) = attribute(&e, b"full-path")? {
                    return Ok(path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Err(LevelError::Epub(
        "container.xml names no package document".to_string(),
    ))
}

/// Hrefs of the XHTML content documents listed in the package manifest
fn content_documents(package: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(package);
    let mut hrefs = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"item" => {
                let media_type = attribute(&e, b"media-type")?.unwrap_or_default();
                let properties = attribute(&e, b"properties")?.unwrap_or_default();
                let is_nav = properties.split_whitespace().any(|p| p == "nav");
                if media_type == XHTML_MEDIA_TYPE && !is_nav {
                    if let Some(href) = attribute(&e, b"href")? {
                        hrefs.push(href);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(hrefs)
}

/// Text nodes inside `<body>`, joined by a space
fn body_text(markup: &str) -> Result<String> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;

    let mut parts = Vec::new();
    let mut in_body = false;
    let mut hidden = 0usize;
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"body" => in_body = true,
                b"script" | b"style" => hidden += 1,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"body" => in_body = false,
                b"script" | b"style" => hidden = hidden.saturating_sub(1),
                _ => {}
            },
            Event::Text(t) if in_body && hidden == 0 => {
                // XHTML may use HTML entities that XML does not define
                let text = match t.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(_) => String::from_utf8_lossy(&t).into_owned(),
                };
                parts.push(text);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(parts.join(" "))
}
