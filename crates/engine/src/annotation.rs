use crate::error::EngineError;
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use pdfext_traits::StringAttributeSink;

/// A mutable view of an annotation dictionary.
#[derive(Debug)]
pub struct PdfAnnotation<'a> {
    doc: &'a mut Document,
    id: ObjectId,
}

impl<'a> PdfAnnotation<'a> {
    pub(crate) fn new(doc: &'a mut Document, id: ObjectId) -> Result<Self, EngineError> {
        annotation_dict(doc, id)?;
        Ok(Self { doc, id })
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    fn dict(&self) -> Option<&Dictionary> {
        self.doc.get_object(self.id).and_then(Object::as_dict).ok()
    }

    fn dict_mut(&mut self) -> Option<&mut Dictionary> {
        self.doc.get_object_mut(self.id).and_then(Object::as_dict_mut).ok()
    }

    pub fn subtype(&self) -> Option<String> {
        let name = self.dict()?.get(b"Subtype").and_then(Object::as_name).ok()?;
        Some(String::from_utf8_lossy(name).into_owned())
    }

    /// Reads a text-string attribute.
    pub fn string_value(&self, key: &str) -> Option<String> {
        read_string_value(self.dict()?, key)
    }
}

pub(crate) fn annotation_dict(doc: &Document, id: ObjectId) -> Result<&Dictionary, EngineError> {
    let dict = doc
        .get_object(id)
        .and_then(Object::as_dict)
        .map_err(|_| EngineError::NotAnAnnotation(id))?;
    // `/Type /Annot` is optional; untyped annotations still carry a subtype and a rect.
    let is_annot = match dict.get(b"Type").and_then(Object::as_name) {
        Ok(kind) => kind == b"Annot",
        Err(_) => dict.has(b"Subtype") && dict.has(b"Rect"),
    };
    if is_annot {
        Ok(dict)
    } else {
        Err(EngineError::NotAnAnnotation(id))
    }
}

pub(crate) fn read_string_value(dict: &Dictionary, key: &str) -> Option<String> {
    let bytes = dict.get(key.as_bytes()).and_then(Object::as_str).ok()?;
    Some(decode_text_string(bytes))
}

/// Encodes text as a PDF text string: plain bytes for ASCII, UTF-16BE with a
/// byte order mark otherwise.
fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

pub(crate) fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    // Latin-1 covers the printable range of PDFDocEncoding.
    bytes.iter().map(|&b| char::from(b)).collect()
}

impl StringAttributeSink for PdfAnnotation<'_> {
    fn set_string_value(&mut self, key: &str, value: &[u16]) -> bool {
        let end = value.iter().position(|&u| u == 0).unwrap_or(value.len());
        let Ok(text) = String::from_utf16(&value[..end]) else {
            log::warn!(
                "rejecting '{}' on {:?}: value is not valid UTF-16",
                key,
                self.id
            );
            return false;
        };
        let encoded = encode_text_string(&text);
        let Some(dict) = self.dict_mut() else {
            return false;
        };
        dict.set(key.as_bytes(), Object::String(encoded, StringFormat::Literal));
        true
    }
}
