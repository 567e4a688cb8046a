use crate::annotation::decode_text_string;
use crate::error::EngineError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use pdfext_traits::FontNameSource;

/// A read-only view of a font dictionary inside a document.
#[derive(Debug, Clone, Copy)]
pub struct PdfFont<'a> {
    doc: &'a Document,
    id: ObjectId,
    dict: &'a Dictionary,
}

impl<'a> PdfFont<'a> {
    pub(crate) fn new(doc: &'a Document, id: ObjectId) -> Result<Self, EngineError> {
        let dict = doc
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|_| EngineError::NotAFont(id))?;
        match dict.get(b"Type").and_then(Object::as_name) {
            Ok(b"Font") => Ok(Self { doc, id, dict }),
            _ => Err(EngineError::NotAFont(id)),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The `BaseFont` name bytes, if present and non-empty.
    pub fn base_name(&self) -> Option<&'a [u8]> {
        self.dict
            .get(b"BaseFont")
            .and_then(Object::as_name)
            .ok()
            .filter(|name| !name.is_empty())
    }

    /// The family name from the font descriptor.
    ///
    /// Uses `/FontFamily` when present, otherwise the descriptor's `/FontName`
    /// stripped of its subset tag and style suffix. `/FontFamily` is a text
    /// string and comes back as UTF-8.
    pub fn family(&self) -> Option<Vec<u8>> {
        let descriptor = self.descriptor()?;
        if let Ok(family) = descriptor.get(b"FontFamily").and_then(Object::as_str) {
            let family = decode_text_string(family);
            if !family.is_empty() {
                return Some(family.into_bytes());
            }
        }
        let font_name = descriptor.get(b"FontName").and_then(Object::as_name).ok()?;
        let family = strip_style(strip_subset_tag(font_name));
        (!family.is_empty()).then(|| family.to_vec())
    }

    fn descriptor(&self) -> Option<&'a Dictionary> {
        let owner = match self.dict.get(b"Subtype").and_then(Object::as_name) {
            // Composite fonts keep their descriptor on the descendant font.
            Ok(b"Type0") => {
                let descendants = self.resolve(self.dict.get(b"DescendantFonts").ok()?)?;
                let first = descendants.as_array().ok()?.first()?;
                self.resolve(first)?.as_dict().ok()?
            }
            _ => self.dict,
        };
        self.resolve(owner.get(b"FontDescriptor").ok()?)?.as_dict().ok()
    }

    fn resolve(&self, object: &'a Object) -> Option<&'a Object> {
        match object {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }
}

fn strip_subset_tag(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b'+') {
        Some(6) if name[..6].iter().all(u8::is_ascii_uppercase) => &name[7..],
        _ => name,
    }
}

fn strip_style(name: &[u8]) -> &[u8] {
    let end = name
        .iter()
        .position(|&b| b == b',' || b == b'-')
        .unwrap_or(name.len());
    &name[..end]
}

/// Copies `name` plus a NUL terminator into `buffer` when it fits.
fn fill(name: Option<&[u8]>, buffer: &mut [u8]) -> usize {
    let Some(name) = name else { return 0 };
    let required = name.len() + 1;
    if buffer.len() >= required {
        buffer[..name.len()].copy_from_slice(name);
        buffer[name.len()] = 0;
    }
    required
}

impl FontNameSource for PdfFont<'_> {
    fn base_font_name(&self, buffer: &mut [u8]) -> usize {
        fill(self.base_name(), buffer)
    }

    fn family_name(&self, buffer: &mut [u8]) -> usize {
        fill(self.family().as_deref(), buffer)
    }
}
