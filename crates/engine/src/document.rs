// Loaded documents and the objects the extension layer addresses in them.
use crate::annotation::{PdfAnnotation, annotation_dict, read_string_value};
use crate::error::EngineError;
use crate::font::PdfFont;
use crate::form::{FormFillEnvironment, FormFillInfo};
use crate::save::{SaveFlags, SinkWriter};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use pdfext_traits::FileWrite;
use std::collections::HashMap;

/// Base names of the standard 14 Type 1 fonts every viewer provides.
pub const STANDARD_FONTS: [&str; 14] = [
    "Courier",
    "Courier-Bold",
    "Courier-BoldOblique",
    "Courier-Oblique",
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-BoldOblique",
    "Helvetica-Oblique",
    "Times-Roman",
    "Times-Bold",
    "Times-BoldItalic",
    "Times-Italic",
    "Symbol",
    "ZapfDingbats",
];

/// A document owned by the engine.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    inner: Document,
    /// Standard font objects already added, by base name.
    standard_fonts: HashMap<String, ObjectId>,
}

impl PdfDocument {
    /// Parses a document from memory.
    pub fn load_mem(bytes: &[u8]) -> Result<Self, EngineError> {
        let inner = Document::load_mem(bytes)?;
        log::debug!(
            "loaded PDF {} document ({} bytes, {} objects)",
            inner.version,
            bytes.len(),
            inner.objects.len()
        );
        Ok(Self::from_lopdf(inner))
    }

    pub fn from_lopdf(inner: Document) -> Self {
        Self {
            inner,
            standard_fonts: HashMap::new(),
        }
    }

    pub fn into_lopdf(self) -> Document {
        self.inner
    }

    pub fn version(&self) -> &str {
        &self.inner.version
    }

    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Object id of the page at zero-based `index`.
    pub fn page_id(&self, index: usize) -> Result<ObjectId, EngineError> {
        let pages = self.inner.get_pages();
        pages
            .values()
            .nth(index)
            .copied()
            .ok_or(EngineError::PageOutOfRange {
                index,
                count: pages.len(),
            })
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        match object {
            Object::Reference(id) => self.inner.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn annots(&self, page_id: ObjectId) -> Result<Vec<Object>, EngineError> {
        let page = self.inner.get_dictionary(page_id)?;
        match page.get(b"Annots") {
            Err(_) => Ok(Vec::new()),
            Ok(entry) => match self.resolve(entry) {
                Some(Object::Array(items)) => Ok(items.clone()),
                _ => Err(EngineError::Pdf(format!(
                    "/Annots of page {page_id:?} is not an array"
                ))),
            },
        }
    }

    fn set_annots(&mut self, page_id: ObjectId, annots: Vec<Object>) -> Result<(), EngineError> {
        let indirect = match self.inner.get_dictionary(page_id)?.get(b"Annots") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        };
        match indirect {
            Some(id) => *self.inner.get_object_mut(id)? = Object::Array(annots),
            None => self.inner.get_dictionary_mut(page_id)?.set("Annots", Object::Array(annots)),
        }
        Ok(())
    }

    pub fn annotation_count(&self, page_index: usize) -> Result<usize, EngineError> {
        let page_id = self.page_id(page_index)?;
        Ok(self.annots(page_id)?.len())
    }

    /// Object id of annotation `index` on page `page_index`.
    ///
    /// Annotations stored directly inside the page's `/Annots` array are moved
    /// into indirect objects so they can be addressed by id.
    pub fn annotation_id(
        &mut self,
        page_index: usize,
        index: usize,
    ) -> Result<ObjectId, EngineError> {
        let page_id = self.page_id(page_index)?;
        let mut annots = self.annots(page_id)?;
        let entry = annots
            .get(index)
            .cloned()
            .ok_or(EngineError::AnnotationOutOfRange {
                page: page_index,
                index,
                count: annots.len(),
            })?;

        let id = match entry {
            Object::Reference(id) => id,
            Object::Dictionary(dict) => {
                let id = self.inner.add_object(dict);
                annots[index] = Object::Reference(id);
                self.set_annots(page_id, annots)?;
                log::debug!("promoted direct annotation {index} on page {page_index} to {id:?}");
                id
            }
            _ => {
                return Err(EngineError::Pdf(format!(
                    "annotation {index} on page {page_index} is not a dictionary"
                )));
            }
        };
        annotation_dict(&self.inner, id)?;
        Ok(id)
    }

    /// Appends a new annotation of `subtype` to a page.
    ///
    /// `rect` is `[left, bottom, right, top]` in default user space.
    pub fn create_annotation(
        &mut self,
        page_index: usize,
        subtype: &str,
        rect: [f32; 4],
    ) -> Result<ObjectId, EngineError> {
        let page_id = self.page_id(page_index)?;
        let rect: Vec<Object> = rect.iter().map(|&v| Object::from(v)).collect();
        let id = self.inner.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => subtype,
            "Rect" => rect,
            "P" => page_id,
        });
        let mut annots = self.annots(page_id)?;
        annots.push(Object::Reference(id));
        self.set_annots(page_id, annots)?;
        Ok(id)
    }

    /// Adds one of the standard 14 fonts to the document. Loading the same name again returns
    /// the object added the first time.
    pub fn load_standard_font(&mut self, name: &str) -> Result<ObjectId, EngineError> {
        if !STANDARD_FONTS.contains(&name) {
            return Err(EngineError::UnknownStandardFont(name.to_string()));
        }
        if let Some(&id) = self.standard_fonts.get(name) {
            return Ok(id);
        }
        let mut font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => name,
        };
        // Symbolic fonts use their built-in encoding.
        if name != "Symbol" && name != "ZapfDingbats" {
            font.set("Encoding", "WinAnsiEncoding");
        }
        let id = self.inner.add_object(font);
        self.standard_fonts.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn font(&self, id: ObjectId) -> Result<PdfFont<'_>, EngineError> {
        PdfFont::new(&self.inner, id)
    }

    pub fn annotation_mut(&mut self, id: ObjectId) -> Result<PdfAnnotation<'_>, EngineError> {
        PdfAnnotation::new(&mut self.inner, id)
    }

    /// Reads a text-string attribute of an annotation.
    pub fn annotation_string_value(
        &self,
        id: ObjectId,
        key: &str,
    ) -> Result<Option<String>, EngineError> {
        let dict = annotation_dict(&self.inner, id)?;
        Ok(read_string_value(dict, key))
    }

    fn acroform(&self) -> Option<&Dictionary> {
        let entry = self.inner.catalog().ok()?.get(b"AcroForm").ok()?;
        self.resolve(entry)?.as_dict().ok()
    }

    /// Creates the form-fill environment for this document.
    pub fn init_form_fill_environment(
        &self,
        info: &FormFillInfo,
    ) -> Result<FormFillEnvironment, EngineError> {
        info.check_version()?;
        let acroform = self.acroform();
        let field_count = acroform
            .and_then(|form| form.get(b"Fields").ok())
            .and_then(|fields| self.resolve(fields))
            .and_then(|fields| fields.as_array().ok())
            .map_or(0, Vec::len);
        let need_appearances = acroform
            .and_then(|form| form.get(b"NeedAppearances").ok())
            .and_then(|flag| flag.as_bool().ok())
            .unwrap_or(false);

        let env = FormFillEnvironment {
            info_version: info.version,
            has_acroform: acroform.is_some(),
            field_count,
            need_appearances,
        };
        log::debug!("form-fill environment initialised: {env:?}");
        Ok(env)
    }

    /// Serialises the whole document into `sink`, returning the byte count.
    pub fn save_as_copy(
        &mut self,
        sink: &mut dyn FileWrite,
        flags: SaveFlags,
    ) -> Result<usize, EngineError> {
        self.save_with_version(sink, flags, None)
    }

    /// Like [`save_as_copy`](Self::save_as_copy) but writes the header with
    /// `version` (e.g. `17` for PDF 1.7). The document's own version is left
    /// unchanged.
    pub fn save_with_version(
        &mut self,
        sink: &mut dyn FileWrite,
        flags: SaveFlags,
        version: Option<u8>,
    ) -> Result<usize, EngineError> {
        let previous = match version {
            Some(v) => Some(std::mem::replace(&mut self.inner.version, version_string(v)?)),
            None => None,
        };

        let mut writer = SinkWriter::new(sink);
        let result = self.inner.save_to(&mut writer);
        if let Some(previous) = previous {
            self.inner.version = previous;
        }
        result.map_err(|e| EngineError::Save(e.to_string()))?;

        log::debug!(
            "saved document copy ({} bytes, flags {})",
            writer.written,
            flags.raw()
        );
        Ok(writer.written)
    }
}

fn version_string(version: u8) -> Result<String, EngineError> {
    if !(10..=20).contains(&version) {
        return Err(EngineError::UnsupportedVersion(version));
    }
    Ok(format!("{}.{}", version / 10, version % 10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfext_traits::{FontNameSource, StringAttributeSink};

    /// One page carrying a referenced FreeText annotation and a direct Text one.
    fn sample() -> PdfDocument {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let free_text = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "FreeText",
            "Rect" => vec![10.into(), 10.into(), 200.into(), 50.into()],
        });
        let note = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Text",
            "Rect" => vec![0.into(), 0.into(), 20.into(), 20.into()],
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => vec![free_text.into(), Object::Dictionary(note)],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        PdfDocument::from_lopdf(doc)
    }

    fn saved_bytes(doc: &mut PdfDocument) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        let written = doc.save_as_copy(&mut out, SaveFlags::Default).unwrap();
        assert_eq!(written, out.len());
        out
    }

    #[test]
    fn pages_and_annotations_are_addressable() {
        let mut doc = sample();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.annotation_count(0).unwrap(), 2);
        let id = doc.annotation_id(0, 0).unwrap();
        assert_eq!(
            doc.annotation_mut(id).unwrap().subtype().as_deref(),
            Some("FreeText")
        );
    }

    #[test]
    fn out_of_range_indices_are_errors() {
        let mut doc = sample();
        assert!(matches!(
            doc.page_id(3),
            Err(EngineError::PageOutOfRange {
                index: 3,
                count: 1
            })
        ));
        assert!(matches!(
            doc.annotation_id(0, 5),
            Err(EngineError::AnnotationOutOfRange {
                page: 0,
                index: 5,
                count: 2
            })
        ));
    }

    #[test]
    fn direct_annotations_are_promoted() {
        let mut doc = sample();
        let id = doc.annotation_id(0, 1).unwrap();
        assert_eq!(doc.annotation_id(0, 1).unwrap(), id);
        assert_eq!(
            doc.annotation_mut(id).unwrap().subtype().as_deref(),
            Some("Text")
        );
    }

    #[test]
    fn create_annotation_appends_to_page() {
        let mut doc = sample();
        let id = doc.create_annotation(0, "FreeText", [72.0, 600.0, 300.0, 640.0]).unwrap();
        assert_eq!(doc.annotation_count(0).unwrap(), 3);
        assert_eq!(doc.annotation_id(0, 2).unwrap(), id);
    }

    #[test]
    fn standard_fonts_answer_name_queries() {
        let mut doc = sample();
        let id = doc.load_standard_font("Times-Bold").unwrap();
        let font = doc.font(id).unwrap();
        let mut buf = [0u8; 32];
        assert_eq!(font.base_font_name(&mut buf), 11);
        assert_eq!(&buf[..10], b"Times-Bold");
        assert!(matches!(
            doc.load_standard_font("Comic Sans"),
            Err(EngineError::UnknownStandardFont(_))
        ));
    }

    #[test]
    fn standard_fonts_are_added_once() {
        let mut doc = sample();
        let objects = doc.inner.objects.len();
        let first = doc.load_standard_font("Courier").unwrap();
        assert_eq!(doc.load_standard_font("Courier").unwrap(), first);
        assert_ne!(doc.load_standard_font("Symbol").unwrap(), first);
        assert_eq!(doc.inner.objects.len(), objects + 2);
    }

    #[test]
    fn save_round_trips_string_values() {
        let mut doc = sample();
        let id = doc.annotation_id(0, 0).unwrap();
        let da: Vec<u16> = "/Helv 12.0 Tf 0 g".encode_utf16().chain([0]).collect();
        assert!(doc.annotation_mut(id).unwrap().set_string_value("DA", &da));

        let bytes = saved_bytes(&mut doc);
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let mut reloaded = PdfDocument::load_mem(&bytes).unwrap();
        let id = reloaded.annotation_id(0, 0).unwrap();
        assert_eq!(
            reloaded.annotation_string_value(id, "DA").unwrap().as_deref(),
            Some("/Helv 12.0 Tf 0 g")
        );
    }

    #[test]
    fn save_with_version_leaves_document_version() {
        let mut doc = sample();
        let mut out: Vec<u8> = Vec::new();
        doc.save_with_version(&mut out, SaveFlags::NoIncremental, Some(17)).unwrap();
        assert!(out.starts_with(b"%PDF-1.7"));
        assert_eq!(doc.version(), "1.5");
        assert!(matches!(
            doc.save_with_version(&mut Vec::<u8>::new(), SaveFlags::Default, Some(30)),
            Err(EngineError::UnsupportedVersion(30))
        ));
    }

    #[test]
    fn form_environment_without_acroform() {
        let doc = sample();
        let env = doc.init_form_fill_environment(&FormFillInfo::default()).unwrap();
        assert!(!env.has_acroform());
        assert_eq!(env.field_count(), 0);
        env.exit();
    }

    #[test]
    fn form_environment_counts_fields() {
        let mut doc = sample().into_lopdf();
        let field = doc.add_object(dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal("name"),
        });
        let form = doc.add_object(dictionary! {
            "Fields" => vec![field.into()],
            "NeedAppearances" => true,
        });
        let root = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
        doc.get_dictionary_mut(root).unwrap().set("AcroForm", form);

        let doc = PdfDocument::from_lopdf(doc);
        let env = doc.init_form_fill_environment(&FormFillInfo::default()).unwrap();
        assert!(env.has_acroform());
        assert_eq!(env.field_count(), 1);
        assert!(env.need_appearances());
        assert_eq!(env.info_version(), 1);

        let bad = FormFillInfo {
            version: 9,
            ..Default::default()
        };
        assert!(doc.init_form_fill_environment(&bad).is_err());
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        assert!(matches!(
            PdfDocument::load_mem(b"not a pdf"),
            Err(EngineError::Pdf(_))
        ));
    }
}
