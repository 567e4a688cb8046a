//! The typed operations behind every host entry point.

use crate::config::ExtensionConfig;
use crate::error::CoreError;
use crate::handle::{
    AnnotationHandle, DocumentHandle, FontHandle, FormEnvHandle, FormInfoHandle, HandleTable,
    SinkHandle, TypedHandle,
};
use pdfext_appearance::{AppearanceError, AppearanceLimits, DefaultAppearance, RgbColor};
use pdfext_engine::{FormFillEnvironment, FormFillInfo, ObjectId, PdfDocument, SaveFlags};
use pdfext_sink::OutputSink;

struct DocumentEntry {
    doc: PdfDocument,
    environments: usize,
}

/// A font or annotation: an object inside one open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ObjectRef {
    document: DocumentHandle,
    id: ObjectId,
}

/// Returns the handle already issued for `object`, or issues one.
fn issue<H: TypedHandle>(
    table: &mut HandleTable<H, ObjectRef>,
    object: ObjectRef,
) -> Result<H, CoreError> {
    match table.find(|issued| *issued == object) {
        Some(handle) => Ok(handle),
        None => table.insert(object),
    }
}

struct FormInfoEntry {
    info: FormFillInfo,
    environments: usize,
}

struct FormEnvEntry {
    env: FormFillEnvironment,
    document: DocumentHandle,
    info: FormInfoHandle,
}

/// Owns everything the host holds a handle to.
///
/// Each table entry is the sole owner of its object; closing a handle removes
/// the entry and drops the object exactly once.
pub struct Extension {
    limits: AppearanceLimits,
    sinks: HandleTable<SinkHandle, OutputSink>,
    documents: HandleTable<DocumentHandle, DocumentEntry>,
    fonts: HandleTable<FontHandle, ObjectRef>,
    annotations: HandleTable<AnnotationHandle, ObjectRef>,
    form_infos: HandleTable<FormInfoHandle, FormInfoEntry>,
    form_envs: HandleTable<FormEnvHandle, FormEnvEntry>,
}

impl std::fmt::Debug for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension")
            .field("limits", &self.limits)
            .field("sinks", &self.sinks.len())
            .field("documents", &self.documents.len())
            .field("fonts", &self.fonts.len())
            .field("annotations", &self.annotations.len())
            .field("form_infos", &self.form_infos.len())
            .field("form_envs", &self.form_envs.len())
            .finish()
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self::new(&ExtensionConfig::default())
    }
}

impl Extension {
    pub fn new(config: &ExtensionConfig) -> Self {
        Self {
            limits: config.appearance,
            sinks: HandleTable::new(),
            documents: HandleTable::new(),
            fonts: HandleTable::new(),
            annotations: HandleTable::new(),
            form_infos: HandleTable::new(),
            form_envs: HandleTable::new(),
        }
    }

    // --- Output sink -------------------------------------------------------

    pub fn open_sink(&mut self) -> Result<SinkHandle, CoreError> {
        self.sinks.insert(OutputSink::new())
    }

    pub fn sink_size(&self, sink: SinkHandle) -> Result<usize, CoreError> {
        Ok(self.sinks.get(sink)?.size())
    }

    /// Second half of the size/copy protocol. See [`OutputSink::copy_out`].
    pub fn sink_copy_out(
        &self,
        sink: SinkHandle,
        destination: &mut [u8],
        requested: usize,
    ) -> Result<usize, CoreError> {
        Ok(self.sinks.get(sink)?.copy_out(destination, requested)?)
    }

    /// Releases the sink's buffer; the handle is invalid afterwards.
    pub fn close_sink(&mut self, sink: SinkHandle) -> Result<(), CoreError> {
        let released = self.sinks.remove(sink)?;
        log::debug!("released sink buffer of {} bytes", released.size());
        Ok(())
    }

    // --- Documents ---------------------------------------------------------

    pub fn load_document(&mut self, bytes: &[u8]) -> Result<DocumentHandle, CoreError> {
        let doc = PdfDocument::load_mem(bytes)?;
        self.insert_document(doc)
    }

    pub fn insert_document(&mut self, doc: PdfDocument) -> Result<DocumentHandle, CoreError> {
        self.documents.insert(DocumentEntry {
            doc,
            environments: 0,
        })
    }

    /// Closes a document and invalidates the font and annotation handles that
    /// point into it. Fails while a form-fill environment is still open on it.
    pub fn close_document(&mut self, document: DocumentHandle) -> Result<(), CoreError> {
        let live = self.documents.get(document)?.environments;
        if live > 0 {
            log::warn!(
                "refusing to close document {:#010x} with {live} open form environment(s)",
                document.raw()
            );
            return Err(CoreError::DocumentInUse(live));
        }
        self.documents.remove(document)?;
        self.fonts.retain(|obj| obj.document != document);
        self.annotations.retain(|obj| obj.document != document);
        Ok(())
    }

    pub fn document(&self, document: DocumentHandle) -> Result<&PdfDocument, CoreError> {
        Ok(&self.documents.get(document)?.doc)
    }

    fn document_mut(&mut self, document: DocumentHandle) -> Result<&mut PdfDocument, CoreError> {
        Ok(&mut self.documents.get_mut(document)?.doc)
    }

    pub fn page_count(&self, document: DocumentHandle) -> Result<usize, CoreError> {
        Ok(self.document(document)?.page_count())
    }

    pub fn load_standard_font(
        &mut self,
        document: DocumentHandle,
        name: &str,
    ) -> Result<FontHandle, CoreError> {
        let id = self.document_mut(document)?.load_standard_font(name)?;
        issue(&mut self.fonts, ObjectRef { document, id })
    }

    /// Issues a handle for an existing font object of the document.
    pub fn font_by_object(
        &mut self,
        document: DocumentHandle,
        id: ObjectId,
    ) -> Result<FontHandle, CoreError> {
        self.document(document)?.font(id)?;
        issue(&mut self.fonts, ObjectRef { document, id })
    }

    pub fn annotation_count(
        &self,
        document: DocumentHandle,
        page: usize,
    ) -> Result<usize, CoreError> {
        Ok(self.document(document)?.annotation_count(page)?)
    }

    pub fn annotation(
        &mut self,
        document: DocumentHandle,
        page: usize,
        index: usize,
    ) -> Result<AnnotationHandle, CoreError> {
        let id = self.document_mut(document)?.annotation_id(page, index)?;
        issue(&mut self.annotations, ObjectRef { document, id })
    }

    pub fn create_free_text_annotation(
        &mut self,
        document: DocumentHandle,
        page: usize,
        rect: [f32; 4],
    ) -> Result<AnnotationHandle, CoreError> {
        let id = self.document_mut(document)?.create_annotation(page, "FreeText", rect)?;
        issue(&mut self.annotations, ObjectRef { document, id })
    }

    pub fn annotation_string_value(
        &self,
        annotation: AnnotationHandle,
        key: &str,
    ) -> Result<Option<String>, CoreError> {
        let target = *self.annotations.get(annotation)?;
        Ok(self.document(target.document)?.annotation_string_value(target.id, key)?)
    }

    /// Serialises the document into an open sink, returning the bytes written.
    pub fn save_as_copy(
        &mut self,
        document: DocumentHandle,
        sink: SinkHandle,
        flags: SaveFlags,
    ) -> Result<usize, CoreError> {
        // Both live in separate tables, so the borrows do not overlap.
        let output = self.sinks.get_mut(sink)?;
        let doc = &mut self.documents.get_mut(document)?.doc;
        Ok(doc.save_as_copy(output, flags)?)
    }

    // --- Appearance --------------------------------------------------------

    /// Sets the annotation's `DA` string from a font, size and RGB color.
    ///
    /// `None` handles are reported as missing arguments; validation happens
    /// before the annotation is touched. The engine setter's result is
    /// returned as is.
    pub fn set_default_appearance(
        &mut self,
        annotation: Option<AnnotationHandle>,
        font: Option<FontHandle>,
        font_size: f32,
        r: u32,
        g: u32,
        b: u32,
    ) -> Result<bool, CoreError> {
        let annotation = annotation.ok_or(AppearanceError::MissingAnnotation)?;
        let font = font.ok_or(AppearanceError::MissingFont)?;
        let target = *self.annotations.get(annotation)?;
        let source = *self.fonts.get(font)?;
        let color = RgbColor::from_channels(r, g, b)?;

        // The font and the annotation may share a document, so the appearance
        // is built from a shared borrow before the annotation is borrowed mutably.
        let appearance = {
            let font = self.document(source.document)?.font(source.id)?;
            DefaultAppearance::from_font(&font, font_size, color, &self.limits)?
        };
        let mut annotation = self.document_mut(target.document)?.annotation_mut(target.id)?;
        Ok(appearance.apply(&mut annotation)?)
    }

    // --- Form fill ---------------------------------------------------------

    pub fn open_form_fill_info(&mut self) -> Result<FormInfoHandle, CoreError> {
        self.form_infos.insert(FormInfoEntry {
            info: FormFillInfo::default(),
            environments: 0,
        })
    }

    /// Frees the info structure. Fails while an environment created from it
    /// is still open; a second close reports an invalid handle.
    pub fn close_form_fill_info(&mut self, info: FormInfoHandle) -> Result<(), CoreError> {
        let live = self.form_infos.get(info)?.environments;
        if live > 0 {
            log::warn!(
                "refusing to free form-fill info {:#010x} with {live} open environment(s)",
                info.raw()
            );
            return Err(CoreError::InfoInUse(live));
        }
        self.form_infos.remove(info)?;
        Ok(())
    }

    pub fn init_form_fill_environment(
        &mut self,
        document: DocumentHandle,
        info: FormInfoHandle,
    ) -> Result<FormEnvHandle, CoreError> {
        let form_info = &self.form_infos.get(info)?.info;
        let env = self.document(document)?.init_form_fill_environment(form_info)?;
        let handle = self.form_envs.insert(FormEnvEntry {
            env,
            document,
            info,
        })?;
        self.form_infos.get_mut(info)?.environments += 1;
        self.documents.get_mut(document)?.environments += 1;
        Ok(handle)
    }

    pub fn form_environment(&self, env: FormEnvHandle) -> Result<&FormFillEnvironment, CoreError> {
        Ok(&self.form_envs.get(env)?.env)
    }

    /// Exits the environment. Must happen exactly once, before its info is
    /// freed and its document closed.
    pub fn exit_form_fill_environment(&mut self, env: FormEnvHandle) -> Result<(), CoreError> {
        let entry = self.form_envs.remove(env)?;
        if let Ok(info) = self.form_infos.get_mut(entry.info) {
            info.environments -= 1;
        }
        if let Ok(doc) = self.documents.get_mut(entry.document) {
            doc.environments -= 1;
        }
        entry.env.exit();
        Ok(())
    }

    /// Number of handles currently open, across all kinds.
    pub fn open_handles(&self) -> usize {
        self.sinks.len()
            + self.documents.len()
            + self.fonts.len()
            + self.annotations.len()
            + self.form_infos.len()
            + self.form_envs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, Object, dictionary};

    struct Fixture {
        bytes: Vec<u8>,
        bare_font: ObjectId,
    }

    /// A one-page document with a FreeText annotation and a font dictionary
    /// that carries no usable name.
    fn fixture() -> Fixture {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let bare_font = doc.add_object(dictionary! { "Type" => "Font", "Subtype" => "Type3" });
        let annot = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "FreeText",
            "Rect" => vec![50.into(), 700.into(), 300.into(), 740.into()],
        });
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => vec![annot.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        Fixture { bytes, bare_font }
    }

    fn drain(ext: &Extension, sink: SinkHandle) -> Vec<u8> {
        let size = ext.sink_size(sink).unwrap();
        let mut out = vec![0u8; size];
        assert_eq!(ext.sink_copy_out(sink, &mut out, size).unwrap(), size);
        out
    }

    #[test]
    fn fresh_sink_is_empty_and_closes_once() {
        let mut ext = Extension::default();
        let sink = ext.open_sink().unwrap();
        assert_eq!(ext.sink_size(sink).unwrap(), 0);
        ext.close_sink(sink).unwrap();
        assert!(matches!(ext.sink_size(sink), Err(CoreError::InvalidHandle { .. })));
        assert!(matches!(ext.close_sink(sink), Err(CoreError::InvalidHandle { .. })));
        assert_eq!(ext.open_handles(), 0);
    }

    #[test]
    fn oversized_copy_out_is_rejected() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let sink = ext.open_sink().unwrap();
        ext.save_as_copy(doc, sink, SaveFlags::Default).unwrap();

        let size = ext.sink_size(sink).unwrap();
        let mut out = vec![0u8; size + 10];
        assert!(matches!(
            ext.sink_copy_out(sink, &mut out, size + 1),
            Err(CoreError::Sink(_))
        ));
        assert_eq!(ext.sink_copy_out(sink, &mut out, 5).unwrap(), 5);
        assert_eq!(&out[..5], b"%PDF-");
    }

    #[test]
    fn appearance_survives_save_and_reload() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let font = ext.load_standard_font(doc, "Helvetica").unwrap();
        let annot = ext.annotation(doc, 0, 0).unwrap();

        assert!(ext.set_default_appearance(Some(annot), Some(font), 12.0, 255, 0, 128).unwrap());
        assert_eq!(
            ext.annotation_string_value(annot, "DA").unwrap().as_deref(),
            Some("/Helvetica 12.0 Tf 1.000 0.000 0.502 rg")
        );

        let sink = ext.open_sink().unwrap();
        let written = ext.save_as_copy(doc, sink, SaveFlags::Default).unwrap();
        let bytes = drain(&ext, sink);
        assert_eq!(bytes.len(), written);
        ext.close_sink(sink).unwrap();

        let copy = ext.load_document(&bytes).unwrap();
        let reloaded = ext.annotation(copy, 0, 0).unwrap();
        assert_eq!(
            ext.annotation_string_value(reloaded, "DA").unwrap().as_deref(),
            Some("/Helvetica 12.0 Tf 1.000 0.000 0.502 rg")
        );
    }

    #[test]
    fn appearance_failures_leave_annotation_untouched() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let annot = ext.annotation(doc, 0, 0).unwrap();
        let font = ext.load_standard_font(doc, "Courier").unwrap();
        let nameless = ext.font_by_object(doc, fx.bare_font).unwrap();

        assert!(matches!(
            ext.set_default_appearance(None, Some(font), 12.0, 0, 0, 0),
            Err(CoreError::Appearance(AppearanceError::MissingAnnotation))
        ));
        assert!(matches!(
            ext.set_default_appearance(Some(annot), None, 12.0, 0, 0, 0),
            Err(CoreError::Appearance(AppearanceError::MissingFont))
        ));
        assert!(matches!(
            ext.set_default_appearance(Some(annot), Some(nameless), 12.0, 0, 0, 0),
            Err(CoreError::Appearance(AppearanceError::FontNameUnavailable))
        ));
        assert!(matches!(
            ext.set_default_appearance(Some(annot), Some(font), 12.0, 0, 999, 0),
            Err(CoreError::Appearance(AppearanceError::ColorOutOfRange { .. }))
        ));
        assert_eq!(ext.annotation_string_value(annot, "DA").unwrap(), None);
    }

    #[test]
    fn handles_of_other_kinds_are_rejected() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let font = ext.load_standard_font(doc, "Helvetica").unwrap();
        let as_annot = AnnotationHandle::from_raw(font.raw());
        assert!(matches!(
            ext.set_default_appearance(Some(as_annot), Some(font), 12.0, 0, 0, 0),
            Err(CoreError::InvalidHandle { .. })
        ));
        assert!(ext.sink_size(SinkHandle::from_raw(doc.raw())).is_err());
    }

    #[test]
    fn closing_a_document_invalidates_its_objects() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let font = ext.load_standard_font(doc, "Helvetica").unwrap();
        let annot = ext.annotation(doc, 0, 0).unwrap();
        ext.close_document(doc).unwrap();

        assert!(ext.page_count(doc).is_err());
        assert!(matches!(
            ext.set_default_appearance(Some(annot), Some(font), 12.0, 0, 0, 0),
            Err(CoreError::InvalidHandle { .. })
        ));
        assert_eq!(ext.open_handles(), 0);
    }

    #[test]
    fn form_fill_lifecycle_is_ordered() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let info = ext.open_form_fill_info().unwrap();
        let env = ext.init_form_fill_environment(doc, info).unwrap();
        assert!(!ext.form_environment(env).unwrap().has_acroform());

        assert!(matches!(ext.close_form_fill_info(info), Err(CoreError::InfoInUse(1))));
        assert!(matches!(ext.close_document(doc), Err(CoreError::DocumentInUse(1))));

        ext.exit_form_fill_environment(env).unwrap();
        assert!(matches!(
            ext.exit_form_fill_environment(env),
            Err(CoreError::InvalidHandle { .. })
        ));
        ext.close_form_fill_info(info).unwrap();
        assert!(matches!(ext.close_form_fill_info(info), Err(CoreError::InvalidHandle { .. })));
        ext.close_document(doc).unwrap();
    }

    #[test]
    fn repeated_lookups_reuse_handles() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let annot = ext.annotation(doc, 0, 0).unwrap();
        let font = ext.load_standard_font(doc, "Helvetica").unwrap();
        for _ in 0..10 {
            assert_eq!(ext.annotation(doc, 0, 0).unwrap(), annot);
            assert_eq!(ext.load_standard_font(doc, "Helvetica").unwrap(), font);
        }
        assert_eq!(ext.open_handles(), 3);

        let other = ext.load_document(&fx.bytes).unwrap();
        assert_ne!(ext.annotation(other, 0, 0).unwrap(), annot);
        ext.close_document(other).unwrap();
        assert_eq!(ext.open_handles(), 3);
    }

    #[test]
    fn exit_before_init_is_rejected() {
        let mut ext = Extension::default();
        let never_issued = FormEnvHandle::from_raw(0x6000_0001);
        assert!(matches!(
            ext.exit_form_fill_environment(never_issued),
            Err(CoreError::InvalidHandle { .. })
        ));
    }

    #[test]
    fn environment_needs_live_info_and_document() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let info = ext.open_form_fill_info().unwrap();
        ext.close_form_fill_info(info).unwrap();
        assert!(ext.init_form_fill_environment(doc, info).is_err());

        let info = ext.open_form_fill_info().unwrap();
        ext.close_document(doc).unwrap();
        assert!(ext.init_form_fill_environment(doc, info).is_err());
        assert_eq!(ext.open_handles(), 1);
    }

    #[test]
    fn free_text_annotations_can_be_created() {
        let mut ext = Extension::default();
        let fx = fixture();
        let doc = ext.load_document(&fx.bytes).unwrap();
        let annot = ext.create_free_text_annotation(doc, 0, [72.0, 72.0, 200.0, 100.0]).unwrap();
        let font = ext.load_standard_font(doc, "Times-Roman").unwrap();
        assert!(ext.set_default_appearance(Some(annot), Some(font), 9.5, 0, 0, 255).unwrap());
        assert_eq!(ext.annotation_count(doc, 0).unwrap(), 2);
        assert_eq!(
            ext.annotation_string_value(annot, "DA").unwrap().as_deref(),
            Some("/Times-Roman 9.5 Tf 0.000 0.000 1.000 rg")
        );
    }
}
