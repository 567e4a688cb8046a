use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// The annotation dictionaries of a page (1-based page number), resolving
/// references.
pub fn annotations(doc: &LopdfDocument, page_number: u32) -> Vec<&Dictionary> {
    let Some(page_id) = doc.get_pages().get(&page_number).copied() else {
        return Vec::new();
    };
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };
    let annots = match page.get(b"Annots") {
        Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_array).ok(),
        Ok(Object::Array(items)) => Some(items),
        _ => None,
    };
    annots
        .into_iter()
        .flatten()
        .filter_map(|entry| match entry {
            Object::Reference(id) => doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        })
        .collect()
}

/// The `/DA` string of an annotation, if it has one.
pub fn default_appearance(annot: &Dictionary) -> Option<String> {
    annot
        .get(b"DA")
        .and_then(Object::as_str)
        .ok()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
}

/// Asserts that the annotation at `index` on `page_number` carries `expected`.
pub fn assert_default_appearance(
    doc: &LopdfDocument,
    page_number: u32,
    index: usize,
    expected: &str,
) {
    let annots = annotations(doc, page_number);
    let annot = annots
        .get(index)
        .unwrap_or_else(|| panic!("page {page_number} has no annotation {index}"));
    assert_eq!(default_appearance(annot).as_deref(), Some(expected));
}
