use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

/// A FreeText annotation dictionary covering `rect`.
pub fn free_text(rect: [i64; 4]) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => rect.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
    }
}

/// Builds a document with one page per entry of `pages`, each page carrying
/// the given annotations as indirect objects.
pub fn document_with_annotations(pages: Vec<Vec<Dictionary>>) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for annots in pages {
        let annots: Vec<Object> = annots.into_iter().map(|a| doc.add_object(a).into()).collect();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => annots,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }),
    );
    let catalog = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog);
    doc
}

/// One page with a single FreeText annotation.
pub fn single_annotation_document() -> Document {
    document_with_annotations(vec![vec![free_text([50, 700, 300, 740])]])
}

/// Adds an AcroForm with `fields` text fields to the catalog.
pub fn add_acroform(doc: &mut Document, fields: usize, need_appearances: bool) {
    let fields: Vec<Object> = (0..fields)
        .map(|i| {
            doc.add_object(dictionary! {
                "FT" => "Tx",
                "T" => Object::string_literal(format!("field{i}")),
            })
            .into()
        })
        .collect();
    let form = doc.add_object(dictionary! {
        "Fields" => fields,
        "NeedAppearances" => need_appearances,
    });
    if let Ok(catalog) = doc.catalog_mut() {
        catalog.set("AcroForm", form);
    }
}

/// A TrueType font with no `BaseFont` whose descriptor names a subset font.
pub fn add_unnamed_truetype_font(doc: &mut Document, descriptor_font_name: &str) -> ObjectId {
    let descriptor = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(descriptor_font_name.as_bytes().to_vec()),
        "Flags" => 32,
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "FontDescriptor" => descriptor,
    })
}

/// A composite font whose only name is the descendant's `/FontFamily`.
pub fn add_unnamed_type0_font(doc: &mut Document, family: &str) -> ObjectId {
    let descriptor = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontFamily" => Object::string_literal(family),
        "Flags" => 32,
    });
    let descendant = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "FontDescriptor" => descriptor,
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![descendant.into()],
    })
}

/// A simple font whose `BaseFont` is `name`, taken byte for byte.
pub fn add_named_font(doc: &mut Document, name: &[u8]) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(name.to_vec()),
    })
}
