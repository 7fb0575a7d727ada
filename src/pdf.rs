use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use strum::IntoEnumIterator;

use crate::error::RenderError;
use crate::fonts::{self, Font};
use crate::layout::{Page, PAGE_HEIGHT, PAGE_WIDTH};

/// Writes the typeset page to `path` as a PDF.
pub fn write(page: &Page, path: &Path) -> Result<(), RenderError> {
    let mut doc = build(page)?;
    let unwritable = |source| RenderError::Create {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(unwritable)?;
    let mut writer = BufWriter::new(file);
    doc.save_to(&mut writer).map_err(unwritable)?;
    writer.flush().map_err(unwritable)?;
    Ok(())
}

fn build(page: &Page) -> Result<Document, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // The base fourteen Helvetica faces need no embedded font program,
    // only a name and an encoding.
    let mut font_index = Dictionary::new();
    for font in Font::iter() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set("BaseFont", Object::Name(font.to_string().into_bytes()));
        dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let font_id = doc.add_object(Object::Dictionary(dict));
        font_index.set(font.resource(), Object::Reference(font_id));
    }
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(font_index));
    let resources_id = doc.add_object(Object::Dictionary(resources));

    let content = Content {
        operations: operations(page),
    };
    let stream = Stream::new(Dictionary::new(), content.encode()?);
    let content_id = doc.add_object(Object::Stream(stream));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(pages_id));
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Reference(resources_id));
    let page_id = doc.add_object(Object::Dictionary(page_dict));

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
    pages.set("Count", Object::Integer(1));
    pages.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ]),
    );
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.compress();

    Ok(doc)
}

fn operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();

    for rule in &page.rules {
        ops.push(Operation::new("w", vec![Object::Real(rule.stroke)]));
        ops.push(Operation::new(
            "m",
            vec![Object::Real(rule.x1), Object::Real(rule.y1)],
        ));
        ops.push(Operation::new(
            "l",
            vec![Object::Real(rule.x2), Object::Real(rule.y2)],
        ));
        ops.push(Operation::new("S", vec![]));
    }

    for frame in &page.frames {
        ops.push(Operation::new("w", vec![Object::Real(frame.stroke)]));
        ops.push(Operation::new(
            "re",
            vec![
                Object::Real(frame.x),
                Object::Real(frame.y),
                Object::Real(frame.w),
                Object::Real(frame.h),
            ],
        ));
        ops.push(Operation::new("S", vec![]));
    }

    for run in &page.texts {
        ops.push(Operation::new("g", vec![Object::Real(run.shade)]));
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(run.font.resource().as_bytes().to_vec()),
                Object::Real(run.size),
            ],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(run.x), Object::Real(run.y)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                fonts::encode_win_ansi(&run.text),
                StringFormat::Literal,
            )],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    ops
}
