//! Multi-page PDF assembly.
//!
//! One image XObject is shared by every page; each page's content stream
//! places it at that page's offset and the media box does the slicing.

use super::encode::EncodedImage;
use super::pagination::{Layout, mm_to_pt};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::Write;

const IMAGE_NAME: &str = "Im0";

pub fn build_document(image: &EncodedImage, layout: &Layout) -> Result<Document, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut xobject = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
            "Filter" => "FlateDecode",
        },
        image.data.clone(),
    );
    xobject.allows_compression = false;
    let image_id = doc.add_object(xobject);

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! { IMAGE_NAME => image_id },
    });

    let width_pt = layout.page.width_pt();
    let height_pt = layout.page.height_pt();
    let draw_w = mm_to_pt(layout.image_width_mm);
    let draw_h = mm_to_pt(layout.image_height_mm);

    let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count());
    for k in 0..layout.page_count() {
        let Some((x, y)) = layout.origin_pt(k) else {
            continue;
        };
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(draw_w as f32),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(draw_h as f32),
                        Object::Real(x as f32),
                        Object::Real(y as f32),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width_pt as f32),
                Object::Real(height_pt as f32),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    Ok(doc)
}

pub fn write_document(doc: &mut Document, out: &mut impl Write) -> Result<(), lopdf::Error> {
    doc.save_to(out)?;
    Ok(())
}
