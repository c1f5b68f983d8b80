use anyhow::Context;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::foundation::core::Dpi;
use crate::foundation::error::{CardError, CardResult};
use crate::raster::buffer::RasterBuffer;

/// PostScript points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Page size in points for a `width x height` pixel raster printed at `dpi`.
pub fn page_size_points(width: u32, height: u32, dpi: Dpi) -> (f32, f32) {
    let scale = POINTS_PER_INCH / dpi.get() as f32;
    (width as f32 * scale, height as f32 * scale)
}

/// Encode as a single-page PDF whose page is covered by the raster at `dpi`.
///
/// Residual transparency is flattened onto white; the image is stored as a Flate-compressed
/// DeviceRGB XObject.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height(), dpi = dpi.get()))]
pub fn encode_pdf(raster: &RasterBuffer, dpi: Dpi) -> CardResult<Vec<u8>> {
    let (pw, ph) = page_size_points(raster.width(), raster.height(), dpi);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(raster.width()),
            "Height" => i64::from(raster.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        raster.to_rgb8_on_white(),
    );
    let image_id = doc.add_object(image);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    pw.into(),
                    0.into(),
                    0.into(),
                    ph.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content
        .encode()
        .map_err(|e| CardError::export(format!("encode page content: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
        "MediaBox" => vec![0.into(), 0.into(), pw.into(), ph.into()],
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
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out).context("write pdf")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pdf.rs"]
mod tests;
