//! Building uploadable references from raw bytes.

use std::io::Cursor;

use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::debug;

use vidgen_models::{ReferenceMime, SizeRuleSet};

use crate::error::{MediaError, MediaResult};

/// An uploadable reference payload.
///
/// `size_label` is set exactly when the payload is an image matching a
/// supported output size, either as supplied or after resizing; it is
/// always a label from the rule set the reference was built against.
#[derive(Debug, Clone)]
pub struct ReferenceMeta {
    pub bytes: Bytes,
    pub filename: String,
    pub mime: ReferenceMime,
    pub size_label: Option<&'static str>,
}

/// Resolves the effective MIME type for a reference.
///
/// The declared type wins when it is itself supported; otherwise the
/// filename extension is consulted. Anything else is rejected, carrying
/// the declared type (as given) in the error.
fn resolve_mime(filename: &str, declared: Option<&str>) -> MediaResult<ReferenceMime> {
    if let Some(declared) = declared {
        if let Ok(mime) = declared.parse::<ReferenceMime>() {
            return Ok(mime);
        }
    }
    if let Some(mime) = ReferenceMime::for_filename(filename) {
        return Ok(mime);
    }
    Err(MediaError::UnsupportedMediaType {
        filename: filename.to_string(),
        mime: declared.map(|d| d.trim().to_string()).unwrap_or_else(|| "unknown".to_string()),
    })
}

/// Builds an uploadable reference from raw bytes.
///
/// Video payloads pass through untouched. Image payloads are resized
/// (crop-to-fill) to the closest supported size unless they already
/// match one; an undecodable image also passes through untouched rather
/// than failing the operation.
pub fn build_reference(
    bytes: Vec<u8>,
    filename: &str,
    declared_mime: Option<&str>,
    rules: SizeRuleSet,
) -> MediaResult<ReferenceMeta> {
    let mime = resolve_mime(filename, declared_mime)?;

    // The video type doubles as the "no resize" early exit; everything
    // past this match is an image with a known encode format.
    let format = match mime {
        ReferenceMime::Jpeg => ImageFormat::Jpeg,
        ReferenceMime::Png => ImageFormat::Png,
        ReferenceMime::Webp => ImageFormat::WebP,
        ReferenceMime::Mp4 => {
            return Ok(ReferenceMeta {
                bytes: bytes.into(),
                filename: filename.to_string(),
                mime,
                size_label: None,
            });
        }
    };

    let img = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            debug!("Could not decode reference {}: {}", filename, e);
            return Ok(ReferenceMeta {
                bytes: bytes.into(),
                filename: filename.to_string(),
                mime,
                size_label: None,
            });
        }
    };

    let (width, height) = img.dimensions();
    let rule = rules.closest(width, height);

    if (width, height) == (rule.width, rule.height) {
        return Ok(ReferenceMeta {
            bytes: bytes.into(),
            filename: filename.to_string(),
            mime,
            size_label: Some(rule.label),
        });
    }

    debug!(
        "Resizing reference {} from {}x{} to {}",
        filename, width, height, rule.label
    );

    let resized = img.resize_to_fill(rule.width, rule.height, FilterType::Lanczos3);
    // The JPEG encoder rejects alpha and the lossless WebP encoder only
    // takes RGB/RGBA buffers.
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        ImageFormat::WebP => DynamicImage::ImageRgba8(resized.to_rgba8()),
        _ => resized,
    };

    let mut out = Vec::new();
    resized.write_to(&mut Cursor::new(&mut out), format)?;

    Ok(ReferenceMeta {
        bytes: out.into(),
        filename: filename.to_string(),
        mime,
        size_label: Some(rule.label),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([40, 80, 120])));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
        out
    }

    #[test]
    fn rejects_unsupported_type_naming_filename() {
        let err = build_reference(vec![0u8; 16], "anim.gif", Some("image/gif"), SizeRuleSet::SORA_2)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("anim.gif"));
        assert!(message.contains("image/gif"));
        assert!(message.contains("image/jpeg"));
        assert!(message.contains("video/mp4"));
    }

    #[test]
    fn declared_type_wins_when_supported() {
        let bytes = png_bytes(1280, 720);
        let meta =
            build_reference(bytes, "upload.bin", Some("image/png"), SizeRuleSet::SORA_2).unwrap();
        assert_eq!(meta.mime, ReferenceMime::Png);
    }

    #[test]
    fn extension_used_when_declared_type_is_unsupported() {
        let bytes = png_bytes(1280, 720);
        let meta = build_reference(
            bytes,
            "upload.png",
            Some("application/octet-stream"),
            SizeRuleSet::SORA_2,
        )
        .unwrap();
        assert_eq!(meta.mime, ReferenceMime::Png);
    }

    #[test]
    fn video_passes_through_without_label() {
        let bytes = vec![1u8, 2, 3, 4];
        let meta = build_reference(bytes.clone(), "clip.mp4", None, SizeRuleSet::SORA_2).unwrap();
        assert_eq!(meta.mime, ReferenceMime::Mp4);
        assert_eq!(meta.size_label, None);
        assert_eq!(meta.bytes.as_ref(), bytes.as_slice());
    }

    #[test]
    fn undecodable_image_passes_through_without_label() {
        let bytes = b"definitely not an image".to_vec();
        let meta =
            build_reference(bytes.clone(), "broken.png", Some("image/png"), SizeRuleSet::SORA_2)
                .unwrap();
        assert_eq!(meta.size_label, None);
        assert_eq!(meta.bytes.as_ref(), bytes.as_slice());
    }

    #[test]
    fn matching_resolution_keeps_bytes_and_sets_label() {
        let bytes = png_bytes(1280, 720);
        let meta = build_reference(bytes.clone(), "ref.png", None, SizeRuleSet::SORA_2).unwrap();
        assert_eq!(meta.size_label, Some("1280x720"));
        assert_eq!(meta.bytes.as_ref(), bytes.as_slice());
    }

    #[test]
    fn mismatched_resolution_is_resized_to_target() {
        let bytes = png_bytes(100, 50);
        let meta = build_reference(bytes, "ref.png", None, SizeRuleSet::SORA_2).unwrap();
        assert_eq!(meta.size_label, Some("1280x720"));

        let out = image::load_from_memory(&meta.bytes).unwrap();
        assert_eq!(out.dimensions(), (1280, 720));
        assert_eq!(image::guess_format(&meta.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn portrait_image_resolves_to_portrait_size() {
        let bytes = png_bytes(540, 960);
        let meta = build_reference(bytes, "ref.png", None, SizeRuleSet::SORA_2).unwrap();
        assert_eq!(meta.size_label, Some("720x1280"));
    }

    #[test]
    fn wide_image_on_pro_rules_picks_wide_landscape() {
        let bytes = png_bytes(2000, 1000);
        let meta = build_reference(bytes, "ref.png", None, SizeRuleSet::SORA_2_PRO).unwrap();
        assert_eq!(meta.size_label, Some("1792x1024"));

        let out = image::load_from_memory(&meta.bytes).unwrap();
        assert_eq!(out.dimensions(), (1792, 1024));
    }
}
