//! Avatar upload limits, storage paths, and in-row preview generation.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::ImageFormat;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted avatar upload (300 KiB).
pub const MAX_AVATAR_BYTES: usize = 300 * 1024;

/// Width, in pixels, of the preview stored alongside the avatar row.
pub const PREVIEW_WIDTH: u32 = 100;

/// Media type recorded when the upload does not declare one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Image formats the preview generator will decode and re-encode.
const PREVIEW_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

// ---------------------------------------------------------------------------
// Size and path rules
// ---------------------------------------------------------------------------

/// Reject uploads larger than [`MAX_AVATAR_BYTES`].
pub fn check_size(size: usize) -> Result<(), CoreError> {
    if size > MAX_AVATAR_BYTES {
        return Err(CoreError::PayloadTooLarge {
            limit: MAX_AVATAR_BYTES,
        });
    }
    Ok(())
}

/// Lowercased extension of an uploaded file name, if it has one.
///
/// `"photo.PNG"` yields `Some("png")`; `"README"` and `".hidden"` yield `None`.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

/// On-disk location of a student's avatar: `<dir>/<student_id>[.<ext>]`.
pub fn avatar_path(dir: &Path, student_id: DbId, original_filename: Option<&str>) -> PathBuf {
    let file_name = match original_filename.and_then(file_extension) {
        Some(ext) => format!("{student_id}.{ext}"),
        None => student_id.to_string(),
    };
    dir.join(file_name)
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Build the bounded-size preview stored in the avatar row.
///
/// Decodable PNG/JPEG/WebP images wider than [`PREVIEW_WIDTH`] are scaled
/// down to that width (keeping the aspect ratio) and re-encoded in the same
/// format. Anything else is returned unchanged; the upload cap already
/// bounds its size.
pub fn make_preview(data: &[u8], media_type: &str) -> Vec<u8> {
    scaled_preview(data, media_type).unwrap_or_else(|| data.to_vec())
}

fn scaled_preview(data: &[u8], media_type: &str) -> Option<Vec<u8>> {
    let format = ImageFormat::from_mime_type(media_type)?;
    if !PREVIEW_FORMATS.contains(&format) {
        return None;
    }

    let img = image::load_from_memory_with_format(data, format).ok()?;
    if img.width() <= PREVIEW_WIDTH {
        return None;
    }

    let height = (u64::from(img.height()) * u64::from(PREVIEW_WIDTH) / u64::from(img.width()))
        .max(1) as u32;
    let scaled = img.resize_exact(PREVIEW_WIDTH, height, FilterType::Triangle);

    let mut out = Cursor::new(Vec::new());
    scaled.write_to(&mut out, format).ok()?;
    Some(out.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
