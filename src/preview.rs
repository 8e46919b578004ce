/// Local preview generation for accepted images
///
/// Encoding runs on the blocking pool and finishes independently of the
/// analysis request for the same file.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use iced::widget::image::Handle;
use std::io::Cursor;

use crate::state::data::UploadedImage;

/// Client-only rendering of the selected file
#[derive(Debug, Clone)]
pub struct Preview {
    name: String,
    data_url: String,
    /// Pixel size, if the image crate can read the header
    dimensions: Option<(u32, u32)>,
    handle: Handle,
}

impl Preview {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inline `data:` URL of the file
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// Encode an accepted image into a preview
pub async fn encode_preview(image: UploadedImage) -> Result<Preview, String> {
    // Spawn blocking because base64 over a few MB and header parsing are CPU work
    tokio::task::spawn_blocking(move || build_preview(&image))
        .await
        .map_err(|e| format!("Task join error: {}", e))
}

fn build_preview(image: &UploadedImage) -> Preview {
    let dimensions = image::ImageReader::new(Cursor::new(&image.bytes[..]))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());

    if let Some((width, height)) = dimensions {
        log::debug!("Preview for {}: {}x{}", image.name, width, height);
    }

    Preview {
        name: image.name.clone(),
        data_url: data_url(&image.media_type, &image.bytes),
        dimensions,
        handle: Handle::from_bytes(image.bytes.to_vec()),
    }
}

/// Build a `data:<mime>;base64,...` URL
pub fn data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_3x2() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbaImage::new(3, 2)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", &[1, 2, 3]), "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn test_preview_reads_dimensions() {
        let image = UploadedImage {
            name: "tiny.png".to_string(),
            media_type: "image/png".to_string(),
            bytes: png_3x2().into(),
        };

        let preview = encode_preview(image).await.unwrap();

        assert_eq!(preview.name(), "tiny.png");
        assert_eq!(preview.dimensions(), Some((3, 2)));
        assert!(preview.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[tokio::test]
    async fn test_undecodable_image_still_previews() {
        let image = UploadedImage {
            name: "broken.jpg".to_string(),
            media_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF].into(),
        };

        let preview = encode_preview(image).await.unwrap();
        assert_eq!(preview.dimensions(), None);
        assert_eq!(preview.data_url(), "data:image/jpeg;base64,/9j/");
    }
}
