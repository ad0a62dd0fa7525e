use base64::{Engine, engine::general_purpose::STANDARD};

use crate::models::{MatchResponse, Product};

/// The query image as echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preview {
    pub base64: String,
    pub bytes: Vec<u8>,
    pub dimensions: Option<(u32, u32)>,
}

impl Preview {
    /// Decode the backend's base64 JPEG. Undecodable data keeps the raw text so the
    /// data URI can still be built, but leaves `bytes` empty.
    pub fn from_base64(base64: &str) -> Self {
        let bytes = match STANDARD.decode(base64.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Preview image is not valid base64: {}", e);
                Vec::new()
            }
        };

        let dimensions = if bytes.is_empty() {
            None
        } else {
            match image::load_from_memory(&bytes) {
                Ok(image) => Some((image.width(), image.height())),
                Err(e) => {
                    log::debug!("Could not decode preview image: {}", e);
                    None
                }
            }
        };

        Self {
            base64: base64.trim().to_string(),
            bytes,
            dimensions,
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.base64)
    }
}

/// Everything one successful query produced. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub products: Vec<Product>,
    pub preview: Preview,
}

impl From<MatchResponse> for ResultSet {
    fn from(response: MatchResponse) -> Self {
        Self {
            products: response.products,
            preview: Preview::from_base64(response.uploaded_image.as_deref().unwrap_or("")),
        }
    }
}
