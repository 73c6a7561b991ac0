//! Pairing payload to QR image.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use qrcode::render::svg;
use qrcode::QrCode;

use crate::error::{Error, Result};

const MIN_SIZE: u32 = 256;

/// Render a pairing payload as an SVG QR code data URL.
pub fn render_pairing_image(payload: &str) -> Result<String> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| Error::Pairing(e.to_string()))?;
    let image = code
        .render()
        .min_dimensions(MIN_SIZE, MIN_SIZE)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_data_url() {
        let url = render_pairing_image("sgnl://linkdevice?uuid=abc&pub_key=xyz").unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));

        let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_oversized_payload_fails() {
        let payload = "x".repeat(8000);
        assert!(matches!(render_pairing_image(&payload), Err(Error::Pairing(_))));
    }
}
