//! Chart and document export.
//!
//! PNG export rasterizes the chart's own SVG markup: on the web through an
//! offscreen canvas and an anchor-click download, natively through a direct
//! raster of the series written to the app's export directory. Document
//! export hands the serialized filter state to the server-rendered routes.

use api::filters::FilterCriteria;
use api::MetricsClient;
use tracing::info;

use super::charts::ChartSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Excel,
    Pdf,
}

impl DocumentKind {
    fn label(self) -> &'static str {
        match self {
            DocumentKind::Excel => "Excel",
            DocumentKind::Pdf => "PDF",
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn extension(self) -> &'static str {
        match self {
            DocumentKind::Excel => "xlsx",
            DocumentKind::Pdf => "pdf",
        }
    }
}

/// Rasterize one chart to PNG and deliver it. An uninitialized (empty)
/// chart is a user-facing error and performs no download.
pub async fn export_chart_png(chart: &ChartSeries) -> Result<String, String> {
    if chart.is_empty() {
        return Err(format!(
            "{} has no data to export yet",
            chart.metric.title()
        ));
    }

    let filename = format!("marquee_{}_{}.png", chart.metric.slug(), date_slug());
    let png_bytes = rasterize_chart(chart).await?;
    let delivery = download_bytes(&filename, "image/png", png_bytes).await?;
    info!(chart = chart.metric.slug(), "chart export delivered");
    Ok(match delivery {
        Some(path) => format!("Chart saved to {path}"),
        None => "Chart download started".to_string(),
    })
}

/// Server-rendered spreadsheet/document export for the current filters.
/// The web build navigates the window and lets the browser handle the
/// download; native builds fetch the document and save it locally.
pub async fn export_document(
    client: &MetricsClient,
    criteria: &FilterCriteria,
    kind: DocumentKind,
) -> Result<String, String> {
    let url = match kind {
        DocumentKind::Excel => client.excel_export_url(criteria),
        DocumentKind::Pdf => client.pdf_export_url(criteria),
    };
    info!(%url, "requesting document export");

    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or("window unavailable")?;
        window
            .location()
            .assign(&url)
            .map_err(|_| "Unable to start the download".to_string())?;
        Ok(format!("{} download started", kind.label()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let bytes = client
            .fetch_export(&url)
            .await
            .map_err(|err| err.to_string())?;
        let filename = format!("marquee_dashboard_{}.{}", date_slug(), kind.extension());
        let path = download_bytes(&filename, "application/octet-stream", bytes)
            .await?
            .unwrap_or_default();
        Ok(format!("{} saved to {path}", kind.label()))
    }
}

fn date_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "export".into())
}

async fn rasterize_chart(chart: &ChartSeries) -> Result<Vec<u8>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(chart).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        rasterize_native(chart)
    }
}

#[cfg(target_arch = "wasm32")]
async fn rasterize_web(chart: &ChartSeries) -> Result<Vec<u8>, String> {
    use base64::Engine;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement,
        HtmlImageElement, Url};

    let svg_markup = chart.svg_markup();
    let mut opts = BlobPropertyBag::new();
    opts.type_("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&svg_markup));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(1200);
    canvas.set_height(520);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    let decode = image.decode();
    image.set_src(&url);
    JsFuture::from(decode)
        .await
        .map_err(|_| "Image decode failed")?;

    context
        .draw_image_with_html_image_element_and_dw_and_dh(&image, 0.0, 0.0, 1200.0, 520.0)
        .map_err(|_| "Unable to draw image")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;
    Url::revoke_object_url(&url).ok();

    let encoded = data_url.split(',').nth(1).ok_or("Malformed data URL")?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|_| "PNG decode failed".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn rasterize_native(chart: &ChartSeries) -> Result<Vec<u8>, String> {
    const WIDTH: u32 = 1200;
    const HEIGHT: u32 = 520;
    const SCALE_X: f64 = WIDTH as f64 / 600.0;
    const SCALE_Y: f64 = HEIGHT as f64 / 260.0;

    let mut pixels = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
    paint_background(&mut pixels, WIDTH, HEIGHT);

    let accent = parse_hex(chart.metric.accent());
    let points: Vec<(f64, f64)> = chart
        .plot_points()
        .into_iter()
        .map(|(x, y)| (x * SCALE_X, y * SCALE_Y))
        .collect();

    for window in points.windows(2) {
        draw_segment(&mut pixels, WIDTH, HEIGHT, window[0], window[1], accent);
    }
    for (x, y) in &points {
        draw_dot(&mut pixels, WIDTH, HEIGHT, *x, *y, 4, accent);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, WIDTH, HEIGHT);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| err.to_string())?
            .write_image_data(&pixels)
            .map_err(|err| err.to_string())?;
    }
    Ok(buffer)
}

#[cfg(not(target_arch = "wasm32"))]
fn paint_background(pixels: &mut [u8], width: u32, height: u32) {
    for y in 0..height {
        let blend = y as f32 / height as f32;
        let r = (26.0 - 9.0 * blend) as u8;
        let g = (32.0 - 10.0 * blend) as u8;
        let b = (44.0 - 12.0 * blend) as u8;
        for x in 0..width {
            let idx = ((y * width + x) * 4) as usize;
            pixels[idx] = r;
            pixels[idx + 1] = g;
            pixels[idx + 2] = b;
            pixels[idx + 3] = 255;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_hex(hex: &str) -> [u8; 3] {
    let raw = hex.trim_start_matches('#');
    let value = u32::from_str_radix(raw, 16).unwrap_or(0xffffff);
    [(value >> 16) as u8, (value >> 8) as u8, value as u8]
}

#[cfg(not(target_arch = "wasm32"))]
fn draw_segment(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    from: (f64, f64),
    to: (f64, f64),
    color: [u8; 3],
) {
    let steps = ((to.0 - from.0).abs().max((to.1 - from.1).abs()) as usize).max(1);
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        draw_dot(pixels, width, height, x, y, 2, color);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn draw_dot(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    x: f64,
    y: f64,
    radius: i32,
    color: [u8; 3],
) {
    let cx = x.round() as i32;
    let cy = y.round() as i32;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let px = cx + dx;
            let py = cy + dy;
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                continue;
            }
            let idx = ((py as u32 * width + px as u32) * 4) as usize;
            pixels[idx] = color[0];
            pixels[idx + 1] = color[1];
            pixels[idx + 2] = color[2];
            pixels[idx + 3] = 255;
        }
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let mut opts = BlobPropertyBag::new();
        opts.type_(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;
        use std::io::Write;

        let _ = mime;
        let dir = native_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        let mut file = fs::File::create(&path).map_err(|err| err.to_string())?;
        file.write_all(&bytes).map_err(|err| err.to_string())?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn native_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Marquee", "Marquee")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::charts::{ChartSeries, Metric};

    #[test]
    fn empty_chart_refuses_export() {
        let chart = ChartSeries::empty(Metric::Revenue);
        let result = futures::executor::block_on(export_chart_png(&chart));
        let message = result.unwrap_err();
        assert!(message.contains("Revenue"));
        assert!(message.contains("no data"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_raster_produces_a_png_header() {
        let chart = ChartSeries::from_points(
            Metric::Occupancy,
            vec![("2024-01".to_string(), 40.0), ("2024-02".to_string(), 60.0)],
        );
        let bytes = rasterize_native(&chart).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn hex_accents_parse() {
        assert_eq!(parse_hex("#28a745"), [0x28, 0xa7, 0x45]);
        assert_eq!(parse_hex("#ffc107"), [0xff, 0xc1, 0x07]);
    }
}
