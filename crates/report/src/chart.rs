//! Bar chart rendering for the selection report.
//!
//! One bar per selected service order, in the same descending order as the
//! table, rasterized to PNG and embedded in the report as a data URI.

use std::io::Cursor;

use base64::Engine as _;
use plotters::prelude::*;

use crate::format;

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 600;

/// Bar fill, the report's accent color.
const BAR_COLOR: RGBColor = RGBColor(26, 188, 156);

/// Render one bar per `(category, value)` pair and return the PNG bytes.
pub fn render_bar_chart(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    categories: &[String],
    values: &[f64],
) -> Result<Vec<u8>, String> {
    if categories.len() != values.len() {
        return Err(format!(
            "chart has {} categories but {} values",
            categories.len(),
            values.len()
        ));
    }

    let y_max = values.iter().copied().fold(0.0f64, f64::max);
    let y_min = values.iter().copied().fold(0.0f64, f64::min);
    let y_top = if y_max <= 0.0 { 1.0 } else { y_max * 1.1 };
    let y_bottom = if y_min < 0.0 { y_min * 1.1 } else { 0.0 };

    let mut rgb = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        // An empty selection still gets a report; a blank canvas beats an
        // axis over zero categories.
        if !categories.is_empty() {
            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 28))
                .margin(16)
                .x_label_area_size(56)
                .y_label_area_size(96)
                .build_cartesian_2d((0..categories.len()).into_segmented(), y_bottom..y_top)
                .map_err(|e| e.to_string())?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(x_desc)
                .y_desc(y_desc)
                .x_labels(categories.len())
                .x_label_formatter(&|segment| match segment {
                    SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                        categories.get(*i).cloned().unwrap_or_default()
                    }
                    SegmentValue::Last => String::new(),
                })
                .y_label_formatter(&|v| format::currency_axis(*v))
                .draw()
                .map_err(|e| e.to_string())?;

            chart
                .draw_series(values.iter().enumerate().map(|(i, &v)| {
                    let mut bar = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
                        BAR_COLOR.filled(),
                    );
                    bar.set_margin(0, 0, 6, 6);
                    bar
                }))
                .map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
    }

    let img = image::RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, rgb)
        .ok_or_else(|| "chart buffer size mismatch".to_string())?;
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, image::ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(png.into_inner())
}

/// Wrap PNG bytes as a `data:` URI for inline embedding.
pub fn to_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_png() {
        let categories = vec!["4508".to_string(), "4503".to_string(), "4505".to_string()];
        let values = vec![18_900.0, 12_500.0, 7_200.0];
        let png = render_bar_chart("Billing by order", "Service order", "Total", &categories, &values)
            .unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn empty_selection_still_renders() {
        let png = render_bar_chart("Billing by order", "Service order", "Total", &[], &[]).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    fn mismatched_series_are_rejected() {
        assert!(render_bar_chart("t", "x", "y", &["a".into()], &[]).is_err());
    }

    #[test]
    fn data_uri_has_the_png_media_type() {
        assert!(to_data_uri(b"png-bytes").starts_with("data:image/png;base64,"));
    }
}
