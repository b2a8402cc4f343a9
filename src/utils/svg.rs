//! 將像素平面描繪為 SVG 標記。
//!
//! 每一列掃描出相同 RGBA 的最長水平連續區段，每段輸出一個 `<rect>`；
//! 完全透明的區段略過。

use std::fmt::Write;

use image::{Rgba, RgbaImage};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn trace_to_svg(surface: &RgbaImage) -> String {
    let (width, height) = surface.dimensions();
    let mut svg = String::with_capacity(128 + (width as usize * height as usize) / 2);
    // 寫入 String 不會失敗
    let _ = write!(
        svg,
        r#"<svg xmlns="{}" width="{}" height="{}" viewBox="0 0 {} {}" shape-rendering="crispEdges">"#,
        SVG_NS, width, height, width, height
    );

    for y in 0..height {
        let mut x = 0;
        while x < width {
            let pixel = *surface.get_pixel(x, y);
            let start = x;
            x += 1;
            while x < width && *surface.get_pixel(x, y) == pixel {
                x += 1;
            }
            if pixel[3] == 0 {
                continue;
            }
            push_rect(&mut svg, start, y, x - start, pixel);
        }
    }

    svg.push_str("</svg>");
    svg
}

fn push_rect(svg: &mut String, x: u32, y: u32, run: u32, pixel: Rgba<u8>) {
    let [r, g, b, a] = pixel.0;
    let _ = write!(
        svg,
        r##"<rect x="{}" y="{}" width="{}" height="1" fill="#{:02x}{:02x}{:02x}""##,
        x, y, run, r, g, b
    );
    if a < 255 {
        let _ = write!(svg, r#" fill-opacity="{:.3}""#, a as f32 / 255.0);
    }
    svg.push_str("/>");
}
