//! 2D canvas backend for the draw list (web only)

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{Shape, css};

/// Paint shapes in order onto the canvas
pub fn paint(ctx: &CanvasRenderingContext2d, shapes: &[Shape]) -> Result<(), JsValue> {
    for shape in shapes {
        match shape {
            Shape::VerticalGradient { size, top, bottom } => {
                let (w, h) = (size.x as f64, size.y as f64);
                ctx.clear_rect(0.0, 0.0, w, h);
                let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
                gradient.add_color_stop(0.0, &css(*top))?;
                gradient.add_color_stop(1.0, &css(*bottom))?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            Shape::Rect { min, size, color } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&css(*color));
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            Shape::Actor {
                center,
                radius,
                rotation,
                fill,
                outline,
                border,
            } => {
                ctx.save();
                ctx.translate(center.x as f64, center.y as f64)?;
                ctx.rotate(*rotation as f64)?;

                ctx.begin_path();
                ctx.arc(0.0, 0.0, *radius as f64, 0.0, TAU)?;
                ctx.close_path();
                ctx.set_fill_style_str(&css(*fill));
                ctx.fill();

                ctx.set_stroke_style_str(&css(*outline));
                ctx.set_line_width(*border as f64);
                ctx.stroke();

                ctx.restore();
            }
        }
    }
    Ok(())
}
