// Renderer struct that handles 2d canvas calls, and contains the backing
// canvas, its context, and the device-pixel-ratio scaling applied to both.

use crate::color::Color;
use crate::field::ParticleField;
use crate::particle::Particle;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    dpr: f64,
    color: Color,
}

impl CanvasRenderer {
    // On creation grabs the 2d context from the canvas; a canvas that cannot
    // produce one is an error at the construction boundary, never later
    pub fn new(canvas: HtmlCanvasElement, dpr: f64, color: Color) -> Result<CanvasRenderer, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(CanvasRenderer {
            canvas,
            context,
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
            color,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // Match the backing pixel buffer to the CSS box scaled by the device
    // pixel ratio. Resetting the width also resets the context transform,
    // so the dpr scale is reapplied every time.
    pub fn configure_surface(&self, width: f64, height: f64) -> Result<(), JsValue> {
        self.canvas.set_width((width * self.dpr) as u32);
        self.canvas.set_height((height * self.dpr) as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", width))?;
        style.set_property("height", &format!("{}px", height))?;
        self.context.scale(self.dpr, self.dpr)?;
        Ok(())
    }

    pub fn clear(&self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    pub fn draw_field(&self, field: &ParticleField) -> Result<(), JsValue> {
        self.clear(field.width(), field.height());
        for particle in field.particles() {
            self.draw_particle(particle)?;
        }
        Ok(())
    }

    // Each dot is drawn offset by its pointer displacement; the transform is
    // put back to the plain dpr matrix afterwards
    #[allow(deprecated)]
    pub fn draw_particle(&self, p: &Particle) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.translate(p.translate[0], p.translate[1])?;
        ctx.begin_path();
        ctx.arc(p.pos[0], p.pos[1], p.size, 0.0, std::f64::consts::PI * 2.0)?;
        ctx.set_fill_style(&JsValue::from_str(&self.color.to_rgba_string(p.alpha)));
        ctx.fill();
        ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        Ok(())
    }
}
