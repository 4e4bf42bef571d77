//! Canvas2D draw pass
//!
//! The layer order is background, splats, mosquitoes, swatter cursor, so
//! decals always sit under the live insects. Splat opacity follows the
//! entity's age fade; a splat is "wet" right after the kill and dry by
//! expiry.

use std::f64::consts::{FRAC_PI_2, TAU};

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::consts::*;
use crate::settings::{Settings, SwatterShape};
use crate::sim::{difficulty, Bounds, GameState, Mosquito, Splat};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Draw one frame of the current state.
    pub fn render(&self, state: &GameState, settings: &Settings) {
        self.draw_background(state.bounds);
        for splat in &state.splats {
            self.draw_splat(splat);
        }
        for mosquito in &state.mosquitos {
            self.draw_mosquito(mosquito);
        }
        self.draw_swatter(state, settings);
    }

    fn set_fill(&self, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
    }

    fn set_stroke(&self, color: &str) {
        self.ctx.set_stroke_style(&JsValue::from_str(color));
    }

    fn fill_gradient(&self, gradient: &CanvasGradient) {
        self.ctx.set_fill_style(gradient);
    }

    fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
    }

    fn rounded_rect_path(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let ctx = &self.ctx;
        let r = r.min(w / 2.0).min(h / 2.0);
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        ctx.line_to(x + w, y + h - r);
        ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        ctx.line_to(x + r, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        ctx.line_to(x, y + r);
        ctx.quadratic_curve_to(x, y, x + r, y);
        ctx.close_path();
    }

    fn draw_background(&self, bounds: Bounds) {
        let ctx = &self.ctx;
        let w = bounds.w as f64;
        let h = bounds.h as f64;
        self.set_fill("#f5f8fb");
        ctx.fill_rect(0.0, 0.0, w, h);

        // Faint alignment grid
        ctx.save();
        ctx.set_global_alpha(0.05);
        self.set_stroke("#3a6cc9");
        ctx.set_line_width(1.0);
        let step = 32.0;
        let mut x = 0.0;
        while x < w {
            self.line(x, 0.0, x, h);
            x += step;
        }
        let mut y = 0.0;
        while y < h {
            self.line(0.0, y, w, y);
            y += step;
        }
        ctx.restore();
    }

    fn draw_splat(&self, splat: &Splat) {
        let ctx = &self.ctx;
        let life_t = splat.fade() as f64;
        let wet = 1.0 - life_t;
        let base_alpha = 0.45 - 0.28 * life_t;
        let dark_alpha = 0.6 - 0.4 * life_t;
        let dark = format!("rgba(90,6,10,{:.3})", dark_alpha);

        ctx.save();
        let _ = ctx.translate(splat.pos.x as f64, splat.pos.y as f64);
        let _ = ctx.rotate((splat.orientation + splat.rotation_jitter) as f64);
        let _ = ctx.set_global_composite_operation("multiply");

        // Irregular base blot
        self.set_fill(&format!("rgba(110,7,12,{:.3})", base_alpha));
        if let Some(first) = splat.blot.first() {
            ctx.begin_path();
            ctx.move_to(first.x as f64, first.y as f64);
            for p in &splat.blot[1..] {
                ctx.line_to(p.x as f64, p.y as f64);
            }
            ctx.close_path();
            ctx.fill();
        }

        // Tapered streaks, two passes each
        self.set_stroke(&dark);
        ctx.set_line_cap("round");
        for s in &splat.streaks {
            for k in 0..2u32 {
                let k = k as f32;
                let w = s.width * (1.0 - k * 0.55);
                let len = s.length * (1.0 - k * 0.28);
                let a = s.angle;
                let sx = a.cos() * (splat.radius * 0.2 + s.start_offset);
                let sy = a.sin() * (splat.radius * 0.2 + s.start_offset);
                let cx = sx + (a + s.curve).cos() * (len * 0.45);
                let cy = sy + (a + s.curve).sin() * (len * 0.45);
                let ex = sx + a.cos() * len;
                let ey = sy + a.sin() * len;
                ctx.set_line_width(w as f64);
                ctx.begin_path();
                ctx.move_to(sx as f64, sy as f64);
                ctx.quadratic_curve_to(cx as f64, cy as f64, ex as f64, ey as f64);
                ctx.stroke();
            }
        }

        // Satellite specks
        self.set_fill(&dark);
        for p in &splat.specks {
            ctx.begin_path();
            let _ = ctx.arc(p.offset.x as f64, p.offset.y as f64, p.radius as f64, 0.0, TAU);
            ctx.fill();
        }

        // Gloss sheen while the splat is still wet
        let _ = ctx.set_global_composite_operation("screen");
        ctx.set_global_alpha(0.12 * wet);
        let grad = ctx.create_linear_gradient(
            (-splat.smear_length * 0.15) as f64,
            (-splat.smear_width * 0.3) as f64,
            (splat.smear_length * 0.25) as f64,
            0.0,
        );
        let _ = grad.add_color_stop(0.0, "rgba(255,255,255,0.18)");
        let _ = grad.add_color_stop(1.0, "rgba(255,255,255,0.0)");
        self.fill_gradient(&grad);
        ctx.begin_path();
        let _ = ctx.ellipse(
            (-splat.radius * 0.2) as f64,
            (-splat.radius * 0.15) as f64,
            (splat.smear_length * 0.28) as f64,
            (splat.smear_width * 0.2) as f64,
            0.2,
            0.0,
            TAU,
        );
        ctx.fill();
        ctx.restore();

        // Drips live in surface space, not splat-local space
        ctx.save();
        let _ = ctx.set_global_composite_operation("multiply");
        for d in &splat.drips {
            let fade = d.fade() as f64;
            let alpha = (0.46 - 0.25 * life_t) * fade;
            self.set_fill(&format!("rgba(90,6,10,{:.3})", alpha));
            ctx.begin_path();
            let _ = ctx.ellipse(
                d.pos.x as f64,
                d.pos.y as f64,
                (d.radius * 1.1) as f64,
                (d.radius * 1.4) as f64,
                0.15,
                0.0,
                TAU,
            );
            ctx.fill();
        }
        let _ = ctx.set_global_composite_operation("screen");
        ctx.set_global_alpha(0.14 * wet);
        self.set_fill("rgba(255,255,255,1)");
        for d in &splat.drips {
            if d.fade() <= 0.0 {
                continue;
            }
            ctx.begin_path();
            let _ = ctx.arc(
                (d.pos.x + d.radius * 0.22) as f64,
                (d.pos.y - d.radius * 0.28) as f64,
                (d.radius * 0.22) as f64,
                0.0,
                TAU,
            );
            ctx.fill();
        }
        ctx.restore();
    }

    fn draw_mosquito(&self, m: &Mosquito) {
        if !m.alive {
            return;
        }
        let ctx = &self.ctx;
        let r = m.radius as f64;
        let flap_t = ((m.wing_phase.sin() + 1.0) * 0.5) as f64;
        let roll = (flap_t - 0.5) * 0.18;

        // Soft floor shadow, offset toward bottom-left
        ctx.save();
        let _ = ctx.translate(m.pos.x as f64 - r * 0.36, m.pos.y as f64 + r * 0.32);
        let _ = ctx.rotate(m.heading as f64 + roll);
        ctx.set_global_alpha(0.12);
        self.set_fill("#000");
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, 0.0, r * 1.55, r * 0.64, 0.0, 0.0, TAU);
        ctx.fill();
        ctx.restore();

        ctx.save();
        let _ = ctx.translate(m.pos.x as f64, m.pos.y as f64);
        let _ = ctx.rotate(m.heading as f64 + roll);

        // Wings behind the body, major axis perpendicular to it
        for sign in [-1.0f64, 1.0] {
            ctx.save();
            ctx.set_global_alpha(0.78 + 0.22 * flap_t);
            let grad = ctx.create_linear_gradient(-r * 0.2, -r * 1.4, r * 0.2, 0.0);
            let _ = grad.add_color_stop(0.0, "rgba(190,205,220,0.96)");
            let _ = grad.add_color_stop(0.5, "rgba(175,195,215,0.75)");
            let _ = grad.add_color_stop(1.0, "rgba(220,235,250,0.30)");
            self.fill_gradient(&grad);
            let wing_major = r * (1.1 + 0.35 * flap_t);
            let wing_minor = r * (0.28 + 0.22 * flap_t);
            let _ = ctx.translate(-r * 0.1, sign * r * 0.6);
            let flutter_tilt = m.wing_phase.sin() as f64 * 0.22;
            let _ = ctx.rotate(-FRAC_PI_2 + sign * flutter_tilt);
            let _ = ctx.scale(1.0 + 0.07 * flap_t, 1.0 + 0.03 * flap_t);
            ctx.begin_path();
            let _ = ctx.ellipse(0.0, 0.0, wing_major, wing_minor, 0.0, 0.0, TAU);
            let _ = ctx.set_global_composite_operation("multiply");
            ctx.fill();
            let _ = ctx.set_global_composite_operation("source-over");
            self.set_stroke("rgba(50,90,130,0.8)");
            ctx.set_line_width(1.3);
            ctx.stroke();
            // Wing veins fan out from the root
            ctx.set_global_alpha(0.5);
            self.set_stroke("rgba(110,140,170,0.65)");
            ctx.set_line_width(0.85);
            for i in 0..4 {
                let t = i as f64 / 3.0;
                let sx = -r * 0.25;
                let sy = sign * (r * (0.1 + 0.06 * i as f64));
                let ex = sx + r * (0.25 + 0.1 * t);
                let ey = sign * (r * (0.5 + 0.35 * t));
                self.line(sx, sy, ex, ey);
            }
            // Translucency highlight
            let _ = ctx.set_global_composite_operation("screen");
            ctx.set_global_alpha(0.15);
            self.set_fill("#ffffff");
            ctx.begin_path();
            let _ = ctx.ellipse(
                -wing_major * 0.08,
                -wing_minor * 0.22,
                wing_major * 0.32,
                wing_minor * 0.2,
                0.1,
                0.0,
                TAU,
            );
            ctx.fill();
            let _ = ctx.set_global_composite_operation("source-over");
            ctx.set_global_alpha(1.0);
            ctx.restore();
        }

        // Abdomen
        if let Ok(grad) =
            ctx.create_radial_gradient(-r, -r * 0.3, r * 0.2, -r * 0.9, 0.0, r * 1.8)
        {
            let _ = grad.add_color_stop(0.0, "#9aa6b7");
            let _ = grad.add_color_stop(0.25, "#5c6675");
            let _ = grad.add_color_stop(1.0, "#14171b");
            self.fill_gradient(&grad);
        }
        ctx.begin_path();
        let _ = ctx.ellipse(-r * 0.95, 0.0, r * 1.4, r * 0.62, 0.04, 0.0, TAU);
        ctx.fill();
        ctx.set_global_alpha(0.22);
        self.set_stroke("#cfd8e3");
        ctx.set_line_width(1.0);
        for k in 0..3 {
            let f = 0.14 * k as f64;
            self.line(-r * (1.55 - f), -r * 0.35, -r * (0.65 - f), r * 0.35);
        }
        ctx.set_global_alpha(1.0);

        // Thorax
        if let Ok(grad) =
            ctx.create_radial_gradient(-r * 0.2, -r * 0.25, r * 0.2, 0.0, 0.0, r)
        {
            let _ = grad.add_color_stop(0.0, "#b6c1d3");
            let _ = grad.add_color_stop(0.35, "#657083");
            let _ = grad.add_color_stop(1.0, "#1a1e24");
            self.fill_gradient(&grad);
        }
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, 0.0, r * 0.95, r * 0.68, 0.0, 0.0, TAU);
        ctx.fill();

        // Three leg pairs with a subtle gait swing
        for side in [-1.0f64, 1.0] {
            self.draw_leg(m, r, -r * 0.1, side * r * 0.2, 0.05, side, 0.0);
            self.draw_leg(m, r, -r * 0.2, side * r * 0.05, -0.1, side, 1.1);
            self.draw_leg(m, r, -r * 0.3, side * -r * 0.1, -0.3, side, 2.2);
        }

        // Head, eye, glint
        if let Ok(grad) =
            ctx.create_radial_gradient(r * 0.75, -r * 0.3, r * 0.1, r * 0.9, 0.0, r * 0.6)
        {
            let _ = grad.add_color_stop(0.0, "#d5deea");
            let _ = grad.add_color_stop(0.45, "#7b8799");
            let _ = grad.add_color_stop(1.0, "#22262c");
            self.fill_gradient(&grad);
        }
        ctx.begin_path();
        let _ = ctx.ellipse(r * 0.9, 0.0, r * 0.46, r * 0.46, 0.0, 0.0, TAU);
        ctx.fill();
        self.set_fill("#0c0f14");
        ctx.begin_path();
        let _ = ctx.ellipse(r, -r * 0.08, r * 0.22, r * 0.26, 0.0, 0.0, TAU);
        ctx.fill();
        self.set_fill("rgba(255,255,255,0.9)");
        ctx.begin_path();
        let _ = ctx.arc(r * 1.08, -r * 0.2, r * 0.06, 0.0, TAU);
        ctx.fill();

        // Proboscis
        self.set_stroke("#0e1116");
        ctx.set_line_width(1.3);
        self.line(r * 1.18, 0.0, r * 2.15, 0.0);
        self.set_stroke("rgba(255,255,255,0.25)");
        ctx.set_line_width(0.6);
        self.line(r * 1.2, -0.5, r * 1.9, -0.5);

        // Antennae
        self.set_stroke("#11151a");
        ctx.set_line_width(1.0);
        for side in [-1.0f64, 1.0] {
            ctx.begin_path();
            ctx.move_to(r * 0.85, side * r * 0.1);
            ctx.quadratic_curve_to(r * 1.15, side * -r * 0.45, r * 0.5, side * -r * 0.6);
            ctx.stroke();
        }

        ctx.restore();
    }

    fn draw_leg(
        &self,
        m: &Mosquito,
        r: f64,
        anchor_x: f64,
        anchor_y: f64,
        base_angle: f64,
        side: f64,
        phase: f64,
    ) {
        let ctx = &self.ctx;
        let swing = ((m.wing_phase * 2.0) as f64 + phase).sin() * 0.14;
        let len1 = r * 0.9;
        let len2 = r * 1.1;
        let a1 = base_angle + side * (0.85 + swing);
        let a2 = a1 + side * (0.9 + swing * 0.6);
        let x1 = anchor_x + a1.cos() * len1;
        let y1 = anchor_y + a1.sin() * len1;
        let x2 = x1 + a2.cos() * len2;
        let y2 = y1 + a2.sin() * len2;
        self.set_stroke("#0f1216");
        ctx.set_line_width(1.2);
        ctx.begin_path();
        ctx.move_to(anchor_x, anchor_y);
        ctx.line_to(x1, y1);
        ctx.line_to(x2, y2);
        ctx.stroke();
        self.set_stroke("rgba(255,255,255,0.08)");
        ctx.set_line_width(0.7);
        self.line(anchor_x, anchor_y, x1, y1);
    }

    fn draw_swatter(&self, state: &GameState, settings: &Settings) {
        let pos = state.pointer.pos;
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return;
        }
        let ctx = &self.ctx;

        // Transient boost right after a swing, decaying over the swing window
        let boost = if state.swat.is_swinging {
            1.0 - ((state.time - state.swat.last_swing_at) / SWING_DURATION).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let radius = (difficulty::swat_radius(state.score) + boost * SWING_BOOST_PX) as f64;
        let heat = ((state.time - state.swat.last_swing_at) / 0.3).clamp(0.0, 1.0);

        ctx.save();
        let _ = ctx.translate(pos.x as f64, pos.y as f64);
        ctx.set_global_alpha(0.75);
        let accent = settings.color.as_str();
        if state.swat.is_swinging || heat < 1.0 {
            self.set_stroke(accent);
        } else {
            self.set_stroke("#2b2b2b");
        }
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, radius, 0.0, TAU);
        ctx.stroke();

        ctx.set_global_alpha(0.5);
        ctx.begin_path();
        ctx.move_to(-radius, 0.0);
        ctx.line_to(radius, 0.0);
        ctx.move_to(0.0, -radius);
        ctx.line_to(0.0, radius);
        ctx.stroke();

        self.draw_swatter_body(settings, radius);
        ctx.restore();
    }

    /// Plastic head and handle, in the pointer-local frame.
    fn draw_swatter_body(&self, settings: &Settings, radius: f64) {
        let ctx = &self.ctx;
        let color = settings.color.as_str();
        let head_w = radius * 2.1;
        let head_h = radius * 1.6;
        let handle_len = radius * 2.4;
        let handle_w = (radius * 0.35).max(6.0);
        let head_offset = radius * 0.8;

        // Handle with grip stripes
        ctx.save();
        ctx.set_global_alpha(0.6);
        self.set_fill(color);
        self.set_stroke("rgba(0,0,0,0.35)");
        ctx.set_line_width(1.5);
        self.rounded_rect_path(
            -handle_w * 0.5,
            head_offset,
            handle_w,
            handle_len,
            (handle_w * 0.6).min(6.0),
        );
        ctx.fill();
        ctx.stroke();

        ctx.set_global_alpha(0.2);
        self.set_stroke("#ffffff");
        for i in 0..5 {
            let y = head_offset + handle_len * (i as f64 / 5.0);
            self.line(-handle_w * 0.45, y, handle_w * 0.45, y);
        }
        ctx.restore();

        // Head with perforated mesh
        ctx.save();
        let _ = ctx.translate(0.0, -radius * 0.2);
        self.set_fill(color);
        self.set_stroke("rgba(0,0,0,0.35)");
        ctx.set_line_width(1.5);
        let round = settings.shape == SwatterShape::Round;
        if round {
            ctx.begin_path();
            let _ = ctx.ellipse(0.0, 0.0, head_w * 0.55, head_w * 0.55, 0.0, 0.0, TAU);
        } else {
            self.rounded_rect_path(-head_w * 0.5, -head_h * 0.5, head_w, head_h, 8.0);
        }
        ctx.set_global_alpha(0.45);
        ctx.fill();
        ctx.stroke();

        let _ = ctx.set_global_composite_operation("destination-out");
        self.set_fill("rgba(0,0,0,0.5)");
        let (cols, rows) = if round { (8, 8) } else { (9, 7) };
        for row in 0..rows {
            for col in 0..cols {
                let tx = col as f64 / (cols - 1) as f64 - 0.5;
                let ty = row as f64 / (rows - 1) as f64 - 0.5;
                let gx = tx * head_w * 0.8;
                let gy = ty * if round { head_w * 0.8 } else { head_h * 0.8 };
                if round && gx.hypot(gy) > head_w * 0.4 {
                    continue;
                }
                ctx.begin_path();
                let _ = ctx.arc(gx, gy, (radius * 0.14).max(1.2), 0.0, TAU);
                ctx.fill();
            }
        }
        ctx.restore();

        // Specular highlight across the head
        ctx.save();
        let _ = ctx.set_global_composite_operation("screen");
        ctx.set_global_alpha(0.12);
        self.set_fill("#ffffff");
        ctx.begin_path();
        let _ = ctx.ellipse(
            0.0,
            -radius * 0.5,
            head_w * 0.4,
            head_h * 0.25,
            -0.3,
            0.0,
            TAU,
        );
        ctx.fill();
        ctx.restore();
    }
}
