use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use orbit_scene_core::{HeadingList, OrbitScene, PropertyKey, SceneConfig, Viewport, WheelEvent};

#[wasm_bindgen]
pub struct OrbitSceneWasm {
    core: OrbitScene,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js<T: serde::Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    swb::to_value(value).map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[wasm_bindgen]
impl OrbitSceneWasm {
    /// Create a scene. `config` is a partial SceneConfig object or
    /// undefined/null for defaults; `headings` is an array of strings or
    /// undefined/null for the default four.
    /// Example:
    ///   new OrbitSceneWasm({ scroll: { cooldown_ms: 1500 } }, ["A", "B", "C"])
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, headings: JsValue) -> Result<OrbitSceneWasm, JsError> {
        console_error_panic_hook::set_once();

        let cfg: SceneConfig = if jsvalue_is_undefined_or_null(&config) {
            SceneConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let headings: HeadingList = if jsvalue_is_undefined_or_null(&headings) {
            HeadingList::default()
        } else {
            swb::from_value(headings)
                .map_err(|e| JsError::new(&format!("headings error: {e}")))?
        };

        let core = OrbitScene::new(cfg, headings).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(OrbitSceneWasm { core })
    }

    /// Start the frame loop (and, the first time, the planet spins).
    pub fn start(&mut self) {
        self.core.start();
    }

    pub fn stop(&mut self) {
        self.core.stop();
    }

    #[wasm_bindgen(js_name = is_running)]
    pub fn is_running(&self) -> bool {
        self.core.is_running()
    }

    pub fn step(&self) -> u32 {
        self.core.step() as u32
    }

    /// Feed a wheel event. `now_ms` defaults to `Date.now()`.
    /// Returns `{ kind: "ignored", remaining_ms }` or
    /// `{ kind: "stepped", step, direction, wrapped }`.
    #[wasm_bindgen(js_name = on_wheel)]
    pub fn on_wheel(&mut self, delta_y: f64, now_ms: Option<f64>) -> Result<JsValue, JsError> {
        let now_ms = now_ms.unwrap_or_else(js_sys::Date::now);
        let outcome = self.core.on_wheel(WheelEvent::new(delta_y, now_ms));
        to_js(&outcome, "wheel outcome")
    }

    /// Returns `{ aspect, width, height, pixel_ratio }` for the renderer.
    #[wasm_bindgen(js_name = on_resize)]
    pub fn on_resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    ) -> Result<JsValue, JsError> {
        let outcome = self
            .core
            .on_resize(Viewport::new(width, height, device_pixel_ratio));
        to_js(&outcome, "resize outcome")
    }

    /// Advance by dt (seconds). Returns Outputs `{ changes, events }`, or
    /// null while the frame loop is stopped.
    pub fn frame(&mut self, dt: f32) -> Result<JsValue, JsError> {
        match self.core.frame(dt) {
            Some(out) => to_js(&out, "outputs"),
            None => Ok(JsValue::NULL),
        }
    }

    /// Current value of `{target}/{property}`, if known.
    pub fn value(&self, target: String, property: String) -> Option<f32> {
        self.core.value(&PropertyKey::new(target, property))
    }

    /// Scene layout (camera, starfield, planets) for the host to build.
    pub fn layout(&self) -> Result<JsValue, JsError> {
        to_js(self.core.layout(), "layout")
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
