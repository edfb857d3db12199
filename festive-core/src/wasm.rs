//! WebAssembly bindings for festive-core.
//!
//! The page keeps drawing on its own 2D context; these bindings own the state
//! and hand back display lists as JSON.

use wasm_bindgen::prelude::*;

use crate::{CardComposer, FontSpec, ImageSize, StickerEditor, Swatch, TextMeasure};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Measures text through a JS callback `(text, cssFont) => width`.
struct JsMeasure<'a>(&'a js_sys::Function);

impl TextMeasure for JsMeasure<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        self.0
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(text),
                &JsValue::from_str(&font.css()),
            )
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(0.0, |w| w as f32)
    }
}

/// Card composer instance for WASM.
#[wasm_bindgen]
pub struct WasmCardComposer {
    composer: CardComposer,
}

#[wasm_bindgen]
impl WasmCardComposer {
    /// Create a composer with default content.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            composer: CardComposer::new(),
        }
    }

    /// Replace the message text.
    #[wasm_bindgen(js_name = setMessage)]
    pub fn set_message(&mut self, message: &str) {
        self.composer.set_message(message);
    }

    /// Replace the signature text.
    #[wasm_bindgen(js_name = setSignature)]
    pub fn set_signature(&mut self, signature: &str) {
        self.composer.set_signature(signature);
    }

    /// Select a swatch by name or hex color.
    ///
    /// # Errors
    ///
    /// Returns an error string for colors outside the palette.
    #[wasm_bindgen(js_name = selectSwatch)]
    pub fn select_swatch(&mut self, name: &str) -> Result<(), String> {
        let swatch = Swatch::from_name(name).map_err(|e| e.to_string())?;
        self.composer.select_swatch(swatch);
        Ok(())
    }

    /// Lay out the card, measuring text with `measure(text, cssFont)`.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = displayListJson)]
    pub fn display_list_json(&self, measure: &js_sys::Function) -> Result<String, String> {
        self.composer
            .display_list(&JsMeasure(measure))
            .to_json()
            .map_err(|e| e.to_string())
    }
}

impl Default for WasmCardComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sticker editor instance for WASM.
#[wasm_bindgen]
pub struct WasmStickerEditor {
    editor: StickerEditor<ImageSize>,
}

#[wasm_bindgen]
impl WasmStickerEditor {
    /// Create an empty editor.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: StickerEditor::new(),
        }
    }

    /// Record a decoded image's size. Returns `[canvasWidth, canvasHeight]`.
    ///
    /// # Errors
    ///
    /// Returns an error string for empty images.
    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&mut self, width: u32, height: u32) -> Result<Vec<u32>, String> {
        let (w, h) = self
            .editor
            .load_image(ImageSize { width, height })
            .map_err(|e| e.to_string())?;
        Ok(vec![w, h])
    }

    /// Whether an image is loaded.
    #[wasm_bindgen(js_name = isReady)]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.editor.is_ready()
    }

    /// Add a sticker by type name.
    ///
    /// # Errors
    ///
    /// Returns the user-facing warning when no photo is loaded.
    #[wasm_bindgen(js_name = addSticker)]
    pub fn add_sticker(&mut self, name: &str) -> Result<usize, String> {
        self.editor.add_sticker(name).map_err(|e| e.to_string())
    }

    /// Pointer pressed. Returns whether a drag started.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.editor.pointer_down(x, y)
    }

    /// Pointer moved. Returns whether the canvas needs a redraw.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.editor.pointer_move(x, y)
    }

    /// Pointer released.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.editor.pointer_up();
    }

    /// Pointer left the canvas.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.editor.pointer_leave();
    }

    /// Select a filter by name.
    ///
    /// # Errors
    ///
    /// Returns the user-facing warning when no photo is loaded.
    #[wasm_bindgen(js_name = applyFilter)]
    pub fn apply_filter(&mut self, name: &str) -> Result<String, String> {
        self.editor
            .apply_filter(name)
            .map(|f| f.css().to_string())
            .map_err(|e| e.to_string())
    }

    /// Current display list as JSON, or an empty string before any load.
    #[wasm_bindgen(js_name = displayListJson)]
    #[must_use]
    pub fn display_list_json(&self) -> String {
        self.editor
            .display_list()
            .and_then(|list| list.to_json().ok())
            .unwrap_or_default()
    }
}

impl Default for WasmStickerEditor {
    fn default() -> Self {
        Self::new()
    }
}
