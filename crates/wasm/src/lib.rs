//! Browser bridge: drive the phase engine from a page's own scroll.

use std::cell::RefCell;
use std::rc::Rc;

use phasefolio_core::model::ScrollGeometry;
use phasefolio_core::{Controller, PortfolioConfig, svg, views};
use phasefolio_protocol::Viewport;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Handle to one controller. Cloning the inner `Rc` lets a
/// [`ScrollBinding`] feed it without a global.
#[wasm_bindgen]
pub struct PortfolioEngine {
    controller: Rc<RefCell<Controller>>,
}

#[wasm_bindgen]
impl PortfolioEngine {
    /// Build from a JSON configuration, or the built-in portfolio when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PortfolioEngine, JsError> {
        console_error_panic_hook::set_once();
        let config = match config_json {
            Some(json) => PortfolioConfig::from_json(&json),
            None => PortfolioConfig::load_default(),
        }
        .map_err(js_error)?;
        Ok(Self {
            controller: Rc::new(RefCell::new(Controller::new(config))),
        })
    }

    /// Returns whether progress changed.
    pub fn on_scroll(&self, scroll_y: f64, scroll_height: f64, viewport_height: f64) -> bool {
        self.controller
            .borrow_mut()
            .on_scroll(&ScrollGeometry::new(scroll_y, scroll_height, viewport_height))
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.controller.borrow_mut().resize(&Viewport::new(width, height));
    }

    /// Advance animations by `dt` seconds.
    pub fn tick(&self, dt: f64) {
        self.controller.borrow_mut().tick(dt);
    }

    pub fn interact(&self) -> bool {
        self.controller.borrow_mut().interact()
    }

    pub fn close(&self) -> bool {
        self.controller.borrow_mut().close()
    }

    pub fn select(&self, id: &str) -> bool {
        self.controller.borrow_mut().select(id)
    }

    pub fn enter(&self) -> bool {
        self.controller.borrow_mut().enter()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.borrow().is_animating()
    }

    /// The current frame snapshot as JSON.
    pub fn frame_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.controller.borrow().frame()).map_err(js_error)
    }

    /// The open panel's content as JSON, or `null`.
    pub fn panel_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.controller.borrow().open_panel()).map_err(js_error)
    }

    /// Render commands for the whole scene as JSON.
    pub fn render_json(&self, width: f64, height: f64) -> Result<String, JsError> {
        let controller = self.controller.borrow();
        let commands = views::render_scene(&controller, &Viewport::new(width, height));
        serde_json::to_string(&commands).map_err(js_error)
    }

    /// The scene as a standalone SVG document.
    pub fn render_svg(&self, width: f64, height: f64) -> String {
        let controller = self.controller.borrow();
        let commands = views::render_scene(&controller, &Viewport::new(width, height));
        svg::render_svg(&commands, width, height, controller.accent())
    }
}

/// A window scroll listener plus the splash timeout, both released on drop.
#[wasm_bindgen]
pub struct ScrollBinding {
    window: web_sys::Window,
    on_scroll: Closure<dyn FnMut()>,
    timeout: Option<i32>,
    _on_timeout: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl ScrollBinding {
    /// Listen to the page scroll (passive) and start the splash timer.
    pub fn attach(engine: &PortfolioEngine) -> Result<ScrollBinding, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;

        let controller = Rc::clone(&engine.controller);
        let scroll_window = window.clone();
        let on_scroll = Closure::<dyn FnMut()>::new(move || {
            let Some(geometry) = read_geometry(&scroll_window) else {
                return;
            };
            if let Ok(mut c) = controller.try_borrow_mut() {
                c.on_scroll(&geometry);
            }
        });
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                on_scroll.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|_| JsError::new("cannot listen for scroll"))?;

        let controller = Rc::clone(&engine.controller);
        let splash_ms = (controller.borrow().config().tuning.splash_secs * 1000.0) as i32;
        let on_timeout = Closure::<dyn FnMut()>::new(move || {
            if let Ok(mut c) = controller.try_borrow_mut() {
                c.finish_splash();
            }
        });
        let timeout = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.as_ref().unchecked_ref(),
                splash_ms,
            )
            .ok();

        Ok(Self {
            window,
            on_scroll,
            timeout,
            _on_timeout: on_timeout,
        })
    }
}

impl Drop for ScrollBinding {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        if let Some(handle) = self.timeout.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

fn read_geometry(window: &web_sys::Window) -> Option<ScrollGeometry> {
    let scroll_y = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    let scroll_height = f64::from(window.document()?.document_element()?.scroll_height());
    Some(ScrollGeometry::new(scroll_y, scroll_height, viewport_height))
}
