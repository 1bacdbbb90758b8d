#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bowl;
pub mod geom;
pub mod io;

use std::fmt;

use io::{InputError, PlaneInput, SectionReport, SectionRequest, TierInput};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not initialise rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Public entry point for hosts: builds sections from plain JS objects.
#[wasm_bindgen]
pub struct Engine {
    initialized: bool,
    last_report: Option<SectionReport>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Engine {
        Engine {
            initialized: true,
            last_report: None,
        }
    }

    /// Returns whether the engine went through its minimal initialisation.
    #[wasm_bindgen]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Build a section from an array of tier objects and an optional plane object.
    ///
    /// Omitted tier fields take their defaults; an omitted plane is world YZ.
    #[wasm_bindgen]
    pub fn construct_section(&mut self, tiers: JsValue, plane: JsValue) -> Result<JsValue, JsValue> {
        let tiers: Vec<TierInput> = serde_wasm_bindgen::from_value(tiers).map_err(to_js_error)?;
        let plane: Option<PlaneInput> = if plane.is_undefined() || plane.is_null() {
            None
        } else {
            Some(serde_wasm_bindgen::from_value(plane).map_err(to_js_error)?)
        };

        let report = self
            .construct_from_request(SectionRequest { tiers, plane })
            .map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(report).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Returns the report of the last successfully built section.
    #[wasm_bindgen]
    pub fn last_report(&self) -> Result<JsValue, JsValue> {
        let report = self
            .last_report
            .as_ref()
            .ok_or_else(|| js_error("no section has been built yet"))?;
        serde_wasm_bindgen::to_value(report).map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Engine {
    /// Build a section and keep its report. A failed build leaves the previous
    /// report in place.
    ///
    /// # Errors
    /// Any input or section construction error.
    pub fn construct_from_request(
        &mut self,
        request: SectionRequest,
    ) -> Result<&SectionReport, InputError> {
        let section = request.build()?;
        debug_log!("section built: {} tiers", section.len());
        Ok(self.last_report.insert(SectionReport::from(&section)))
    }

    /// Report of the last successfully built section, if any.
    #[must_use]
    pub fn report(&self) -> Option<&SectionReport> {
        self.last_report.as_ref()
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
