//! WASM bindings for the sunburst-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! Input and output are JSON strings; errors are reported inside the output
//! object rather than thrown.

use wasm_bindgen::prelude::*;

use crate::chart::{layout_snapshot, ChartConfig, MainData, Sunburst};
use crate::hierarchy::InvalidTreeError;
use crate::output::{ChartOutput, DrawInstructions, ErrorInfo};

#[cfg(target_arch = "wasm32")]
mod console {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console, js_name = log)]
        fn console_log(s: &str);

        #[wasm_bindgen(js_namespace = console, js_name = warn)]
        fn console_warn(s: &str);

        #[wasm_bindgen(js_namespace = console, js_name = error)]
        fn console_error(s: &str);
    }

    /// Forwards `log` records to the browser console.
    struct ConsoleLogger;

    impl log::Log for ConsoleLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &log::Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}", record.target(), record.args());
            match record.level() {
                log::Level::Error => console_error(&line),
                log::Level::Warn => console_warn(&line),
                _ => console_log(&line),
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: ConsoleLogger = ConsoleLogger;

    pub fn init() {
        // Fails harmlessly if a logger is already installed.
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    console::init();
}

fn parse_input(input: &str) -> Result<MainData, ErrorInfo> {
    serde_json::from_str(input).map_err(|e| {
        log::error!("Error reading chart data: {}", e);
        ErrorInfo::from(&e)
    })
}

fn to_json(result: Result<DrawInstructions, InvalidTreeError>) -> String {
    let output = match result {
        Ok(draw) => ChartOutput::ok(draw),
        Err(e) => {
            log::error!("Error laying out chart: {}", e);
            ChartOutput::err(ErrorInfo::from(&e))
        }
    };
    write_output(&output)
}

fn write_output(output: &ChartOutput) -> String {
    serde_json::to_string(output).unwrap_or_else(|e| {
        log::error!("Error serializing chart output: {}", e);
        "{\"error\": {\"message\": \"Serialization error\", \"kind\": \"internal\"}}".to_string()
    })
}

/// A sunburst chart kept alive on the JS side across data updates.
#[wasm_bindgen]
pub struct SunburstChart {
    inner: Sunburst,
}

#[wasm_bindgen]
impl SunburstChart {
    #[wasm_bindgen(constructor)]
    pub fn new(size: f64, radius: f64) -> SunburstChart {
        init_logging();
        SunburstChart {
            inner: Sunburst::new(ChartConfig::with_dimensions(size, radius)),
        }
    }

    /// Lay out one snapshot and return the draw instructions as JSON.
    /// The first successful update also carries the `frame` setup.
    pub fn update(&mut self, input: &str) -> String {
        match parse_input(input) {
            Ok(data) => to_json(self.inner.update(&data)),
            Err(info) => write_output(&ChartOutput::err(info)),
        }
    }

    pub fn has_rendered(&self) -> bool {
        self.inner.has_rendered()
    }
}

/// Stateless layout of a single snapshot (never carries a frame).
#[wasm_bindgen]
pub fn layout_sunburst(input: &str, size: f64, radius: f64) -> String {
    let cfg = ChartConfig::with_dimensions(size, radius);
    match parse_input(input) {
        Ok(data) => to_json(layout_snapshot(&cfg, &data)),
        Err(info) => write_output(&ChartOutput::err(info)),
    }
}
