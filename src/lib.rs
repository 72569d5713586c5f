mod api;
mod app;
mod autocomplete;
mod components;
mod models;
mod pages;
mod state;
mod util;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::EnvConfig;
    use crate::autocomplete::DEFAULT_MODEL_LIMIT;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn set_env(entries: &[(&str, JsValue)]) {
        let win = web_sys::window().expect("browser window");
        let env = js_sys::Object::new();
        for (k, v) in entries {
            js_sys::Reflect::set(&env, &(*k).into(), v).expect("set ENV key");
        }
        js_sys::Reflect::set(&win, &"ENV".into(), &env).expect("set window.ENV");
    }

    #[wasm_bindgen_test]
    fn test_env_config_reads_window_env() {
        set_env(&[
            ("API_URL", "http://backend:9000".into()),
            ("DEBOUNCE_MS", JsValue::from_f64(120.0)),
            ("BLUR_GRACE_MS", "80".into()),
        ]);

        let env = EnvConfig::new();
        assert_eq!(env.api_url, "http://backend:9000");
        assert_eq!(env.autocomplete.debounce_ms, 120);
        assert_eq!(env.autocomplete.blur_grace_ms, 80);
        assert_eq!(env.autocomplete.model_limit, DEFAULT_MODEL_LIMIT);
    }

    #[wasm_bindgen_test]
    fn test_env_config_falls_back_to_lowercase_key_and_default() {
        set_env(&[("api_url", "http://legacy:1".into())]);
        assert_eq!(EnvConfig::new().api_url, "http://legacy:1");

        set_env(&[]);
        assert_eq!(EnvConfig::new().api_url, "http://127.0.0.1:8000");
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
